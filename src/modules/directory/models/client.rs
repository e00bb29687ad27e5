use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Record, Result, SortOrder};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::{require_text, validate_email, validate_ruc};

/// How the client is registered with the tax authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxpayerType {
    /// Registered for IVA
    Vat,
    Exempt,
    /// Not a regular taxpayer
    Occasional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub ruc: String,
    pub business_name: String,
    #[serde(default)]
    pub trade_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub city: String,
    pub taxpayer_type: TaxpayerType,
}

impl Record for Client {
    const KIND: EntityKind = EntityKind::Client;
    const SORT_FIELDS: &'static [&'static str] = &["business_name", "trade_name", "city"];
    const FILTER_FIELDS: &'static [&'static str] = &["ruc", "city", "taxpayer_type"];
    const UNIQUE_FIELD: Option<&'static str> = Some("ruc");

    fn default_order() -> SortOrder {
        SortOrder::asc("business_name")
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.ruc.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        validate_ruc(Self::KIND, &self.ruc)?;
        require_text(Self::KIND, "business_name", &self.business_name)?;
        validate_email(Self::KIND, &self.email)
    }
}

impl DerivedFields for Client {}
