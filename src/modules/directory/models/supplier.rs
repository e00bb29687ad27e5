use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Record, Result, SortOrder};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::{require_text, validate_email, validate_ruc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub ruc: String,
    pub business_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub city: String,
    /// Free-form trade, e.g. "materiales", "ferretería"
    #[serde(default)]
    pub category: String,
}

impl Record for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;
    const SORT_FIELDS: &'static [&'static str] = &["business_name", "city", "category"];
    const FILTER_FIELDS: &'static [&'static str] = &["ruc", "city", "category"];
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

impl DerivedFields for Supplier {}
