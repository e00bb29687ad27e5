use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Money, Record, Result};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::require_text;
use crate::modules::taxes::models::PricingContext;
use crate::modules::taxes::services::{InvoiceTotals, TaxedDocument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Sent,
    Received,
    Paid,
    Cancelled,
}

/// Order of materials or services from a supplier for a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub number: String,
    pub date: NaiveDate,
    pub supplier_id: String,
    pub project_id: String,
    pub subtotal: Money,
    #[serde(default)]
    pub vat: Money,
    #[serde(default)]
    pub total: Money,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub notes: String,
}

impl TaxedDocument for PurchaseOrder {
    fn subtotal(&self) -> Money {
        self.subtotal
    }

    fn set_totals(&mut self, totals: &InvoiceTotals) {
        self.vat = totals.vat;
        self.total = totals.total;
    }
}

impl DerivedFields for PurchaseOrder {
    fn derive_fields(&mut self, pricing: &PricingContext) -> Result<()> {
        self.recompute_totals(&pricing.rules)?;
        Ok(())
    }
}

impl Record for PurchaseOrder {
    const KIND: EntityKind = EntityKind::PurchaseOrder;
    const SORT_FIELDS: &'static [&'static str] = &["number", "date", "total"];
    const FILTER_FIELDS: &'static [&'static str] = &["supplier_id", "project_id", "status"];
    const UNIQUE_FIELD: Option<&'static str> = Some("number");

    fn unique_key(&self) -> Option<String> {
        Some(self.number.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "number", &self.number)?;
        require_text(Self::KIND, "supplier_id", &self.supplier_id)?;
        require_text(Self::KIND, "project_id", &self.project_id)
    }
}
