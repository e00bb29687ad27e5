// Invoice ("factura") record
//
// subtotal is entered; vat, withholding and total are derived from it on
// every create and update. Withholding (RCI) is stored beside the total and
// never added into it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Money, Record, Result};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::{require_text, validate_date_order};
use crate::modules::taxes::models::PricingContext;
use crate::modules::taxes::services::{InvoiceTotals, TaxedDocument};

/// Invoice status lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being prepared, not yet sent to the client
    #[default]
    Draft,
    Issued,
    Paid,
    /// Past due date without payment
    Overdue,
    /// Cancelled after issue
    Void,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Issued => write!(f, "issued"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
            InvoiceStatus::Void => write!(f, "void"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Printed invoice number, e.g. 001-001-0000123
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_id: String,
    pub project_id: String,

    /// Amount before taxes, entered by the user
    pub subtotal: Money,

    /// IVA 10% of subtotal
    #[serde(default)]
    pub vat: Money,

    /// RCI 30% of subtotal, tracked separately
    #[serde(default)]
    pub withholding: Money,

    /// subtotal + vat
    #[serde(default)]
    pub total: Money,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default)]
    pub notes: String,
}

impl Invoice {
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: self.subtotal,
            vat: self.vat,
            withholding: self.withholding,
            total: self.total,
        }
    }
}

impl TaxedDocument for Invoice {
    fn subtotal(&self) -> Money {
        self.subtotal
    }

    fn set_totals(&mut self, totals: &InvoiceTotals) {
        self.vat = totals.vat;
        self.withholding = totals.withholding;
        self.total = totals.total;
    }
}

impl DerivedFields for Invoice {
    fn derive_fields(&mut self, pricing: &PricingContext) -> Result<()> {
        self.recompute_totals(&pricing.rules)?;
        Ok(())
    }
}

impl Record for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;
    const SORT_FIELDS: &'static [&'static str] =
        &["number", "issue_date", "due_date", "subtotal", "total"];
    const FILTER_FIELDS: &'static [&'static str] = &["client_id", "project_id", "status"];
    const UNIQUE_FIELD: Option<&'static str> = Some("number");

    fn unique_key(&self) -> Option<String> {
        Some(self.number.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "number", &self.number)?;
        require_text(Self::KIND, "client_id", &self.client_id)?;
        require_text(Self::KIND, "project_id", &self.project_id)?;
        validate_date_order(
            Self::KIND,
            "issue_date",
            self.issue_date,
            "due_date",
            self.due_date,
        )
    }
}
