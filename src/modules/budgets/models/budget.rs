use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, EntityKind, Money, Record, Result};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::require_text;
use crate::modules::taxes::models::PricingContext;
use crate::modules::taxes::services::{InvoiceTotals, TaxedDocument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Rejected,
    Expired,
}

/// Quote ("presupuesto") sent to a client before work starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub number: String,
    pub date: NaiveDate,
    pub client_id: String,
    pub project_id: String,
    /// Days the quoted prices hold
    pub validity_days: u32,
    pub subtotal: Money,
    #[serde(default)]
    pub vat: Money,
    #[serde(default)]
    pub total: Money,
    /// date + validity_days
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub status: BudgetStatus,
    #[serde(default)]
    pub notes: String,
}

impl Budget {
    /// Whether the quoted prices still hold on `today`
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.valid_until.is_some_and(|until| today <= until)
    }
}

impl TaxedDocument for Budget {
    fn subtotal(&self) -> Money {
        self.subtotal
    }

    fn set_totals(&mut self, totals: &InvoiceTotals) {
        self.vat = totals.vat;
        self.total = totals.total;
    }
}

impl DerivedFields for Budget {
    fn derive_fields(&mut self, pricing: &PricingContext) -> Result<()> {
        self.recompute_totals(&pricing.rules)?;
        self.valid_until = Some(
            self.date
                .checked_add_days(Days::new(u64::from(self.validity_days)))
                .ok_or_else(|| {
                    AppError::constraint(format!(
                        "budget validity of {} days is out of range",
                        self.validity_days
                    ))
                })?,
        );
        Ok(())
    }
}

impl Record for Budget {
    const KIND: EntityKind = EntityKind::Budget;
    const SORT_FIELDS: &'static [&'static str] = &["number", "date", "valid_until", "total"];
    const FILTER_FIELDS: &'static [&'static str] = &["client_id", "project_id", "status"];
    const UNIQUE_FIELD: Option<&'static str> = Some("number");

    fn unique_key(&self) -> Option<String> {
        Some(self.number.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "number", &self.number)?;
        require_text(Self::KIND, "client_id", &self.client_id)?;
        require_text(Self::KIND, "project_id", &self.project_id)?;

        if self.validity_days == 0 {
            return Err(AppError::constraint("budget validity_days must be at least 1"));
        }

        Ok(())
    }
}
