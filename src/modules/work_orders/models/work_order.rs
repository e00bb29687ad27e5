use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::money::non_negative;
use crate::core::{EntityKind, Money, Record, Result};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::require_text;
use crate::modules::taxes::models::PricingContext;
use crate::modules::work_orders::services::subtotal_for;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// Already billed on an invoice
    Invoiced,
}

/// Labour booked by one employee against a project ("orden de trabajo")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Generated as OT-YYYYMM-NNNN when left blank
    #[serde(default)]
    pub number: String,
    pub date: NaiveDate,
    pub project_id: String,
    pub employee_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub hours_worked: Decimal,
    pub hourly_rate: Money,
    /// round(hours_worked × hourly_rate)
    #[serde(default)]
    pub subtotal: Money,
    #[serde(default)]
    pub status: WorkOrderStatus,
}

/// `OT-YYYYMM-NNNN` for the month of `date`
pub fn generate_work_order_number(date: NaiveDate) -> String {
    let sequence = Uuid::new_v4().as_u128() % 10_000;
    format!("OT-{:04}{:02}-{:04}", date.year(), date.month(), sequence)
}

impl DerivedFields for WorkOrder {
    fn derive_fields(&mut self, _pricing: &PricingContext) -> Result<()> {
        if self.number.trim().is_empty() {
            self.number = generate_work_order_number(self.date);
        }
        self.subtotal = subtotal_for(self.hours_worked, self.hourly_rate)?;
        Ok(())
    }
}

impl Record for WorkOrder {
    const KIND: EntityKind = EntityKind::WorkOrder;
    const SORT_FIELDS: &'static [&'static str] =
        &["number", "date", "hours_worked", "subtotal"];
    const FILTER_FIELDS: &'static [&'static str] = &["project_id", "employee_id", "status"];
    const UNIQUE_FIELD: Option<&'static str> = Some("number");

    fn unique_key(&self) -> Option<String> {
        Some(self.number.trim().to_string())
    }

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "project_id", &self.project_id)?;
        require_text(Self::KIND, "employee_id", &self.employee_id)?;

        non_negative(self.hours_worked, "work order hours_worked")?;

        Ok(())
    }
}
