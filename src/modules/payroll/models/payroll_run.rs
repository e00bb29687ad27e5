use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::non_negative;
use crate::core::{AppError, EntityKind, Money, Record, Result};
use crate::modules::payroll::services::{payroll_for, PayrollResult};
use crate::modules::records::services::DerivedFields;
use crate::modules::records::validation::require_text;
use crate::modules::taxes::models::PricingContext;

/// One employee's pay for one month ("liquidación de sueldo").
///
/// Deductions and net pay are derived at creation. Runs are never edited or
/// removed afterwards; a correction is a new run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// YYYY-MM
    pub period: String,
    pub payment_date: NaiveDate,
    pub employee_id: String,
    pub base_salary: Money,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub overtime_hours: Decimal,
    #[serde(default)]
    pub overtime_pay: Money,
    #[serde(default)]
    pub social_security_deduction: Money,
    #[serde(default)]
    pub income_tax_deduction: Money,
    #[serde(default)]
    pub total_deductions: Money,
    #[serde(default)]
    pub net_pay: Money,
}

impl PayrollRun {
    fn apply(&mut self, result: &PayrollResult) {
        self.social_security_deduction = result.social_security_deduction;
        self.income_tax_deduction = result.income_tax_deduction;
        self.total_deductions = result.total_deductions;
        self.net_pay = result.net_pay;
    }
}

/// Accepts `YYYY-MM` with a month between 01 and 12
pub fn validate_period(period: &str) -> Result<()> {
    let invalid = || {
        AppError::constraint(format!(
            "payroll run period must be formatted YYYY-MM, got '{}'",
            period
        ))
    };

    let (year, month) = period.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    if !period.bytes().filter(|b| *b != b'-').all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match month.parse::<u32>() {
        Ok(1..=12) => Ok(()),
        _ => Err(invalid()),
    }
}

impl DerivedFields for PayrollRun {
    fn derive_fields(&mut self, pricing: &PricingContext) -> Result<()> {
        let result = payroll_for(
            self.base_salary,
            self.overtime_pay,
            &pricing.rules,
            pricing.net_pay_policy,
        )?;
        self.apply(&result);
        Ok(())
    }
}

impl Record for PayrollRun {
    const KIND: EntityKind = EntityKind::PayrollRun;
    const SORT_FIELDS: &'static [&'static str] = &["period", "payment_date", "net_pay"];
    const FILTER_FIELDS: &'static [&'static str] = &["employee_id", "period"];
    const APPEND_ONLY: bool = true;

    fn validate(&self) -> Result<()> {
        validate_period(&self.period)?;
        require_text(Self::KIND, "employee_id", &self.employee_id)?;

        non_negative(self.overtime_hours, "payroll run overtime_hours")?;

        Ok(())
    }
}
