use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Money, Result};
use crate::modules::taxes::models::{NetPayPolicy, TaxRate, TaxRuleSet};

/// Gross pay, deductions and net pay for one employee and period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    pub base_salary: Money,
    pub overtime_pay: Money,
    pub social_security_deduction: Money,
    pub income_tax_deduction: Money,
    pub total_deductions: Money,
    pub net_pay: Money,
}

impl PayrollResult {
    /// Base salary plus overtime; fails on overflow
    pub fn gross_pay(&self) -> Result<Money> {
        self.base_salary.checked_add(self.overtime_pay)
    }
}

/// Compute payroll deductions and net pay.
///
/// Deductions apply to the base salary only; overtime is added untaxed.
/// `net = base + overtime − (social_security + income_tax)`, and `policy`
/// decides what happens when that would go below zero.
pub fn compute_payroll(
    base_salary: Decimal,
    overtime_pay: Decimal,
    rules: &TaxRuleSet,
    policy: NetPayPolicy,
) -> Result<PayrollResult> {
    let base_salary = Money::from_decimal(base_salary)?;
    let overtime_pay = Money::from_decimal(overtime_pay)?;
    payroll_for(base_salary, overtime_pay, rules, policy)
}

/// Same as [`compute_payroll`] for already validated amounts
pub fn payroll_for(
    base_salary: Money,
    overtime_pay: Money,
    rules: &TaxRuleSet,
    policy: NetPayPolicy,
) -> Result<PayrollResult> {
    let social_security_deduction = base_salary.apply_rate(rules.get(TaxRate::SocialSecurity)?)?;
    let income_tax_deduction = base_salary.apply_rate(rules.get(TaxRate::IncomeTax)?)?;
    let total_deductions = social_security_deduction.checked_add(income_tax_deduction)?;
    let gross_pay = base_salary.checked_add(overtime_pay)?;

    let net_pay = match gross_pay.checked_sub(total_deductions) {
        Some(net) => net,
        None => match policy {
            NetPayPolicy::Reject => {
                return Err(AppError::invalid_amount(format!(
                    "deductions of {} exceed gross pay of {}",
                    total_deductions, gross_pay
                )));
            }
            NetPayPolicy::ClampToZero => {
                tracing::warn!(
                    gross_pay = gross_pay.amount(),
                    total_deductions = total_deductions.amount(),
                    "Deductions exceed gross pay, clamping net pay to zero"
                );
                Money::ZERO
            }
        },
    };

    Ok(PayrollResult {
        base_salary,
        overtime_pay,
        social_security_deduction,
        income_tax_deduction,
        total_deductions,
        net_pay,
    })
}
