use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Money, Result};
use crate::modules::taxes::models::{TaxRate, TaxRuleSet};

/// VAT, withholding and grand total derived from a subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub vat: Money,
    /// Tracked as its own line, never part of `total`
    pub withholding: Money,
    pub total: Money,
}

/// Derive invoice totals from an entered subtotal.
///
/// `vat = round(subtotal × vat)`, `withholding = round(subtotal × withholding)`,
/// `total = subtotal + vat`. Rounding is half-up to the whole guaraní.
pub fn compute_invoice_totals(subtotal: Decimal, rules: &TaxRuleSet) -> Result<InvoiceTotals> {
    let subtotal = Money::from_decimal(subtotal)?;
    totals_for(subtotal, rules)
}

/// Same as [`compute_invoice_totals`] for an already validated amount
pub fn totals_for(subtotal: Money, rules: &TaxRuleSet) -> Result<InvoiceTotals> {
    let vat = subtotal.apply_rate(rules.get(TaxRate::Vat)?)?;
    let withholding = subtotal.apply_rate(rules.get(TaxRate::Withholding)?)?;
    let total = subtotal.checked_add(vat)?;

    Ok(InvoiceTotals {
        subtotal,
        vat,
        withholding,
        total,
    })
}

/// A record whose VAT and total derive from its subtotal
pub trait TaxedDocument {
    fn subtotal(&self) -> Money;

    /// Store freshly computed totals on the record
    fn set_totals(&mut self, totals: &InvoiceTotals);

    /// Recompute every derived amount from the current subtotal.
    ///
    /// VAT and withholding are both recomputed on every call.
    fn recompute_totals(&mut self, rules: &TaxRuleSet) -> Result<InvoiceTotals> {
        let totals = totals_for(self.subtotal(), rules)?;
        self.set_totals(&totals);
        Ok(totals)
    }
}
