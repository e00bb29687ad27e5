use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::{AppError, Result};

/// Rates the calculators know how to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRate {
    /// IVA, applied to invoice, budget and purchase-order subtotals
    Vat,
    /// RCI, independent-contractor withholding tracked beside the total
    Withholding,
    /// IPS payroll deduction
    SocialSecurity,
    /// Renta payroll deduction
    IncomeTax,
}

impl TaxRate {
    pub const ALL: [TaxRate; 4] = [
        TaxRate::Vat,
        TaxRate::Withholding,
        TaxRate::SocialSecurity,
        TaxRate::IncomeTax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRate::Vat => "vat",
            TaxRate::Withholding => "withholding",
            TaxRate::SocialSecurity => "social_security",
            TaxRate::IncomeTax => "income_tax",
        }
    }

    /// Statutory Paraguayan default
    pub fn default_rate(&self) -> Decimal {
        match self {
            TaxRate::Vat => dec!(0.10),
            TaxRate::Withholding => dec!(0.30),
            TaxRate::SocialSecurity => dec!(0.09),
            TaxRate::IncomeTax => dec!(0.025),
        }
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaxRate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vat" => Ok(TaxRate::Vat),
            "withholding" => Ok(TaxRate::Withholding),
            "social_security" => Ok(TaxRate::SocialSecurity),
            "income_tax" => Ok(TaxRate::IncomeTax),
            _ => Err(AppError::unknown_rate(s)),
        }
    }
}

/// Immutable set of named tax rates, each a fraction in `[0, 1]`.
///
/// Built once from configuration and passed by reference into every
/// calculator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxRuleSet {
    rates: BTreeMap<TaxRate, Decimal>,
}

impl TaxRuleSet {
    /// Build a rule set from `(name, fraction)` pairs
    pub fn new<N, I>(rates: I) -> Result<Self>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, Decimal)>,
    {
        let mut map = BTreeMap::new();
        for (name, rate) in rates {
            let name: TaxRate = name.as_ref().parse()?;
            validate_tax_rate(name, rate)?;
            map.insert(name, rate);
        }
        Ok(Self { rates: map })
    }

    /// VAT 10%, withholding 30%, social security 9%, income tax 2.5%
    pub fn paraguay_default() -> Self {
        Self {
            rates: TaxRate::ALL
                .iter()
                .map(|rate| (*rate, rate.default_rate()))
                .collect(),
        }
    }

    /// Fraction configured under `name`
    pub fn rate(&self, name: &str) -> Result<Decimal> {
        self.get(name.parse()?)
    }

    pub fn get(&self, rate: TaxRate) -> Result<Decimal> {
        self.rates
            .get(&rate)
            .copied()
            .ok_or_else(|| AppError::unknown_rate(format!("{} is not configured", rate)))
    }

    /// Returns a new rule set with one rate replaced
    pub fn with_rate(&self, name: &str, rate: Decimal) -> Result<Self> {
        let name: TaxRate = name.parse()?;
        validate_tax_rate(name, rate)?;
        let mut rates = self.rates.clone();
        rates.insert(name, rate);
        Ok(Self { rates })
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaxRate, Decimal)> + '_ {
        self.rates.iter().map(|(name, rate)| (*name, *rate))
    }
}

impl Default for TaxRuleSet {
    fn default() -> Self {
        Self::paraguay_default()
    }
}

/// Tax rate must lie in `[0, 1]` with at most 4 decimal places
fn validate_tax_rate(name: TaxRate, rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "Tax rate {} cannot be negative",
            name
        )));
    }

    if rate > Decimal::ONE {
        return Err(AppError::validation(format!(
            "Tax rate {} cannot exceed 1.0 (100%)",
            name
        )));
    }

    if rate.normalize().scale() > 4 {
        return Err(AppError::validation(format!(
            "Tax rate {} cannot have more than 4 decimal places",
            name
        )));
    }

    Ok(())
}

/// What to do when payroll deductions exceed gross pay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetPayPolicy {
    /// Fail the calculation with `InvalidAmount`
    #[default]
    Reject,
    /// Pay nothing; deductions stay as computed
    ClampToZero,
}

impl std::str::FromStr for NetPayPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(NetPayPolicy::Reject),
            "clamp_to_zero" | "clamp" => Ok(NetPayPolicy::ClampToZero),
            _ => Err(AppError::Configuration(format!("Invalid net pay policy: {}", s))),
        }
    }
}

/// Everything a record needs to compute its derived fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingContext {
    pub rules: TaxRuleSet,
    pub net_pay_policy: NetPayPolicy,
}

impl PricingContext {
    pub fn new(rules: TaxRuleSet, net_pay_policy: NetPayPolicy) -> Self {
        Self {
            rules,
            net_pay_policy,
        }
    }
}
