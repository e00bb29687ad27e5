use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{AppError, Result};

/// Rounds to the nearest whole guaraní, halves going up.
///
/// All amounts handled here are non-negative, so `MidpointAwayFromZero`
/// behaves as round-half-up.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Non-negative amount in Paraguayan guaraníes.
///
/// The guaraní has no subunit in practice, so amounts are whole numbers.
/// Serialized as a plain JSON integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "u64")]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Money(amount)
    }

    /// Validates an entered amount: must be non-negative and whole
    pub fn from_decimal(amount: Decimal) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AppError::invalid_amount(format!(
                "amount cannot be negative, got {}",
                amount
            )));
        }

        if amount.fract() != Decimal::ZERO {
            return Err(AppError::invalid_amount(format!(
                "guaraní amounts have no decimal places, got {}",
                amount
            )));
        }

        amount
            .to_u64()
            .map(Money)
            .ok_or_else(|| AppError::invalid_amount(format!("amount out of range: {}", amount)))
    }

    /// Rounds a computed value to the guaraní and validates it
    pub fn from_rounded(value: Decimal) -> Result<Self> {
        Self::from_decimal(round_half_up(value))
    }

    pub fn amount(self) -> u64 {
        self.0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `round(self × rate)`
    pub fn apply_rate(self, rate: Decimal) -> Result<Money> {
        let product = self
            .to_decimal()
            .checked_mul(rate)
            .ok_or_else(|| AppError::invalid_amount("amount × rate overflows"))?;
        Money::from_rounded(product)
    }

    pub fn checked_add(self, other: Money) -> Result<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| AppError::invalid_amount("sum of amounts overflows"))
    }

    /// `None` when the result would be negative
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Formats with es-PY thousands separators, e.g. `₲ 1.100.000`
    pub fn format_amount(self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        format!("₲ {}", grouped)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_amount())
    }
}

impl From<Money> for u64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = AppError;

    fn try_from(amount: Decimal) -> Result<Self> {
        Money::from_decimal(amount)
    }
}

impl TryFrom<i64> for Money {
    type Error = AppError;

    fn try_from(amount: i64) -> Result<Self> {
        Money::from_decimal(Decimal::from(amount))
    }
}

/// Validates a non-negative decimal quantity such as hours worked
pub fn non_negative(value: Decimal, what: &str) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::invalid_amount(format!(
            "{} cannot be negative, got {}",
            what, value
        )));
    }
    Ok(value)
}
