use rust_decimal::Decimal;

use crate::core::money::non_negative;
use crate::core::{AppError, Money, Result};

/// `round(hours_worked × hourly_rate)`, half-up to the whole guaraní
pub fn compute_work_order_subtotal(hours_worked: Decimal, hourly_rate: Decimal) -> Result<Money> {
    let hourly_rate = Money::from_decimal(hourly_rate)?;
    subtotal_for(hours_worked, hourly_rate)
}

/// Same as [`compute_work_order_subtotal`] for an already validated rate
pub fn subtotal_for(hours_worked: Decimal, hourly_rate: Money) -> Result<Money> {
    let hours_worked = non_negative(hours_worked, "hours worked")?;
    let product = hours_worked
        .checked_mul(hourly_rate.to_decimal())
        .ok_or_else(|| AppError::invalid_amount("hours × rate overflows"))?;
    Money::from_rounded(product)
}
