//! Field checks shared by record schemas. Failures surface as
//! `AppError::Constraint`, the same error a store raises for a rejected write.

use chrono::NaiveDate;

use crate::core::{AppError, EntityKind, Result};

pub fn require_text(kind: EntityKind, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::constraint(format!("{} {} is required", kind, field)));
    }
    Ok(())
}

/// Paraguayan RUC: base digits, a hyphen, one check digit (`80012345-6`)
pub fn validate_ruc(kind: EntityKind, ruc: &str) -> Result<()> {
    require_text(kind, "ruc", ruc)?;

    let valid = match ruc.trim().split_once('-') {
        Some((base, check)) => {
            (1..=8).contains(&base.len())
                && base.chars().all(|c| c.is_ascii_digit())
                && check.len() == 1
                && check.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    };

    if !valid {
        return Err(AppError::constraint(format!(
            "{} ruc '{}' must look like 80012345-6",
            kind, ruc
        )));
    }

    Ok(())
}

/// Empty is allowed; anything else needs an `@` with text on both sides
pub fn validate_email(kind: EntityKind, email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::constraint(format!(
            "{} email '{}' is not a valid address",
            kind, email
        ))),
    }
}

pub fn validate_date_order(
    kind: EntityKind,
    start_field: &str,
    start: NaiveDate,
    end_field: &str,
    end: NaiveDate,
) -> Result<()> {
    if end < start {
        return Err(AppError::constraint(format!(
            "{} {} ({}) cannot be before {} ({})",
            kind, end_field, end, start_field, start
        )));
    }
    Ok(())
}
