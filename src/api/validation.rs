//! Field-level request validation.
//!
//! Runs at the API boundary so the domain and service layers only ever see
//! well-formed input. The first failing field is reported as
//! [`GatewayError::ValidationFailed`].

use rust_decimal::Decimal;

use crate::error::GatewayError;

/// Largest bid accepted on line item creation.
pub const MAX_BID: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Largest budget accepted on line item creation.
pub const MAX_BUDGET: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

fn fail(field: &'static str, reason: impl Into<String>) -> GatewayError {
    GatewayError::ValidationFailed {
        field,
        reason: reason.into(),
    }
}

/// Unwraps a required value.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] if the value is absent.
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, GatewayError> {
    value.ok_or_else(|| fail(field, "cannot be blank"))
}

/// Unwraps a required string, rejecting blank values.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] if the value is absent or
/// blank.
pub fn required_str(field: &'static str, value: Option<String>) -> Result<String, GatewayError> {
    required(field, value.filter(|v| !v.trim().is_empty()))
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), GatewayError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(fail(
            field,
            format!("the length must be between {min} and {max}"),
        ));
    }
    Ok(())
}

/// Line item name: 2–50 ASCII letters, digits or spaces.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] on a bad length or character.
pub fn name(value: &str) -> Result<(), GatewayError> {
    check_length("name", value, 2, 50)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        return Err(fail("name", "must be in a valid format"));
    }
    Ok(())
}

/// Advertiser ID: 2–10 ASCII letters or digits.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] on a bad length or character.
pub fn advertiser_id(value: &str) -> Result<(), GatewayError> {
    check_length("advertiser_id", value, 2, 10)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(fail("advertiser_id", "must contain English letters and digits only"));
    }
    Ok(())
}

/// Placement, category or keyword label: 2–20 characters shaped like
/// `letters(_letters)*`.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] on a bad length or shape.
pub fn label(field: &'static str, value: &str) -> Result<(), GatewayError> {
    check_length(field, value, 2, 20)?;
    let well_formed = value
        .split('_')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphabetic()));
    if !well_formed {
        return Err(fail(field, "must be in a valid format"));
    }
    Ok(())
}

/// Non-empty list of labels, each valid per [`label`].
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] on an empty list or a bad
/// label.
pub fn labels(field: &'static str, values: &[String]) -> Result<(), GatewayError> {
    if values.is_empty() {
        return Err(fail(field, "cannot be blank"));
    }
    values.iter().try_for_each(|v| label(field, v))
}

/// Bid: between 0 and [`MAX_BID`] inclusive.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] when out of range.
pub fn bid(value: Decimal) -> Result<(), GatewayError> {
    if value < Decimal::ZERO {
        return Err(fail("bid", "must be no less than 0"));
    }
    if value > MAX_BID {
        return Err(fail("bid", format!("must be no greater than {MAX_BID}")));
    }
    Ok(())
}

/// Budget: at least one bid and at most [`MAX_BUDGET`].
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] when out of range.
pub fn budget(value: Decimal, bid: Decimal) -> Result<(), GatewayError> {
    if value < bid {
        return Err(fail("budget", format!("must be no less than {bid}")));
    }
    if value > MAX_BUDGET {
        return Err(fail("budget", format!("must be no greater than {MAX_BUDGET}")));
    }
    Ok(())
}

/// End user ID: 2–30 characters.
///
/// # Errors
///
/// Returns [`GatewayError::ValidationFailed`] on a bad length.
pub fn user_id(value: &str) -> Result<(), GatewayError> {
    check_length("user_id", value, 2, 30)
}
