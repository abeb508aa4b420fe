//! Reusable field validators
//!
//! Each validator takes the raw text of a form input and reports the first
//! problem it finds.

use chrono::{DateTime, NaiveDate};

use super::FieldErrorKind;
use crate::core::entity::QuoteStatus;

/// Validator: field must not be blank
pub fn required() -> impl Fn(&str) -> Result<(), FieldErrorKind> + Send + Sync + Clone {
    |value: &str| {
        if value.trim().is_empty() {
            Err(FieldErrorKind::Required)
        } else {
            Ok(())
        }
    }
}

/// Validator: field must parse to a number strictly greater than zero
pub fn positive_amount() -> impl Fn(&str) -> Result<(), FieldErrorKind> + Send + Sync + Clone {
    |value: &str| match parse_amount(value) {
        Some(amount) if amount > 0.0 => Ok(()),
        _ => Err(FieldErrorKind::InvalidAmount),
    }
}

/// Validator: field must hold a date that is not before `today`
///
/// Dates are compared at day granularity, so `today` itself is accepted.
pub fn not_before(
    today: NaiveDate,
) -> impl Fn(&str) -> Result<(), FieldErrorKind> + Send + Sync + Clone {
    move |value: &str| {
        if value.trim().is_empty() {
            return Err(FieldErrorKind::Required);
        }
        match parse_date(value) {
            None => Err(FieldErrorKind::InvalidDate),
            Some(date) if date < today => Err(FieldErrorKind::PastDate),
            Some(_) => Ok(()),
        }
    }
}

/// Validator: field must be one of the five quote statuses
pub fn known_status() -> impl Fn(&str) -> Result<(), FieldErrorKind> + Send + Sync + Clone {
    |value: &str| {
        if QuoteStatus::from(value).is_known() {
            Ok(())
        } else {
            Err(FieldErrorKind::InvalidStatus)
        }
    }
}

/// Parse a decimal amount, rejecting non-finite values
pub fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Parse a date input (`YYYY-MM-DD`), also accepting a full RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
