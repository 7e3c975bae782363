//! Field-level predicates shared by every entity.
//!
//! The `is_*` functions are pure format checks; the `check_*`/`require_*`
//! helpers wrap them into `ModelError::Validation` with the field name in the message.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ModelError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// 48 9696 5858 | (48) 99696-5858 | +55 48 96965858
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+55\s?)?((\(\d{2}\)|\d{2})\s?)?\d{4,5}[\s-]?\d{4}$").expect("phone regex")
});

// 12.345.678/0001-90 with optional punctuation
static CNPJ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2}$").expect("cnpj regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

pub fn is_valid_cnpj(value: &str) -> bool {
    CNPJ_RE.is_match(value.trim())
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(format!("{field} is required")));
    }
    Ok(())
}

pub fn check_email(field: &str, value: &str) -> Result<(), ModelError> {
    require_non_empty(field, value)?;
    if !is_valid_email(value) {
        return Err(ModelError::invalid(format!("{field} is not a valid email")));
    }
    Ok(())
}

/// Phone numbers are optional everywhere; only a present value is checked.
pub fn check_phone(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() && !is_valid_phone(v) => {
            Err(ModelError::invalid(format!("{field} is not a valid phone number")))
        }
        _ => Ok(()),
    }
}

pub fn check_cnpj(field: &str, value: &str) -> Result<(), ModelError> {
    require_non_empty(field, value)?;
    if !is_valid_cnpj(value) {
        return Err(ModelError::invalid(format!(
            "{field} must look like 12.345.678/0001-90"
        )));
    }
    Ok(())
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ModelError::invalid(format!("{field} must be a date in YYYY-MM-DD format")))
}

pub fn parse_datetime(field: &str, value: &str) -> Result<NaiveDateTime, ModelError> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).map_err(|_| {
        ModelError::invalid(format!("{field} must be a timestamp in YYYY-MM-DD HH:MM:SS format"))
    })
}

pub fn check_price(field: &str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::invalid(format!("{field} must be a non-negative amount")));
    }
    Ok(())
}

pub fn check_stock(field: &str, value: i64) -> Result<(), ModelError> {
    if value < 0 {
        return Err(ModelError::invalid(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Discounts are strictly positive and capped at 100%.
pub fn check_percentage(field: &str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value <= 0.0 || value > 100.0 {
        return Err(ModelError::invalid(format!("{field} must be greater than 0 and at most 100")));
    }
    Ok(())
}

/// Comparison form used by uniqueness keys.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn cnpj_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
