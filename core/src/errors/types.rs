//! Validation and token error types
//!
//! These errors carry only what the presentation layer needs to build a
//! response; wording shown to end users is decided there.

use chrono::NaiveDate;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

/// Validation errors
///
/// Raised for malformed input before any rule touches storage.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Start date {start} is in the past")]
    StartDateInPast { start: NaiveDate },

    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("Invalid reservation status: {value}")]
    InvalidStatus { value: String },
}

impl ValidationError {
    /// Field the error refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::OutOfRange { field, .. } => Some(field),
            ValidationError::InvalidDateRange { .. } => Some("end_date"),
            ValidationError::StartDateInPast { .. } => Some("start_date"),
            ValidationError::NonPositiveQuantity => Some("quantity"),
            ValidationError::InvalidStatus { .. } => Some("status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_message() {
        let error = ValidationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Start date 2025-01-20 is after end date 2025-01-10"
        );
        assert_eq!(error.field(), Some("end_date"));
    }

    #[test]
    fn test_out_of_range_field() {
        let error = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(error.field(), Some("quantity"));
        assert!(error.to_string().contains("max: 100"));
    }
}
