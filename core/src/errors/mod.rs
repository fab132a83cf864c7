//! Domain-specific error types and error handling.

mod types;

pub use types::{TokenError, ValidationError};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::reservation::ReservationStatus;

/// Core domain errors
///
/// Every variant is a business-rule rejection surfaced to the caller as-is;
/// none of them is worth retrying.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Reservation belongs to another user")]
    Forbidden,

    #[error("Cannot change reservation status from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Product {product_id} cannot supply {requested} units for the requested dates ({remaining} remaining)")]
    Unavailable {
        product_id: Uuid,
        requested: u32,
        remaining: u32,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a missing reservation
    pub fn reservation_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            resource: format!("Reservation {}", id),
        }
    }

    /// Shorthand for a missing product
    pub fn product_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            resource: format!("Product {}", id),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
