//! Conversion of domain and request errors into HTTP responses
//!
//! Every error body is a shared `ErrorResponse` with a stable snake_case
//! code from `cc_shared::error_codes`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cc_core::errors::{DomainError, TokenError, ValidationError};
use cc_shared::{error_codes, ErrorResponse};

/// Errors raised by the HTTP layer itself
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A rule in the domain rejected the request
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No usable credentials on the request
    #[error("{0}")]
    Unauthorized(String),

    /// Body, query or path could not be parsed
    #[error("{0}")]
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ApiError::BadRequest(format!("Invalid fields: {}", fields.join(", ")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_status(error),
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(error) => handle_domain_error(error),
            ApiError::Unauthorized(message) => HttpResponse::Unauthorized()
                .json(ErrorResponse::new(error_codes::UNAUTHORIZED, message.clone())),
            ApiError::BadRequest(message) => HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, message.clone())),
        }
    }
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::InvalidTransition { .. } | DomainError::Unavailable { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = domain_status(error);

    let body = match error {
        DomainError::NotFound { .. } => ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        DomainError::Forbidden => ErrorResponse::new(
            error_codes::FORBIDDEN,
            "You can only modify your own reservations",
        ),
        DomainError::InvalidTransition { from, to } => {
            ErrorResponse::new(error_codes::INVALID_TRANSITION, error.to_string())
                .add_detail("from", from)
                .add_detail("to", to)
        }
        DomainError::Unavailable {
            product_id,
            requested,
            remaining,
        } => ErrorResponse::new(error_codes::UNAVAILABLE, error.to_string())
            .add_detail("product_id", product_id)
            .add_detail("requested", requested)
            .add_detail("remaining", remaining),
        DomainError::Validation(validation) => {
            let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, validation.to_string());
            match validation.field() {
                Some(field) => body.add_detail("field", field),
                None => body,
            }
        }
        DomainError::Token(TokenError::TokenExpired) => {
            ErrorResponse::new(error_codes::TOKEN_EXPIRED, error.to_string())
        }
        DomainError::Token(_) => ErrorResponse::new(error_codes::TOKEN_INVALID, error.to_string()),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
    };

    if status.is_client_error() {
        log::debug!("Request rejected with {}: {}", status, error);
    }

    HttpResponse::build(status).json(body)
}
