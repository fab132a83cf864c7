//! Shared utilities and common types for the ClaveCompás server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and error codes
//! - API response envelopes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, JwtConfig, AuthConfig, ReservationPolicy,
    ServerConfig, LoggingConfig
};
pub use errors::{ErrorResponse, error_codes};
pub use types::ApiResponse;
