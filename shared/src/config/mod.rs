//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT verification configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `reservation` - Reservation booking policy
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod reservation;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use reservation::ReservationPolicy;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Reservation booking policy
    #[serde(default)]
    pub reservation: ReservationPolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            reservation: ReservationPolicy::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::new("mysql://localhost:3306/clavecompas_dev"),
            auth: AuthConfig::default(),
            reservation: ReservationPolicy::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/clavecompas")
                .with_max_connections(50),
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
            },
            reservation: ReservationPolicy::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Every section falls back to its defaults when the corresponding
    /// variables are absent.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            reservation: ReservationPolicy::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_profile() {
        let config = AppConfig::development();
        assert!(config.environment.is_development());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_production_profile() {
        let config = AppConfig::production();
        assert!(config.is_production());
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_serde_round_trip_keeps_policy() {
        let config = AppConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["reservation"]["max_quantity_per_reservation"], u32::MAX);

        let parsed: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.reservation, config.reservation);
    }
}
