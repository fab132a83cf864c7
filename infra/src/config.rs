//! Configuration loading for the server
//!
//! Values are layered, later sources winning:
//! 1. Environment-variable defaults (`AppConfig::from_env`)
//! 2. An optional TOML file named after the environment
//!    (`config.development.toml`, ...) in the config directory
//! 3. `CLAVECOMPAS__<SECTION>__<KEY>` environment overrides

use std::path::Path;

use cc_shared::{AppConfig, Environment};
use ::config::{Config, ConfigError, File};

use crate::InfrastructureError;

/// Prefix for nested environment overrides
pub const ENV_PREFIX: &str = "CLAVECOMPAS";

/// Directory searched for configuration files when `CONFIG_DIR` is unset
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Load configuration for the current environment
///
/// Reads a `.env` file first when one is present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    load_config_from(Path::new(&dir))
}

/// Load configuration, looking for the environment file in `dir`
pub fn load_config_from(dir: &Path) -> Result<AppConfig, InfrastructureError> {
    let defaults = AppConfig::from_env();
    let environment = defaults.environment;
    let file = dir.join(environment.config_file());

    tracing::debug!(
        environment = %environment,
        file = %file.display(),
        "Loading configuration"
    );

    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults).map_err(config_error)?)
        .add_source(File::from(file).required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(config_error)?
        .try_deserialize()
        .map_err(config_error)?;

    validate(&config)?;

    tracing::info!(
        environment = %config.environment,
        bind_address = %config.server.bind_address(),
        "Configuration loaded"
    );

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.environment == Environment::Production && config.auth.jwt.is_using_default_secret() {
        return Err(InfrastructureError::Config(
            "JWT_SECRET must be set in production".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(InfrastructureError::Config(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn config_error(err: ConfigError) -> InfrastructureError {
    InfrastructureError::Config(err.to_string())
}
