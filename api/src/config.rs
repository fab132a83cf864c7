use cc_infra::InfrastructureError;
use cc_shared::{AppConfig, Environment, JwtConfig, ReservationPolicy};

/// Configuration of the API binary
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
}

impl Config {
    /// Load the layered configuration (env defaults, optional file, overrides)
    pub fn load() -> Result<Self, InfrastructureError> {
        Ok(Self {
            app: cc_infra::config::load_config()?,
        })
    }

    pub fn environment(&self) -> Environment {
        self.app.environment
    }

    pub fn is_production(&self) -> bool {
        self.app.is_production()
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.app.auth.jwt
    }

    pub fn policy(&self) -> ReservationPolicy {
        self.app.reservation.clone()
    }

    pub fn bind_address(&self) -> String {
        self.app.server.bind_address()
    }

    pub fn workers(&self) -> usize {
        self.app.server.workers
    }

    /// Filter directive for `env_logger`
    pub fn log_filter(&self) -> String {
        self.app.logging.filter_directive()
    }
}

impl From<AppConfig> for Config {
    fn from(app: AppConfig) -> Self {
        Self { app }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_follow_app_config() {
        let config = Config::from(AppConfig::development());
        assert!(!config.is_production());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.log_filter(), "debug,actix_web=info");
        assert_eq!(config.policy(), ReservationPolicy::default());
    }
}
