//! Authentication configuration
//!
//! Tokens are issued by the identity service; this backend only verifies them.

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT verification configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to verify HS256 signatures
    pub secret: String,

    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim, if the issuer sets one
    #[serde(default)]
    pub audience: Option<String>,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Clock skew tolerated when checking `exp`/`nbf`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: String::from("clavecompas"),
            audience: None,
            algorithm: default_algorithm(),
            leeway_seconds: default_leeway(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the expected issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);
        let audience = std::env::var("JWT_AUDIENCE").ok();
        let leeway_seconds = std::env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.leeway_seconds);

        Self {
            jwt: JwtConfig {
                secret,
                issuer,
                audience,
                algorithm: default_algorithm(),
                leeway_seconds,
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_leeway() -> u64 {
    30
}
