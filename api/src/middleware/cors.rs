//! CORS configuration for the storefront and back-office clients.
//!
//! Development allows any origin. Production only allows the origins
//! listed in `ALLOWED_ORIGINS` and the `WEB_DOMAIN` storefront.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use cc_shared::Environment;
use std::env;

/// Creates a CORS middleware instance configured for `environment`.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `WEB_DOMAIN`: Storefront domain, allowed over HTTPS with and without `www.`
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3600);

    if environment.is_production() {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS]
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age)
        .supports_credentials()
}

fn create_production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(max_age);

    for origin in configured_origins() {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(&origin);
    }

    cors
}

/// Origins allowed in production, from `ALLOWED_ORIGINS` and `WEB_DOMAIN`
fn configured_origins() -> Vec<String> {
    let mut origins: Vec<String> = env::var("ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if let Ok(web_domain) = env::var("WEB_DOMAIN") {
        origins.push(format!("https://{}", web_domain));
        origins.push(format!("https://www.{}", web_domain));
    }

    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_for_each_environment() {
        let _dev = create_cors(Environment::Development);
        let _prod = create_cors(Environment::Production);
    }
}
