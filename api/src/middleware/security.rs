//! Security middleware for enforcing HTTPS and adding response headers.
//!
//! Production requests must arrive over HTTPS, directly or through a
//! trusted proxy setting `X-Forwarded-Proto`. Responses get HSTS and the
//! usual hardening headers.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error,
};
use cc_shared::{error_codes, Environment, ErrorResponse};
use futures_util::future::LocalBoxFuture;
use std::{
    env,
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

/// Security middleware factory
#[derive(Clone)]
pub struct SecurityMiddleware {
    /// Whether to reject plain HTTP requests
    enforce_https: bool,
    /// Whether to add security headers
    add_security_headers: bool,
    /// Peers allowed to set `X-Forwarded-Proto`
    trusted_proxies: Rc<Vec<String>>,
}

impl SecurityMiddleware {
    /// Settings for `environment`; proxies come from `TRUSTED_PROXIES`
    pub fn for_environment(environment: Environment) -> Self {
        let production = environment.is_production();

        let trusted_proxies: Vec<String> = env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        log::info!(
            "Security middleware configured: enforce_https={}, trusted_proxies={:?}",
            production,
            trusted_proxies
        );

        Self {
            enforce_https: production,
            add_security_headers: production,
            trusted_proxies: Rc::new(trusted_proxies),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::clone(&self.trusted_proxies),
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Err(actix_web::error::InternalError::from_response(
                    "HTTPS required",
                    actix_web::HttpResponse::Forbidden()
                        .json(ErrorResponse::new(error_codes::FORBIDDEN, "HTTPS required")),
                )
                .into());
            }

            let mut response = service.call(req).await?;

            if add_security_headers {
                add_security_response_headers(&mut response);
            }

            Ok(response)
        })
    }
}

/// Checks if the request is secure (HTTPS or from trusted source)
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    if let Some(forwarded_proto) = req.headers().get("x-forwarded-proto") {
        if let Ok(proto) = forwarded_proto.to_str() {
            let peer_addr = conn_info.peer_addr().unwrap_or("");
            if is_trusted_proxy(peer_addr, trusted_proxies) && proto == "https" {
                return true;
            }
        }
    }

    false
}

/// Checks if the given peer address is in the trusted proxy list
fn is_trusted_proxy(peer_addr: &str, trusted_proxies: &[String]) -> bool {
    // Peer address may carry a port
    let ip = peer_addr.split(':').next().unwrap_or(peer_addr);

    trusted_proxies
        .iter()
        .any(|trusted| trusted == ip || trusted == peer_addr)
}

/// Adds security headers to the response
fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none';"),
    );
}
