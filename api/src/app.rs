//! Application factory
//!
//! Wires middleware, extractor error handlers and the reservation routes
//! around an already-built [`AppState`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpResponse,
};

use cc_core::repositories::{ProductRepository, ReservationRepository};
use cc_shared::{error_codes, Environment, ErrorResponse, JwtConfig};

use crate::handlers::error::ApiError;
use crate::middleware::{auth::JwtAuth, cors::create_cors, security::SecurityMiddleware};
use crate::routes::reservations::{
    availability::check_availability,
    create::create_reservation,
    queries::{
        completed_reservations, product_reservations, reservations_by_status, user_reservations,
    },
    status::{cancel_reservation, update_status},
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<R, P>(
    app_state: web::Data<AppState<R, P>>,
    jwt: &JwtConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    let auth = JwtAuth::new(jwt);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|error, _| {
            ApiError::BadRequest(format!("Invalid request body: {}", error)).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|error, _| {
            ApiError::BadRequest(format!("Invalid query string: {}", error)).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|error, _| {
            ApiError::BadRequest(format!("Invalid path parameter: {}", error)).into()
        }))
        // Registration order is reversed at runtime: security runs first
        .wrap(Logger::default())
        .wrap(create_cors(environment))
        .wrap(SecurityMiddleware::for_environment(environment))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/reservations")
                .service(
                    web::resource(["", "/"])
                        .route(web::post().to(create_reservation::<R, P>).wrap(auth.clone())),
                )
                .route("/availability", web::get().to(check_availability::<R, P>))
                .route(
                    "/product/{product_id}",
                    web::get().to(product_reservations::<R, P>),
                )
                .route(
                    "/user",
                    web::get().to(user_reservations::<R, P>).wrap(auth.clone()),
                )
                .route(
                    "/user/completed",
                    web::get()
                        .to(completed_reservations::<R, P>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/by-status/{status}",
                    web::get()
                        .to(reservations_by_status::<R, P>)
                        .wrap(auth.clone()),
                )
                .route(
                    "/{id}/status",
                    web::put().to(update_status::<R, P>).wrap(auth.clone()),
                )
                .route(
                    "/{id}/cancel",
                    web::put().to(cancel_reservation::<R, P>).wrap(auth),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "clavecompas-reservations",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
