//! Read-only reservation listings

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cc_core::domain::entities::ReservationStatus;
use cc_core::repositories::{ProductRepository, ReservationRepository};
use cc_shared::ApiResponse;

use crate::dto::CompletedQuery;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/reservations/product/{product_id}
///
/// Public. Active (`PENDING` and `CONFIRMED`) reservations of a product,
/// ordered by start date, for rendering availability calendars.
pub async fn product_reservations<R, P>(
    state: web::Data<AppState<R, P>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    match state
        .reservation_service
        .reservations_by_product(path.into_inner())
        .await
    {
        Ok(reservations) => HttpResponse::Ok().json(ApiResponse::success(reservations)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/reservations/user
///
/// The caller's reservations with product name and image, newest first.
pub async fn user_reservations<R, P>(
    state: web::Data<AppState<R, P>>,
    auth: AuthContext,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    match state
        .reservation_service
        .reservations_by_user(auth.user_id)
        .await
    {
        Ok(details) => HttpResponse::Ok().json(ApiResponse::success(details)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/reservations/user/completed
///
/// The caller's completed reservations, optionally for one `product_id`.
/// The storefront uses it to decide whether a user may review a product.
pub async fn completed_reservations<R, P>(
    state: web::Data<AppState<R, P>>,
    auth: AuthContext,
    query: web::Query<CompletedQuery>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    match state
        .reservation_service
        .completed_reservations(auth.user_id, query.product_id)
        .await
    {
        Ok(details) => HttpResponse::Ok().json(ApiResponse::success(details)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/reservations/by-status/{status}
///
/// The caller's reservations in one status. The status is matched
/// case-insensitively; an unknown value is a 400.
pub async fn reservations_by_status<R, P>(
    state: web::Data<AppState<R, P>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    let status: ReservationStatus = match path.parse() {
        Ok(status) => status,
        Err(error) => return handle_domain_error(&cc_core::errors::DomainError::from(error)),
    };

    match state
        .reservation_service
        .reservations_by_user_and_status(auth.user_id, status)
        .await
    {
        Ok(details) => HttpResponse::Ok().json(ApiResponse::success(details)),
        Err(error) => handle_domain_error(&error),
    }
}
