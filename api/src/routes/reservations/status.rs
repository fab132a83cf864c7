//! Status transitions on behalf of the reservation owner

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use cc_core::domain::entities::ReservationStatus;
use cc_core::errors::DomainError;
use cc_core::repositories::{ProductRepository, ReservationRepository};
use cc_shared::ApiResponse;

use crate::dto::StatusQuery;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for PUT /api/v1/reservations/{id}/status?status=CONFIRMED
///
/// ## Errors
/// - 400 Bad Request: Unknown status
/// - 403 Forbidden: Reservation belongs to another user
/// - 404 Not Found: Unknown reservation
/// - 409 Conflict: Transition not allowed from the current status
pub async fn update_status<R, P>(
    state: web::Data<AppState<R, P>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    query: web::Query<StatusQuery>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    let status: ReservationStatus = match query.status.parse() {
        Ok(status) => status,
        Err(error) => return handle_domain_error(&DomainError::from(error)),
    };

    let reservation_id = path.into_inner();
    match state
        .reservation_service
        .update_status(reservation_id, status, auth.user_id)
        .await
    {
        Ok(reservation) => HttpResponse::Ok().json(ApiResponse::success(reservation)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/reservations/{id}/cancel
///
/// Same rules as a transition to `CANCELLED`.
pub async fn cancel_reservation<R, P>(
    state: web::Data<AppState<R, P>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    let reservation_id = path.into_inner();
    match state
        .reservation_service
        .cancel_reservation(reservation_id, auth.user_id)
        .await
    {
        Ok(reservation) => {
            log::info!("Reservation {} cancelled by its owner", reservation_id);
            HttpResponse::Ok()
                .json(ApiResponse::success(reservation).with_message("Reservation cancelled"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
