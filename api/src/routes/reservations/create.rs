use actix_web::{web, HttpResponse, ResponseError};
use validator::Validate;

use cc_core::repositories::{ProductRepository, ReservationRepository};
use cc_shared::ApiResponse;

use crate::dto::CreateReservationRequest;
use crate::handlers::error::{handle_domain_error, ApiError};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/reservations
///
/// Creates a `PENDING` reservation owned by the authenticated user.
///
/// # Request Body
///
/// ```json
/// {
///     "product_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
///     "start_date": "2030-01-10",
///     "end_date": "2030-01-15",
///     "quantity": 2
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The stored reservation wrapped in `ApiResponse`.
///
/// ## Errors
/// - 400 Bad Request: Invalid body, dates or quantity
/// - 401 Unauthorized: Missing or invalid access token
/// - 404 Not Found: Unknown product
/// - 409 Conflict: Not enough capacity for the dates
pub async fn create_reservation<R, P>(
    state: web::Data<AppState<R, P>>,
    auth: AuthContext,
    request: web::Json<CreateReservationRequest>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return ApiError::from(errors).error_response();
    }

    let period = match request.period() {
        Ok(period) => period,
        Err(error) => return handle_domain_error(&error.into()),
    };

    match state
        .reservation_service
        .create_reservation(request.product_id, auth.user_id, period, request.quantity)
        .await
    {
        Ok(reservation) => {
            log::info!(
                "Reservation {} created by user {} for product {}",
                reservation.id,
                auth.user_id,
                reservation.product_id
            );
            HttpResponse::Created().json(ApiResponse::success(reservation))
        }
        Err(error) => handle_domain_error(&error),
    }
}
