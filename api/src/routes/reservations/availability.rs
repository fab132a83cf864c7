use actix_web::{web, HttpResponse, ResponseError};
use validator::Validate;

use cc_core::repositories::{ProductRepository, ReservationRepository};
use cc_shared::ApiResponse;

use crate::dto::{AvailabilityQuery, AvailabilityResponse};
use crate::handlers::error::{handle_domain_error, ApiError};

use super::AppState;

/// Handler for GET /api/v1/reservations/availability
///
/// Public. Reports whether `quantity` units of a product are free for
/// every day of `[start_date, end_date]`, with the capacity breakdown.
///
/// # Query
/// `product_id`, `start_date`, `end_date`, optional `quantity` (default 1)
///
/// ## Errors
/// - 400 Bad Request: Malformed query or inverted dates
/// - 404 Not Found: Unknown product
pub async fn check_availability<R, P>(
    state: web::Data<AppState<R, P>>,
    query: web::Query<AvailabilityQuery>,
) -> HttpResponse
where
    R: ReservationRepository + 'static,
    P: ProductRepository + 'static,
{
    if let Err(errors) = query.validate() {
        return ApiError::from(errors).error_response();
    }

    let period = match query.period() {
        Ok(period) => period,
        Err(error) => return handle_domain_error(&error.into()),
    };

    match state
        .reservation_service
        .availability(query.product_id, &period, query.quantity)
        .await
    {
        Ok(availability) => HttpResponse::Ok().json(ApiResponse::success(
            AvailabilityResponse::new(query.product_id, &period, availability),
        )),
        Err(error) => handle_domain_error(&error),
    }
}
