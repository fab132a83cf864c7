use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cc_core::domain::value_objects::{Availability, ReservationPeriod};
use cc_core::errors::ValidationError;

/// Body of `POST /api/v1/reservations`
///
/// The owner is always the authenticated caller; a `user_id` in the body
/// is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub product_id: Uuid,

    /// First reserved day, `YYYY-MM-DD`
    pub start_date: NaiveDate,

    /// Last reserved day, inclusive
    pub end_date: NaiveDate,

    #[validate(range(min = 1))]
    pub quantity: u32,
}

impl CreateReservationRequest {
    pub fn period(&self) -> Result<ReservationPeriod, ValidationError> {
        ReservationPeriod::new(self.start_date, self.end_date)
    }
}

/// Query of `GET /api/v1/reservations/availability`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityQuery {
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl AvailabilityQuery {
    pub fn period(&self) -> Result<ReservationPeriod, ValidationError> {
        ReservationPeriod::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub availability: Availability,
}

impl AvailabilityResponse {
    pub fn new(product_id: Uuid, period: &ReservationPeriod, availability: Availability) -> Self {
        Self {
            product_id,
            start_date: period.start_date(),
            end_date: period.end_date(),
            availability,
        }
    }
}

/// Query of `PUT /api/v1/reservations/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusQuery {
    /// Target status, case-insensitive
    pub status: String,
}

/// Query of `GET /api/v1/reservations/user/completed`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletedQuery {
    pub product_id: Option<Uuid>,
}
