//! Reservation route handlers
//!
//! Mounted under `/api/v1/reservations`:
//! - Creation and cancellation
//! - Status transitions
//! - Availability and per-product / per-user listings

pub mod availability;
pub mod create;
pub mod queries;
pub mod status;

use std::sync::Arc;

use cc_core::repositories::{ProductRepository, ReservationRepository};
use cc_core::services::ReservationService;

/// Application state that holds shared services
pub struct AppState<R, P>
where
    R: ReservationRepository,
    P: ProductRepository,
{
    pub reservation_service: Arc<ReservationService<R, P>>,
}

impl<R, P> AppState<R, P>
where
    R: ReservationRepository,
    P: ProductRepository,
{
    pub fn new(reservation_service: Arc<ReservationService<R, P>>) -> Self {
        Self { reservation_service }
    }
}
