//! Reservation repository trait defining the interface for reservation persistence.
//!
//! Reservations are never deleted: cancellation is a status. The only write
//! paths are `create_if_available` and `update_status`, and both are
//! guarded so concurrent requests cannot break the capacity invariant or
//! apply two transitions from the same status.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::reservation::{Reservation, ReservationStatus};
use crate::domain::value_objects::{Availability, ReservationPeriod};
use crate::errors::DomainError;

/// Result of an atomic check-and-insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationWrite {
    /// The reservation fit and was stored
    Created(Reservation),
    /// Not enough capacity; nothing was written
    Rejected(Availability),
}

/// Repository trait for Reservation persistence operations
///
/// Implementations decide capacity with [`Availability::evaluate`] so every
/// backend applies the same accounting rule as the service layer.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store `reservation` if its product still has capacity for it
    ///
    /// The availability check and the insert must behave as one atomic unit
    /// with respect to other calls for the same product: two concurrent
    /// calls whose combined quantity exceeds `capacity` must not both
    /// return `Created`.
    ///
    /// # Arguments
    /// * `reservation` - New reservation, normally in `PENDING`
    /// * `capacity` - Capacity of `reservation.product_id`
    ///
    /// # Returns
    /// * `Ok(ReservationWrite::Created(_))` - Stored
    /// * `Ok(ReservationWrite::Rejected(_))` - Insufficient capacity, no write
    /// * `Err(DomainError)` - Storage failure
    async fn create_if_available(
        &self,
        reservation: Reservation,
        capacity: u32,
    ) -> Result<ReservationWrite, DomainError>;

    /// Find a reservation by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Reservation))` - Reservation found
    /// * `Ok(None)` - No reservation with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, DomainError>;

    /// Blocking reservations of a product overlapping `period`
    ///
    /// # Arguments
    /// * `product_id` - Product to scan
    /// * `period` - Candidate period; touching boundaries count as overlap
    async fn find_blocking_overlapping(
        &self,
        product_id: Uuid,
        period: &ReservationPeriod,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// All blocking reservations of a product, ordered by start date
    async fn find_active_by_product(&self, product_id: Uuid) -> Result<Vec<Reservation>, DomainError>;

    /// Set the status of a reservation if it is still `expected`
    ///
    /// # Arguments
    /// * `id` - Reservation to update
    /// * `expected` - Status the caller validated the transition from
    /// * `new_status` - Status to store
    ///
    /// # Returns
    /// * `Ok(Some(Reservation))` - Updated record
    /// * `Ok(None)` - Reservation missing or no longer in `expected`
    /// * `Err(DomainError)` - Database error occurred
    async fn update_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
        new_status: ReservationStatus,
    ) -> Result<Option<Reservation>, DomainError>;

    /// All reservations of a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, DomainError>;

    /// Reservations of a user in one status, newest first
    async fn find_by_user_and_status(
        &self,
        user_id: Uuid,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, DomainError>;
}
