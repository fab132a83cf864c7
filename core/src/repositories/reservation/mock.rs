//! In-memory implementation of ReservationRepository
//!
//! Used by unit tests and by the API tests. A single write lock spans the
//! capacity check and the insert, which gives the same atomicity the MySQL
//! implementation gets from row locking.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::reservation::{Reservation, ReservationStatus};
use crate::domain::value_objects::{Availability, ReservationPeriod};
use crate::errors::DomainError;

use super::trait_::{ReservationRepository, ReservationWrite};

/// Mock reservation repository backed by a shared map
#[derive(Clone)]
pub struct MockReservationRepository {
    reservations: Arc<RwLock<HashMap<Uuid, Reservation>>>,
}

impl MockReservationRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            reservations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a reservation as-is, skipping the capacity check
    pub async fn seed(&self, reservation: Reservation) {
        let mut reservations = self.reservations.write().await;
        reservations.insert(reservation.id, reservation);
    }

    /// Number of stored reservations, any status
    pub async fn len(&self) -> usize {
        self.reservations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MockReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reservations
}

#[async_trait]
impl ReservationRepository for MockReservationRepository {
    async fn create_if_available(
        &self,
        reservation: Reservation,
        capacity: u32,
    ) -> Result<ReservationWrite, DomainError> {
        let mut reservations = self.reservations.write().await;

        let availability = Availability::evaluate(
            capacity,
            reservations
                .values()
                .filter(|r| r.product_id == reservation.product_id),
            &reservation.period,
            reservation.quantity,
        );
        if !availability.available {
            return Ok(ReservationWrite::Rejected(availability));
        }

        reservations.insert(reservation.id, reservation.clone());
        Ok(ReservationWrite::Created(reservation))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        Ok(reservations.get(&id).cloned())
    }

    async fn find_blocking_overlapping(
        &self,
        product_id: Uuid,
        period: &ReservationPeriod,
    ) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .values()
            .filter(|r| r.product_id == product_id && r.is_blocking() && r.overlaps(period))
            .cloned()
            .collect())
    }

    async fn find_active_by_product(&self, product_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        let mut active: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.product_id == product_id && r.is_blocking())
            .cloned()
            .collect();
        active.sort_by_key(|r| (r.period.start_date(), r.created_at));
        Ok(active)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
        new_status: ReservationStatus,
    ) -> Result<Option<Reservation>, DomainError> {
        let mut reservations = self.reservations.write().await;

        match reservations.get_mut(&id) {
            Some(reservation) if reservation.status == expected => {
                reservation.status = new_status;
                reservation.updated_at = chrono::Utc::now();
                Ok(Some(reservation.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        Ok(newest_first(
            reservations
                .values()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_user_and_status(
        &self,
        user_id: Uuid,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.read().await;
        Ok(newest_first(
            reservations
                .values()
                .filter(|r| r.user_id == user_id && r.status == status)
                .cloned()
                .collect(),
        ))
    }
}
