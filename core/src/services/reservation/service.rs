//! Reservation service implementation
//!
//! Owns every business rule around reservations: capacity checks, the
//! single creation path and status transitions. The acting user is always
//! passed in explicitly by the caller.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use cc_shared::ReservationPolicy;

use crate::domain::entities::{Product, Reservation, ReservationStatus};
use crate::domain::value_objects::{Availability, ReservationDetails, ReservationPeriod};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{ProductRepository, ReservationRepository, ReservationWrite};

/// Reservation service
pub struct ReservationService<R, P>
where
    R: ReservationRepository,
    P: ProductRepository,
{
    /// Reservation storage
    reservation_repository: Arc<R>,
    /// Product catalog, read-only
    product_repository: Arc<P>,
    /// Limits applied on creation
    policy: ReservationPolicy,
}

impl<R, P> ReservationService<R, P>
where
    R: ReservationRepository,
    P: ProductRepository,
{
    /// Create a new reservation service
    ///
    /// # Arguments
    ///
    /// * `reservation_repository` - Storage for reservations
    /// * `product_repository` - Catalog used for capacity and display fields
    /// * `policy` - Booking limits checked by `create_reservation`
    pub fn new(
        reservation_repository: Arc<R>,
        product_repository: Arc<P>,
        policy: ReservationPolicy,
    ) -> Self {
        Self {
            reservation_repository,
            product_repository,
            policy,
        }
    }

    pub fn policy(&self) -> &ReservationPolicy {
        &self.policy
    }

    /// Capacity breakdown for `quantity` units of a product over `period`
    ///
    /// # Returns
    ///
    /// * `Ok(Availability)` - Breakdown; `available` tells whether it fits
    /// * `Err(DomainError::Validation)` - `quantity` is zero
    /// * `Err(DomainError::NotFound)` - Unknown product
    pub async fn availability(
        &self,
        product_id: Uuid,
        period: &ReservationPeriod,
        quantity: u32,
    ) -> DomainResult<Availability> {
        if quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity.into());
        }

        let product = self.load_product(product_id).await?;
        let overlapping = self
            .reservation_repository
            .find_blocking_overlapping(product_id, period)
            .await?;

        let availability =
            Availability::evaluate(product.capacity, overlapping.iter(), period, quantity);

        tracing::debug!(
            product_id = %product_id,
            period = %period,
            requested = quantity,
            reserved = availability.reserved,
            available = availability.available,
            "Checked product availability"
        );

        Ok(availability)
    }

    /// Whether a product can supply `quantity` units over `period`
    pub async fn is_available(
        &self,
        product_id: Uuid,
        period: &ReservationPeriod,
        quantity: u32,
    ) -> DomainResult<bool> {
        Ok(self.availability(product_id, period, quantity).await?.available)
    }

    /// Create a `PENDING` reservation for `user_id`
    ///
    /// This method:
    /// 1. Validates quantity and the booking policy
    /// 2. Loads the product to learn its capacity
    /// 3. Hands the reservation to the repository, which checks capacity
    ///    and inserts as a single atomic step
    ///
    /// # Returns
    ///
    /// * `Ok(Reservation)` - The stored reservation
    /// * `Err(DomainError::Unavailable)` - Not enough capacity; nothing stored
    /// * `Err(DomainError::NotFound)` - Unknown product
    /// * `Err(DomainError::Validation)` - Bad quantity or policy violation
    pub async fn create_reservation(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        period: ReservationPeriod,
        quantity: u32,
    ) -> DomainResult<Reservation> {
        self.validate_request(&period, quantity)?;

        let product = self.load_product(product_id).await?;
        let reservation = Reservation::new(product_id, user_id, period, quantity);

        match self
            .reservation_repository
            .create_if_available(reservation, product.capacity)
            .await?
        {
            ReservationWrite::Created(reservation) => {
                tracing::info!(
                    reservation_id = %reservation.id,
                    product_id = %product_id,
                    user_id = %user_id,
                    period = %period,
                    quantity = quantity,
                    event = "reservation_created",
                    "Reservation created"
                );
                Ok(reservation)
            }
            ReservationWrite::Rejected(availability) => {
                tracing::info!(
                    product_id = %product_id,
                    user_id = %user_id,
                    period = %period,
                    requested = quantity,
                    remaining = availability.remaining,
                    event = "reservation_rejected",
                    "Reservation rejected for lack of capacity"
                );
                Err(DomainError::Unavailable {
                    product_id,
                    requested: quantity,
                    remaining: availability.remaining,
                })
            }
        }
    }

    /// Move a reservation to `new_status` on behalf of `acting_user`
    ///
    /// Checks run in order: existence, ownership, then the transition
    /// table. The write only applies if the status is still the one that
    /// was validated; a concurrent change makes this call fail with
    /// `InvalidTransition` from the status actually stored.
    pub async fn update_status(
        &self,
        reservation_id: Uuid,
        new_status: ReservationStatus,
        acting_user: Uuid,
    ) -> DomainResult<Reservation> {
        let reservation = self.load_reservation(reservation_id).await?;

        if !reservation.is_owned_by(acting_user) {
            tracing::warn!(
                reservation_id = %reservation_id,
                acting_user = %acting_user,
                event = "reservation_forbidden",
                "User attempted to change another user's reservation"
            );
            return Err(DomainError::Forbidden);
        }

        let current = reservation.status;
        current.check_transition(new_status)?;

        match self
            .reservation_repository
            .update_status(reservation_id, current, new_status)
            .await?
        {
            Some(updated) => {
                tracing::info!(
                    reservation_id = %reservation_id,
                    from = %current,
                    to = %new_status,
                    event = "reservation_status_changed",
                    "Reservation status changed"
                );
                Ok(updated)
            }
            None => {
                // Lost a race; report against whatever is stored now
                let actual = self.load_reservation(reservation_id).await?;
                tracing::warn!(
                    reservation_id = %reservation_id,
                    expected = %current,
                    actual = %actual.status,
                    "Reservation status changed concurrently"
                );
                Err(DomainError::InvalidTransition {
                    from: actual.status,
                    to: new_status,
                })
            }
        }
    }

    /// Cancel a reservation on behalf of `acting_user`
    pub async fn cancel_reservation(
        &self,
        reservation_id: Uuid,
        acting_user: Uuid,
    ) -> DomainResult<Reservation> {
        self.update_status(reservation_id, ReservationStatus::Cancelled, acting_user)
            .await
    }

    /// Active reservations of a product, ordered by start date
    pub async fn reservations_by_product(&self, product_id: Uuid) -> DomainResult<Vec<Reservation>> {
        self.load_product(product_id).await?;
        self.reservation_repository
            .find_active_by_product(product_id)
            .await
    }

    /// Every reservation of a user with product details, newest first
    pub async fn reservations_by_user(&self, user_id: Uuid) -> DomainResult<Vec<ReservationDetails>> {
        let reservations = self.reservation_repository.find_by_user(user_id).await?;
        self.with_details(reservations).await
    }

    /// A user's reservations in one status, with product details
    pub async fn reservations_by_user_and_status(
        &self,
        user_id: Uuid,
        status: ReservationStatus,
    ) -> DomainResult<Vec<ReservationDetails>> {
        let reservations = self
            .reservation_repository
            .find_by_user_and_status(user_id, status)
            .await?;
        self.with_details(reservations).await
    }

    /// A user's completed reservations, optionally for one product
    pub async fn completed_reservations(
        &self,
        user_id: Uuid,
        product_id: Option<Uuid>,
    ) -> DomainResult<Vec<ReservationDetails>> {
        let reservations = self
            .reservation_repository
            .find_by_user_and_status(user_id, ReservationStatus::Completed)
            .await?
            .into_iter()
            .filter(|r| product_id.map_or(true, |id| r.product_id == id))
            .collect();
        self.with_details(reservations).await
    }

    fn validate_request(&self, period: &ReservationPeriod, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity.into());
        }

        if quantity > self.policy.max_quantity_per_reservation {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: "1".to_string(),
                max: self.policy.max_quantity_per_reservation.to_string(),
            }
            .into());
        }

        if period.days() > i64::from(self.policy.max_reservation_days) {
            return Err(ValidationError::OutOfRange {
                field: "end_date".to_string(),
                min: "1 day".to_string(),
                max: format!("{} days", self.policy.max_reservation_days),
            }
            .into());
        }

        if self.policy.reject_past_start_dates && period.start_date() < Utc::now().date_naive() {
            return Err(ValidationError::StartDateInPast {
                start: period.start_date(),
            }
            .into());
        }

        Ok(())
    }

    async fn load_product(&self, product_id: Uuid) -> DomainResult<Product> {
        self.product_repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(product_id))
    }

    async fn load_reservation(&self, reservation_id: Uuid) -> DomainResult<Reservation> {
        self.reservation_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::reservation_not_found(reservation_id))
    }

    async fn with_details(
        &self,
        reservations: Vec<Reservation>,
    ) -> DomainResult<Vec<ReservationDetails>> {
        let mut product_ids: Vec<Uuid> = reservations.iter().map(|r| r.product_id).collect();
        product_ids.sort();
        product_ids.dedup();

        let products: HashMap<Uuid, Product> = self
            .product_repository
            .find_by_ids(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(reservations
            .into_iter()
            .map(|r| {
                let product = products.get(&r.product_id);
                ReservationDetails::new(r, product)
            })
            .collect())
    }
}
