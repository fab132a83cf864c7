//! Capacity accounting for a candidate reservation.
//!
//! Capacity is interval-additive: every blocking reservation that shares at
//! least one day with the candidate period counts with its full quantity,
//! whether or not those reservations overlap each other.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Reservation;
use crate::domain::value_objects::ReservationPeriod;

/// Outcome of checking a product's capacity for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Product capacity
    pub capacity: u32,
    /// Units held by overlapping blocking reservations
    pub reserved: u32,
    /// `capacity - reserved`, floored at zero
    pub remaining: u32,
    /// Units asked for
    pub requested: u32,
    /// Whether `requested` fits in `remaining`
    pub available: bool,
}

impl Availability {
    /// Evaluates `requested` units over `period` against `existing`
    ///
    /// `existing` may contain reservations of any status or period; only
    /// blocking ones overlapping `period` are counted. Callers pass the
    /// reservations of a single product.
    pub fn evaluate<'a, I>(
        capacity: u32,
        existing: I,
        period: &ReservationPeriod,
        requested: u32,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        let reserved: u64 = existing
            .into_iter()
            .filter(|r| r.is_blocking() && r.overlaps(period))
            .map(|r| u64::from(r.quantity))
            .sum();
        let reserved = u32::try_from(reserved).unwrap_or(u32::MAX);
        let remaining = capacity.saturating_sub(reserved);

        Self {
            capacity,
            reserved,
            remaining,
            requested,
            available: requested <= remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ReservationStatus;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn period(start: u32, end: u32) -> ReservationPeriod {
        ReservationPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, start).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, end).unwrap(),
        )
        .unwrap()
    }

    fn booking(start: u32, end: u32, quantity: u32, status: ReservationStatus) -> Reservation {
        Reservation::new(Uuid::new_v4(), Uuid::new_v4(), period(start, end), quantity)
            .with_status(status)
    }

    #[test]
    fn test_no_reservations_only_capacity_matters() {
        let none: Vec<Reservation> = Vec::new();
        assert!(Availability::evaluate(5, &none, &period(1, 3), 5).available);
        assert!(!Availability::evaluate(5, &none, &period(1, 3), 6).available);
    }

    #[test]
    fn test_overlap_exceeding_capacity() {
        let existing = vec![booking(10, 15, 3, ReservationStatus::Confirmed)];

        let overlapping = Availability::evaluate(5, &existing, &period(14, 20), 3);
        assert!(!overlapping.available);
        assert_eq!(overlapping.reserved, 3);
        assert_eq!(overlapping.remaining, 2);

        let disjoint = Availability::evaluate(5, &existing, &period(16, 20), 3);
        assert!(disjoint.available);
        assert_eq!(disjoint.reserved, 0);
    }

    #[test]
    fn test_touching_boundary_counts() {
        let existing = vec![booking(10, 15, 4, ReservationStatus::Pending)];
        let result = Availability::evaluate(5, &existing, &period(15, 18), 2);
        assert!(!result.available);
    }

    #[test]
    fn test_non_blocking_statuses_are_ignored() {
        let existing = vec![
            booking(10, 15, 5, ReservationStatus::Cancelled),
            booking(10, 15, 5, ReservationStatus::Completed),
        ];
        let result = Availability::evaluate(5, &existing, &period(10, 15), 5);
        assert!(result.available);
        assert_eq!(result.reserved, 0);
    }

    #[test]
    fn test_interval_additive_accounting() {
        // The two bookings never overlap each other, but both touch the
        // candidate range, so both count.
        let existing = vec![
            booking(1, 5, 3, ReservationStatus::Confirmed),
            booking(20, 25, 3, ReservationStatus::Confirmed),
        ];
        let result = Availability::evaluate(6, &existing, &period(4, 21), 1);
        assert_eq!(result.reserved, 6);
        assert!(!result.available);
    }

    #[test]
    fn test_overbooked_product_floors_remaining() {
        let existing = vec![booking(1, 5, 9, ReservationStatus::Confirmed)];
        let result = Availability::evaluate(5, &existing, &period(1, 5), 1);
        assert_eq!(result.remaining, 0);
        assert!(!result.available);
    }
}
