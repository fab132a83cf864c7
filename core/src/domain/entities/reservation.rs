//! Reservation entity and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ReservationPeriod;
use crate::errors::{DomainError, ValidationError};

/// Lifecycle state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Requested, awaiting confirmation
    Pending,
    /// Accepted by the store
    Confirmed,
    /// Rental finished
    Completed,
    /// Withdrawn before completion
    Cancelled,
}

impl ReservationStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    /// Statuses that count against product capacity
    pub const BLOCKING: [ReservationStatus; 2] =
        [ReservationStatus::Pending, ReservationStatus::Confirmed];

    /// Statuses reachable in one step from `self`
    ///
    /// This is the whole state machine; nothing else decides legality.
    pub fn allowed_transitions(self) -> &'static [ReservationStatus] {
        match self {
            ReservationStatus::Pending => {
                &[ReservationStatus::Confirmed, ReservationStatus::Cancelled]
            }
            ReservationStatus::Confirmed => {
                &[ReservationStatus::Completed, ReservationStatus::Cancelled]
            }
            ReservationStatus::Completed | ReservationStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Fails with `InvalidTransition` unless `self -> next` is in the table
    pub fn check_transition(self, next: ReservationStatus) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Whether reservations in this status hold capacity
    pub fn is_blocking(self) -> bool {
        Self::BLOCKING.contains(&self)
    }

    /// Whether no transition leaves this status
    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(ReservationStatus::Pending),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "COMPLETED" => Ok(ReservationStatus::Completed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A hold on `quantity` units of a product over an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for the reservation
    pub id: Uuid,

    /// Reserved product
    pub product_id: Uuid,

    /// Owner of the reservation
    pub user_id: Uuid,

    /// Dates covered, serialized as `start_date` / `end_date`
    #[serde(flatten)]
    pub period: ReservationPeriod,

    /// Units of the product held
    pub quantity: u32,

    /// Current lifecycle state
    pub status: ReservationStatus,

    /// Timestamp when the reservation was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last status change
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new pending reservation
    ///
    /// Callers validate `quantity` beforehand; the entity does not re-check
    /// capacity.
    pub fn new(product_id: Uuid, user_id: Uuid, period: ReservationPeriod, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id,
            user_id,
            period,
            quantity,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overrides the initial status; used when importing existing bookings
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }

    pub fn overlaps(&self, period: &ReservationPeriod) -> bool {
        self.period.overlaps(period)
    }

    /// Moves to `next` if the status table allows it
    pub fn transition_to(&mut self, next: ReservationStatus) -> Result<(), DomainError> {
        self.status.check_transition(next)?;
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Reservation {
        let period = ReservationPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
        .unwrap();
        Reservation::new(Uuid::new_v4(), Uuid::new_v4(), period, 3)
    }

    #[test]
    fn test_transition_table_is_total_and_closed() {
        let legal = [
            (ReservationStatus::Pending, ReservationStatus::Confirmed),
            (ReservationStatus::Pending, ReservationStatus::Cancelled),
            (ReservationStatus::Confirmed, ReservationStatus::Completed),
            (ReservationStatus::Confirmed, ReservationStatus::Cancelled),
        ];

        for from in ReservationStatus::ALL {
            for to in ReservationStatus::ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{} -> {}",
                    from,
                    to
                );
                assert_eq!(from.check_transition(to).is_ok(), expected);
            }
        }
    }

    #[test]
    fn test_terminal_and_blocking_statuses() {
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());

        assert!(ReservationStatus::Pending.is_blocking());
        assert!(ReservationStatus::Confirmed.is_blocking());
        assert!(!ReservationStatus::Completed.is_blocking());
        assert!(!ReservationStatus::Cancelled.is_blocking());
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("pending".parse::<ReservationStatus>().unwrap(), ReservationStatus::Pending);
        assert_eq!(" Cancelled ".parse::<ReservationStatus>().unwrap(), ReservationStatus::Cancelled);
        assert!(matches!(
            "archived".parse::<ReservationStatus>(),
            Err(ValidationError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_new_reservation_is_pending() {
        let reservation = sample();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.created_at, reservation.updated_at);
        assert!(reservation.is_blocking());
    }

    #[test]
    fn test_transition_to_rejects_illegal_move() {
        let mut reservation = sample();
        reservation.transition_to(ReservationStatus::Cancelled).unwrap();

        let err = reservation.transition_to(ReservationStatus::Cancelled).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: ReservationStatus::Cancelled,
                to: ReservationStatus::Cancelled,
            }
        ));
        assert_eq!(reservation.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_serialization_flattens_period() {
        let reservation = sample();
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["start_date"], "2025-01-10");
        assert_eq!(json["end_date"], "2025-01-15");
        assert_eq!(json["status"], "PENDING");

        let back: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(back, reservation);
    }
}
