//! Reservation booking policy
//!
//! Optional limits applied when a customer creates a reservation. The
//! default policy imposes none, so a creation succeeds whenever the
//! availability check says it would. Availability checks are not affected
//! by these settings.

use serde::{Deserialize, Serialize};

/// Booking policy applied on reservation creation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReservationPolicy {
    /// Reject reservations whose start date is before today (UTC)
    #[serde(default = "default_reject_past")]
    pub reject_past_start_dates: bool,

    /// Largest quantity a single reservation may hold
    #[serde(default = "default_max_quantity")]
    pub max_quantity_per_reservation: u32,

    /// Longest reservation, in days (inclusive range)
    #[serde(default = "default_max_days")]
    pub max_reservation_days: u32,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            reject_past_start_dates: default_reject_past(),
            max_quantity_per_reservation: default_max_quantity(),
            max_reservation_days: default_max_days(),
        }
    }
}

impl ReservationPolicy {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reject_past_start_dates: std::env::var("RESERVATION_REJECT_PAST_DATES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reject_past_start_dates),
            max_quantity_per_reservation: std::env::var("RESERVATION_MAX_QUANTITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_quantity_per_reservation),
            max_reservation_days: std::env::var("RESERVATION_MAX_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_reservation_days),
        }
    }
}

fn default_reject_past() -> bool {
    false
}

fn default_max_quantity() -> u32 {
    u32::MAX
}

fn default_max_days() -> u32 {
    u32::MAX
}
