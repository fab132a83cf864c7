//! Inclusive calendar date range covered by a reservation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Inclusive `[start_date, end_date]` range
///
/// Only constructible with `start_date <= end_date`, including through
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodFields")]
pub struct ReservationPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct PeriodFields {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<PeriodFields> for ReservationPeriod {
    type Error = ValidationError;

    fn try_from(fields: PeriodFields) -> Result<Self, Self::Error> {
        Self::new(fields.start_date, fields.end_date)
    }
}

impl ReservationPeriod {
    /// Creates a period, rejecting ranges that end before they start
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if start_date > end_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whether two periods share at least one day
    ///
    /// Bounds are inclusive, so a period ending on the day another starts
    /// overlaps it.
    pub fn overlaps(&self, other: &ReservationPeriod) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl std::fmt::Display for ReservationPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start_date, self.end_date)
    }
}
