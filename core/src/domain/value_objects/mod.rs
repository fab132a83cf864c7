//! Value objects: immutable, validated-on-construction domain values.

pub mod availability;
pub mod period;
pub mod reservation_details;

pub use availability::Availability;
pub use period::ReservationPeriod;
pub use reservation_details::ReservationDetails;
