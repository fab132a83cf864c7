//! Business services containing domain logic and use cases.

pub mod reservation;

pub use reservation::ReservationService;
