//! Reservation service module
//!
//! Availability checks, reservation creation, status transitions and the
//! read-side listings used by the storefront.

mod service;

#[cfg(test)]
mod tests;

pub use service::ReservationService;
