//! Reservation repository module.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::{ReservationRepository, ReservationWrite};

mod mock;
pub use mock::MockReservationRepository;
