//! Domain entities representing core business objects.

pub mod product;
pub mod reservation;
pub mod token;

// Re-export commonly used types
pub use product::Product;
pub use reservation::{Reservation, ReservationStatus};
pub use token::Claims;
