pub mod product;
pub mod reservation;

pub use product::{MockProductRepository, ProductRepository};
pub use reservation::{MockReservationRepository, ReservationRepository, ReservationWrite};
