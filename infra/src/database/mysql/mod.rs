//! MySQL repository implementations

mod product_repository_impl;
mod reservation_repository_impl;

pub use product_repository_impl::MySqlProductRepository;
pub use reservation_repository_impl::MySqlReservationRepository;
