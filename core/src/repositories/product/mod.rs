//! Product lookup module.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::ProductRepository;

mod mock;
pub use mock::MockProductRepository;
