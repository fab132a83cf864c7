//! Product as seen by the reservation subsystem.
//!
//! The catalog owns products; reservations only read their identity and
//! capacity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rentable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Main image shown in listings
    pub image_url: Option<String>,

    /// Units that can be out on rental at the same time
    pub capacity: u32,
}

impl Product {
    /// Creates a new product with the given capacity
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image_url: None,
            capacity,
        }
    }

    /// Sets the listing image
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("Cajón flamenco", 5).with_image("/img/cajon.png");
        assert_eq!(product.capacity, 5);
        assert_eq!(product.image_url.as_deref(), Some("/img/cajon.png"));
    }
}
