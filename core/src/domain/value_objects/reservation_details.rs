//! Reservation joined with the product fields shown in user listings.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Product, Reservation};

/// A reservation with its product's name and image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    #[serde(flatten)]
    pub reservation: Reservation,

    /// `None` when the product is no longer in the catalog
    pub product_name: Option<String>,

    pub product_image: Option<String>,
}

impl ReservationDetails {
    pub fn new(reservation: Reservation, product: Option<&Product>) -> Self {
        Self {
            reservation,
            product_name: product.map(|p| p.name.clone()),
            product_image: product.and_then(|p| p.image_url.clone()),
        }
    }
}
