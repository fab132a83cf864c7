//! Read-only access to the product catalog.
//!
//! Products are owned by the catalog; reservations only need their
//! capacity and a few display fields.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Product;
use crate::errors::DomainError;

/// Repository trait for product lookups
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No product with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;

    /// Fetch several products at once; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;
}
