//! Mock implementation of ProductRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Product;
use crate::errors::DomainError;

use super::trait_::ProductRepository;

/// Mock product catalog
#[derive(Clone)]
pub struct MockProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a catalog holding `products`
    pub fn with_products(products: Vec<Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }
}

impl Default for MockProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }
}
