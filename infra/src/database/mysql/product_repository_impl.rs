//! MySQL implementation of the ProductRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use cc_core::domain::entities::Product;
use cc_core::errors::DomainError;
use cc_core::repositories::ProductRepository;

/// MySQL implementation of ProductRepository
pub struct MySqlProductRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &MySqlRow) -> Result<Product, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(Product {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid product UUID: {}", e),
            })?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get name: {}", e) })?,
            image_url: row.try_get("image_url").map_err(|e| DomainError::Internal {
                message: format!("Failed to get image_url: {}", e),
            })?,
            capacity: row.try_get("capacity").map_err(|e| DomainError::Internal {
                message: format!("Failed to get capacity: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query("SELECT id, name, image_url, capacity FROM products WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find product: {}", e),
            })?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!(
            "SELECT id, name, image_url, capacity FROM products WHERE id IN ({})",
            placeholders
        );

        let mut q = sqlx::query(&query);
        for id in ids {
            q = q.bind(id.to_string());
        }

        let rows = q.fetch_all(&self.pool).await.map_err(|e| DomainError::Internal {
            message: format!("Failed to load products: {}", e),
        })?;

        rows.iter().map(Self::row_to_product).collect()
    }
}
