use crate::catalog::{Product, ProductInput};
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for product catalog storage.
/// Implementations can be file-backed, database-backed, or in-memory.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list(&self) -> Vec<Product>;
    async fn get(&self, id: &str) -> Option<Product>;
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError>;
    async fn update(&self, id: &str, input: ProductInput) -> Result<Product, ServiceError>;
    async fn delete(&self, id: &str) -> Result<Product, ServiceError>;
}
