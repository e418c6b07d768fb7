use std::sync::Arc;

use tracing::{info, instrument};

use crate::admin::catalog_store::CatalogStore;
use crate::catalog::{seed_products, Product, ProductInput};
use crate::errors::ServiceError;
use crate::ids;
use crate::storage::JsonListStore;

pub const PRODUCTS_CONTAINER: &str = "products";

/// File storage: the product catalog persisted as a JSON array, newest first.
pub struct ProductStore {
    store: JsonListStore<Product>,
}

impl ProductStore {
    /// Open the catalog at `path`. Until something is saved, loads return the seed catalog.
    pub fn new<P: Into<std::path::PathBuf>>(path: P) -> Arc<Self> {
        Self::with_seed(path, seed_products())
    }

    pub fn with_seed<P: Into<std::path::PathBuf>>(path: P, seed: Vec<Product>) -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::new(PRODUCTS_CONTAINER, path, seed) })
    }

    /// Whole catalog as currently persisted (or the seed).
    pub async fn load(&self) -> Vec<Product> {
        self.store.load().await
    }

    /// Overwrite the whole catalog.
    pub async fn save(&self, products: &[Product]) -> Result<(), ServiceError> {
        self.store.save(products).await
    }

    pub async fn list(&self) -> Vec<Product> {
        self.load().await
    }

    pub async fn get(&self, id: &str) -> Option<Product> {
        self.load().await.into_iter().find(|p| p.id == id)
    }

    /// Add a product at the front of the catalog.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let created = self
            .store
            .update(|products| {
                let mut id = ids::product_id();
                while products.iter().any(|p| p.id == id) {
                    id = ids::product_id();
                }
                let product = input.into_product(id)?;
                products.insert(0, product.clone());
                Ok(product)
            })
            .await?;
        info!(product_id = %created.id, name = %created.name, "product_created");
        Ok(created)
    }

    /// Partially update the product with `id`.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update(&self, id: &str, input: ProductInput) -> Result<Product, ServiceError> {
        let updated = self
            .store
            .update(|products| {
                let existing = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("Product"))?;
                let next = input.patched(existing)?;
                *existing = next.clone();
                Ok(next)
            })
            .await?;
        info!(product_id = %updated.id, "product_updated");
        Ok(updated)
    }

    /// Remove the product with `id` and hand it back.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<Product, ServiceError> {
        let removed = self
            .store
            .update(|products| {
                let index = products
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("Product"))?;
                Ok(products.remove(index))
            })
            .await?;
        info!(product_id = %removed.id, "product_deleted");
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl CatalogStore for ProductStore {
    async fn list(&self) -> Vec<Product> { self.list().await }
    async fn get(&self, id: &str) -> Option<Product> { self.get(id).await }
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> { self.create(input).await }
    async fn update(&self, id: &str, input: ProductInput) -> Result<Product, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: &str) -> Result<Product, ServiceError> { self.delete(id).await }
}
