use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::domain::{Product, ProductInput};
use crate::errors::ServiceError;
use crate::storage::map_store::MapStore;

/// Trait abstraction for product storage.
/// Handlers only see this trait, so tests and alternative backends can swap
/// the implementation without touching the HTTP layer.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Vec<Product>;
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError>;
    async fn get(&self, id: &str) -> Result<Product, ServiceError>;
    async fn replace(&self, id: &str, input: ProductInput) -> Result<Product, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn len(&self) -> usize;
}

/// Process-memory product store keyed by server-minted id.
#[derive(Clone)]
pub struct InMemoryProductStore {
    products: MapStore<String, Product>,
    validate: bool,
}

impl InMemoryProductStore {
    /// `validate` switches price/stock checks on create and replace.
    pub fn new(validate: bool) -> Self {
        Self { products: MapStore::new(), validate }
    }

    fn check(&self, input: &ProductInput) -> Result<(), ServiceError> {
        if self.validate { input.validate() } else { Ok(()) }
    }

    /// List all products, in unspecified order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.values().await
    }

    /// Mint a fresh id and store the product.
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        self.check(&input)?;
        let product = input.into_product(Uuid::new_v4().to_string());
        self.products.insert(product.id.clone(), product.clone()).await;
        debug!(id = %product.id, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: &str) -> Result<Product, ServiceError> {
        self.products
            .get(id)
            .await
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    /// Overwrite an existing product; lookup and write share one exclusive lock.
    pub async fn replace(&self, id: &str, input: ProductInput) -> Result<Product, ServiceError> {
        self.check(&input)?;
        let updated = self
            .products
            .update_map(|map| {
                let existing = map.get_mut(id).ok_or_else(|| ServiceError::not_found("product"))?;
                existing.replace_with(input);
                Ok(existing.clone())
            })
            .await?;
        debug!(%id, "product replaced");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        match self.products.remove(id).await {
            Some(_) => {
                debug!(%id, "product deleted");
                Ok(())
            }
            None => Err(ServiceError::not_found("product")),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.len().await
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Vec<Product> { self.list().await }
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> { self.create(input).await }
    async fn get(&self, id: &str) -> Result<Product, ServiceError> { self.get(id).await }
    async fn replace(&self, id: &str, input: ProductInput) -> Result<Product, ServiceError> { self.replace(id, input).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
    async fn len(&self) -> usize { self.len().await }
}
