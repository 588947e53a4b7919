//! Process-local ProductRepository for tests and running without a database

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{PriceRange, Product, ProductChanges};
use crate::repository::ProductRepository;

/// Products kept in insertion order behind a lock.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `products` already stored
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_one(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find(&self, range: &PriceRange) -> ProductResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| range.contains(&p.price))
            .cloned()
            .collect())
    }

    async fn insert_one(&self, product: &Product) -> ProductResult<()> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: &ProductChanges,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let target = products
            .iter_mut()
            .find(|p| p.id == id && p.created_at <= changes.updated_at);
        Ok(target.map(|product| {
            changes.apply(product);
            product.clone()
        }))
    }

    async fn delete_one(&self, id: Uuid) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }
}
