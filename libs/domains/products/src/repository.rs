use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{PriceRange, Product, ProductChanges};

/// Storage collaborator for products.
///
/// Shaped after a document collection: single-record lookups by id, a
/// price-range scan, insert, atomic find-and-modify, and delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Look up a product by ID
    async fn find_one(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// All products priced inside `range`, in insertion order
    async fn find(&self, range: &PriceRange) -> ProductResult<Vec<Product>>;

    async fn insert_one(&self, product: &Product) -> ProductResult<()>;

    /// Apply `changes` and return the updated record. `None` when no product
    /// has this id or its `created_at` is later than `changes.updated_at`.
    /// Never inserts.
    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: &ProductChanges,
    ) -> ProductResult<Option<Product>>;

    /// Delete by ID, returning the number of removed records
    async fn delete_one(&self, id: Uuid) -> ProductResult<u64>;
}
