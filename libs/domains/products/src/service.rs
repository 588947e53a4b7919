//! Product Service - Business logic layer

use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    FieldError, PriceRange, Product, ProductFilterIn, ProductIn, ProductOut, ProductUpdate,
    ProductUpdateOut, ValidationErrors,
};
use crate::repository::ProductRepository;

/// Current time at the millisecond precision of stored timestamps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Product service providing business logic operations
///
/// Each operation validates its input, runs one repository call (a second
/// lookup for delete, and for an update that matched nothing), and maps the
/// result into output schemas or a [`ProductError`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductIn) -> ProductResult<ProductOut> {
        let product = Product::build(input, now())?;
        self.repository.insert_one(&product).await?;
        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ProductResult<ProductOut> {
        self.repository
            .find_one(id)
            .await?
            .map(ProductOut::from)
            .ok_or(ProductError::NotFound(id))
    }

    /// Every product, in storage order
    #[instrument(skip(self))]
    pub async fn query(&self) -> ProductResult<Vec<ProductOut>> {
        let products = self.repository.find(&PriceRange::default()).await?;
        Ok(products.into_iter().map(ProductOut::from).collect())
    }

    /// Products with `min_price < price < max_price`
    #[instrument(skip(self))]
    pub async fn get_by_price(&self, filter: ProductFilterIn) -> ProductResult<Vec<ProductOut>> {
        let range = filter.into_range()?;
        let products = self.repository.find(&range).await?;
        Ok(products.into_iter().map(ProductOut::from).collect())
    }

    /// Apply the fields present in `payload`; `updated_at` defaults to now
    /// and may not be earlier than `created_at`.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: ProductUpdate) -> ProductResult<ProductUpdateOut> {
        let changes = payload.into_changes(now())?;

        if let Some(product) = self.repository.find_one_and_update(id, &changes).await? {
            return Ok(product.into());
        }

        // Nothing matched: either the id is unknown or updated_at was too early.
        match self.repository.find_one(id).await? {
            Some(_) => Err(ValidationErrors::from(vec![FieldError::updated_before_created(
                changes.updated_at,
            )])
            .into()),
            None => Err(ProductError::NotFound(id)),
        }
    }

    /// Returns whether a record was actually removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        if self.repository.find_one(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        let deleted = self.repository.delete_one(id).await?;
        Ok(deleted > 0)
    }
}
