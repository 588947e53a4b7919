//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{
        self, doc, serde_helpers::chrono_datetime_as_bson_datetime, to_document, Bson, Decimal128,
        Document,
    },
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::decimal::{from_decimal128, to_decimal128};
use crate::error::{ProductError, ProductResult};
use crate::models::{PriceRange, Product, ProductChanges};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// Stored shape of a product.
///
/// The id is kept as its hyphenated string so that lookups do not depend on
/// the BSON binary subtype. Timestamps are BSON dates (millisecond precision).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal128,
    pub status: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn encode_price(price: &Decimal) -> ProductResult<Decimal128> {
    to_decimal128(price).map_err(|e| ProductError::Database(e.to_string()))
}

impl TryFrom<&Product> for ProductDocument {
    type Error = ProductError;

    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            quantity: product.quantity,
            price: encode_price(&product.price)?,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(document: ProductDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id).map_err(|e| {
            ProductError::Database(format!("invalid product id '{}': {}", document.id, e))
        })?;
        let price = from_decimal128(&document.price).map_err(|e| {
            ProductError::Database(format!("invalid price for product {}: {}", id, e))
        })?;

        Ok(Self {
            id,
            name: document.name,
            quantity: document.quantity,
            price,
            status: document.status,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

/// `$set` body for a partial update; `None` fields are left out entirely.
#[derive(Debug, Serialize)]
struct ProductChangesDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Decimal128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<bool>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<&ProductChanges> for ProductChangesDocument {
    type Error = ProductError;

    fn try_from(changes: &ProductChanges) -> Result<Self, Self::Error> {
        Ok(Self {
            quantity: changes.quantity,
            price: changes.price.as_ref().map(encode_price).transpose()?,
            status: changes.status,
            updated_at: changes.updated_at,
        })
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Use a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Index `price` for the range scan. Safe to call on every startup.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "price": 1 })
            .options(IndexOptions::builder().name("idx_price".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// Matches `id` only while `created_at <= changes.updated_at`, so the
    /// update can never move `updated_at` before creation.
    fn update_filter(id: Uuid, changes: &ProductChanges) -> Document {
        doc! {
            "_id": id.to_string(),
            "created_at": { "$lte": bson::DateTime::from_chrono(changes.updated_at) },
        }
    }

    /// Strict `$gt`/`$lt` on price; an empty range matches everything.
    fn build_price_filter(range: &PriceRange) -> ProductResult<Document> {
        let mut price = doc! {};
        if let Some(min) = range.min {
            price.insert("$gt", Bson::Decimal128(encode_price(&min)?));
        }
        if let Some(max) = range.max {
            price.insert("$lt", Bson::Decimal128(encode_price(&max)?));
        }

        if price.is_empty() {
            Ok(doc! {})
        } else {
            Ok(doc! { "price": price })
        }
    }

    fn build_update(changes: &ProductChanges) -> ProductResult<Document> {
        let set = to_document(&ProductChangesDocument::try_from(changes)?)
            .map_err(|e| ProductError::Database(e.to_string()))?;
        Ok(doc! { "$set": set })
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_one(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .map(Product::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find(&self, range: &PriceRange) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(Self::build_price_filter(range)?).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert_one(&self, product: &Product) -> ProductResult<()> {
        self.collection
            .insert_one(ProductDocument::try_from(product)?)
            .await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(())
    }

    #[instrument(skip(self, changes))]
    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: &ProductChanges,
    ) -> ProductResult<Option<Product>> {
        let updated = self
            .collection
            .find_one_and_update(Self::update_filter(id, changes), Self::build_update(changes)?)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        updated.map(Product::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_one(&self, id: Uuid) -> ProductResult<u64> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        tracing::info!(product_id = %id, deleted = result.deleted_count, "Product deleted");
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, SubsecRound, TimeZone};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_build_price_filter_empty() {
        let filter = MongoProductRepository::build_price_filter(&PriceRange::default()).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_price_filter_is_strict() {
        let range = PriceRange {
            min: Some(dec("4.500")),
            max: Some(dec("7.000")),
        };
        let filter = MongoProductRepository::build_price_filter(&range).unwrap();
        let price = filter.get_document("price").unwrap();

        assert_eq!(
            price.get("$gt"),
            Some(&Bson::Decimal128(to_decimal128(&dec("4.500")).unwrap()))
        );
        assert_eq!(
            price.get("$lt"),
            Some(&Bson::Decimal128(to_decimal128(&dec("7.000")).unwrap()))
        );
        assert!(!price.contains_key("$gte"));
        assert!(!price.contains_key("$lte"));
    }

    #[test]
    fn test_build_price_filter_one_side() {
        let range = PriceRange {
            min: None,
            max: Some(dec("8")),
        };
        let filter = MongoProductRepository::build_price_filter(&range).unwrap();
        let price = filter.get_document("price").unwrap();
        assert!(!price.contains_key("$gt"));
        assert!(price.contains_key("$lt"));
    }

    #[test]
    fn test_build_update_only_sets_present_fields() {
        let changes = ProductChanges {
            quantity: None,
            price: Some(dec("7.500")),
            status: None,
            updated_at: Utc::now(),
        };
        let update = MongoProductRepository::build_update(&changes).unwrap();
        let set = update.get_document("$set").unwrap();

        assert!(set.contains_key("price"));
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("quantity"));
        assert!(!set.contains_key("status"));
        assert!(!set.contains_key("name"));
    }

    #[test]
    fn test_document_round_trip() {
        let now = Utc::now().trunc_subsecs(3);
        let product = Product {
            id: Uuid::parse_str("fce6cc37-10b9-4a8e-a8b2-977df327001a").unwrap(),
            name: "Iphone 14 Pro Max".to_string(),
            quantity: 18,
            price: dec("8500.00"),
            status: true,
            created_at: now,
            updated_at: now,
        };

        let document = to_document(&ProductDocument::try_from(&product).unwrap()).unwrap();
        assert_eq!(
            document.get_str("_id").unwrap(),
            "fce6cc37-10b9-4a8e-a8b2-977df327001a"
        );
        assert!(matches!(document.get("price"), Some(Bson::Decimal128(_))));
        assert_eq!(document.get_i64("quantity").unwrap(), 18);
        assert!(matches!(document.get("created_at"), Some(Bson::DateTime(_))));
        assert!(matches!(document.get("updated_at"), Some(Bson::DateTime(_))));

        let decoded: ProductDocument = mongodb::bson::from_document(document).unwrap();
        let restored = Product::try_from(decoded).unwrap();
        assert_eq!(restored, product);
        assert_eq!(restored.price.to_string(), "8500.00");
    }

    #[test]
    fn test_update_filter_guards_created_at() {
        let updated_at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let changes = ProductChanges {
            quantity: None,
            price: None,
            status: None,
            updated_at,
        };
        let id = Uuid::parse_str("fce6cc37-10b9-4a8e-a8b2-977df327001a").unwrap();
        let filter = MongoProductRepository::update_filter(id, &changes);

        assert_eq!(
            filter.get_str("_id").unwrap(),
            "fce6cc37-10b9-4a8e-a8b2-977df327001a"
        );
        let created_at = filter.get_document("created_at").unwrap();
        assert_eq!(
            created_at.get("$lte"),
            Some(&Bson::DateTime(bson::DateTime::from_millis(
                updated_at.timestamp_millis()
            )))
        );
    }

    #[test]
    fn test_update_sets_updated_at_as_date() {
        let changes = ProductChanges {
            quantity: Some(3),
            price: None,
            status: None,
            updated_at: Utc::now() + Duration::days(1),
        };
        let update = MongoProductRepository::build_update(&changes).unwrap();
        let set = update.get_document("$set").unwrap();
        assert!(matches!(set.get("updated_at"), Some(Bson::DateTime(_))));
        assert_eq!(set.get_i64("quantity").unwrap(), 3);
    }

    #[test]
    fn test_bad_stored_id_is_a_database_error() {
        let now = Utc::now();
        let document = ProductDocument {
            id: "not-a-uuid".to_string(),
            name: "x".to_string(),
            quantity: 1,
            price: to_decimal128(&dec("1")).unwrap(),
            status: true,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            Product::try_from(document),
            Err(ProductError::Database(_))
        ));
    }
}
