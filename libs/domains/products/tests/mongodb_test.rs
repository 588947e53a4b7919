//! Integration tests for the MongoDB product repository
//!
//! These tests run the service against a real MongoDB via testcontainers:
//! - Decimal128 prices keep their scale
//! - Price filtering uses exclusive bounds
//! - Partial updates are atomic and never upsert
//! - `updated_at` never moves before `created_at`
//!
//! Run with `cargo test -- --ignored` on a machine with Docker.

use chrono::{Duration, SubsecRound, Utc};
use domain_products::*;
use test_utils::{assertions::*, TestMongo};
use uuid::Uuid;

fn product_in(name: &str, price: &str) -> ProductIn {
    ProductIn {
        name: name.to_string(),
        quantity: 18,
        price: DecimalText::new(price),
        status: true,
    }
}

async fn service(mongo: &TestMongo) -> ProductService<MongoProductRepository> {
    let repo = MongoProductRepository::new(mongo.database());
    repo.init_indexes().await.unwrap();
    ProductService::new(repo)
}

fn missing_id() -> Uuid {
    Uuid::parse_str("1e4f214e-85f7-461a-89d0-a751a32e3bb9").unwrap()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_product() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    let created = service
        .create(product_in("Iphone 14 Pro Max", "8500.00"))
        .await
        .unwrap();
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get(created.id).await.unwrap();
    assert_uuid_eq(fetched.id, created.id, "fetched product id");
    assert_eq!(fetched.name, "Iphone 14 Pro Max");
    assert_eq!(fetched.price.to_string(), "8500.00");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_missing_product() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    let err = service.get(missing_id()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Product not found with filter: 1e4f214e-85f7-461a-89d0-a751a32e3bb9"
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_query_and_filter_by_price() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    for (name, price) in [
        ("Iphone 13 Mini", "5.00"),
        ("Iphone 12 Pro", "6.50"),
        ("Iphone 11", "7.00"),
        ("Iphone X", "8.00"),
        ("Iphone 8", "4.50"),
    ] {
        service.create(product_in(name, price)).await.unwrap();
    }

    let all = service.query().await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].name, "Iphone 13 Mini");

    let filtered = service
        .get_by_price(ProductFilterIn {
            min_price: Some("4.500".into()),
            max_price: Some("7.000".into()),
        })
        .await
        .unwrap();
    let mut names: Vec<_> = filtered.into_iter().map(|p| p.name).collect();
    names.sort();
    assert_eq!(names, vec!["Iphone 12 Pro", "Iphone 13 Mini"]);

    let open_top = service
        .get_by_price(ProductFilterIn {
            min_price: Some("7".into()),
            max_price: None,
        })
        .await
        .unwrap();
    assert_eq!(open_top.len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_partial_update() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    let created = service
        .create(product_in("Iphone 14 Pro Max", "8500.00"))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = service
        .update(
            created.id,
            ProductUpdate {
                price: Some("7.500".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price.to_string(), "7.500");
    assert_eq!(updated.quantity, created.quantity);
    assert_eq!(updated.status, created.status);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let later = (Utc::now() + Duration::days(4)).trunc_subsecs(3);
    let updated = service
        .update(
            created.id,
            ProductUpdate {
                updated_at: Some(later),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.updated_at, later);
    assert_eq!(updated.price.to_string(), "7.500");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_cannot_precede_created_at() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    let created = service
        .create(product_in("Iphone 14 Pro Max", "8500.00"))
        .await
        .unwrap();

    let err = service
        .update(
            created.id,
            ProductUpdate {
                quantity: Some(1),
                updated_at: Some(created.created_at - Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::BadInput(_)));
    assert_eq!(service.get(created.id).await.unwrap(), created);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_missing_product_does_not_upsert() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    let err = service
        .update(
            missing_id(),
            ProductUpdate {
                price: Some("7500.00".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
    assert!(service.query().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_product() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo).await;

    let created = service
        .create(product_in("Iphone 14 Pro Max", "8500.00"))
        .await
        .unwrap();

    assert!(service.delete(created.id).await.unwrap());
    assert!(matches!(
        service.delete(created.id).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        service.get(created.id).await,
        Err(ProductError::NotFound(_))
    ));

    mongo.cleanup().await;
}
