//! Products Domain
//!
//! CRUD over product records stored in a MongoDB collection.
//!
//! A request flows `handlers` → [`ProductService`] → [`ProductRepository`].
//! The service owns validation and the not-found rules; repositories only
//! move [`Product`] values in and out of storage. [`MongoProductRepository`]
//! is the production store and [`InMemoryProductRepository`] backs the
//! handler tests.
//!
//! Prices are [`rust_decimal::Decimal`] in memory and BSON `Decimal128` in
//! MongoDB; see [`decimal`] for the conversion.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("store");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod decimal;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{
    DecimalText, FieldError, PriceRange, Product, ProductChanges, ProductFilterIn, ProductIn,
    ProductOut, ProductUpdate, ProductUpdateOut, ValidationErrors,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
