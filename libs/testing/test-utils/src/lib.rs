//! Test support for the store crates.
//!
//! - [`TestMongo`]: a throwaway MongoDB container with its own database (feature `mongodb`)
//! - [`TestDataBuilder`]: product fields derived from a test name, stable across runs
//! - [`assertions`]: assertion helpers with readable failure messages
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn stores_a_product() {
//!     let mongo = TestMongo::new().await;
//!     let data = TestDataBuilder::from_test_name("stores_a_product");
//!
//!     let id = data.product_id();
//!     let name = data.name("product", "main");
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "mongodb")]
mod mongodb;

#[cfg(feature = "mongodb")]
pub use mongodb::TestMongo;

/// Seeded source of product test data.
///
/// Two builders with the same seed produce the same ids, names and quantities.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of `name`, usually the test function's name.
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A version 4 UUID built from the seed, so it looks like a server-assigned id.
    pub fn product_id(&self) -> Uuid {
        let seed = self.seed.to_be_bytes();
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&seed);
        bytes[8..].copy_from_slice(&self.seed.rotate_left(32).to_be_bytes());

        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Stock count in `1..=100`
    pub fn quantity(&self) -> i64 {
        (self.seed % 100) as i64 + 1
    }
}

/// Assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }
}
