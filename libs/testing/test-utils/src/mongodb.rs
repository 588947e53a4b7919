//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a MongoDB container for testing.

use mongodb::{Client, Database, bson::doc};
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// MongoDB container plus a client and a freshly named database.
///
/// The container is automatically stopped and removed when this struct is dropped.
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub client: Client,
    pub database: Database,
}

impl TestMongo {
    /// Start a container and connect to a uniquely named database
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestMongo;
    ///
    /// # async fn example() {
    /// let mongo = TestMongo::new().await;
    /// // Use mongo.database() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get host port");

        let client = Client::with_uri_str(format!("mongodb://127.0.0.1:{}", host_port))
            .await
            .expect("Failed to create MongoDB client");

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .expect("Failed to ping test MongoDB");

        let database = client.database(&format!("test_{}", Uuid::new_v4().simple()));

        tracing::info!(port = host_port, database = %database.name(), "Test MongoDB ready");

        Self {
            container,
            client,
            database,
        }
    }

    /// Get the test database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Drop every collection in the test database
    pub async fn cleanup(&self) {
        self.database
            .drop()
            .await
            .expect("Failed to drop test database");
    }
}
