//! Database connectivity for the store services.
//!
//! MongoDB is the only backend: [`mongodb::connect`] builds a pooled client from
//! a [`mongodb::MongoConfig`], and [`mongodb::check_health`] backs readiness probes.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;
