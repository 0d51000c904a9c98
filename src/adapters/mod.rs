//! External system integrations for Harvest.
//!
//! - [`store`] - Document store abstraction (trait-based)
//! - [`mongodb`] - MongoDB Data API implementation
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies so the pipeline can be driven by
//! any [`store::DocumentStore`], including in-memory stores in tests.
//!
//! ```rust,no_run
//! use harvest::adapters::mongodb::MongoDataApiClient;
//! use harvest::config::{secret_string, MongoDbConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoDbConfig {
//!     data_api_url: "https://data.mongodb-api.com/app/data-abcde/endpoint/data/v1".to_string(),
//!     api_key: secret_string("key".to_string()),
//!     data_source: "Cluster0".to_string(),
//!     database_name: "Proj1".to_string(),
//!     page_size: 1000,
//!     timeout_seconds: 60,
//! };
//!
//! let client = MongoDataApiClient::new(config)?;
//! # Ok(())
//! # }
//! ```

pub mod mongodb;
pub mod store;
