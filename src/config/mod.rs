//! Configuration management for Harvest.
//!
//! Harvest reads one TOML file per run with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HARVEST_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation before anything touches the network or the filesystem
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [mongodb]
//! data_api_url = "https://data.mongodb-api.com/app/data-abcde/endpoint/data/v1"
//! api_key = "${HARVEST_MONGODB_API_KEY}"
//! data_source = "Cluster0"
//! database_name = "Proj1"
//!
//! [ingestion]
//! collection_name = "reviews"
//! row_data_path = "artifact/data_ingestion/feature_store/data.csv"
//! train_file_name = "artifact/data_ingestion/ingested/train.csv"
//! test_file_name = "artifact/data_ingestion/ingested/test.csv"
//! train_test_split_ratio = 0.25
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use harvest::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("harvest.toml")?;
//! println!("Exporting {}", config.ingestion.collection_name);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, HarvestConfig, IngestionConfig, LoggingConfig, MongoDbConfig};
pub use secret::{secret_string, SecretString, SecretValue};
