//! Core business logic for Harvest.
//!
//! # Modules
//!
//! - [`export`] - Collection export into the feature store
//! - [`ingestion`] - Orchestration of a full ingestion run
//! - [`persist`] - CSV persistence of snapshots
//! - [`split`] - Seeded train/test partitioning
//! - [`transform`] - Document flattening
//!
//! # Ingestion Workflow
//!
//! 1. **Fetch**: Read every document of the collection from the store
//! 2. **Tabulate**: Build a column-major snapshot, dropping configured columns
//! 3. **Persist raw**: Write the snapshot to the feature store CSV
//! 4. **Split**: Partition rows with a seeded shuffle
//! 5. **Persist split**: Write the train file, then the test file
//! 6. **Report**: Log the run summary and return the artifact
//!
//! # Example
//!
//! ```rust,no_run
//! use harvest::config::load_config;
//! use harvest::core::ingestion::DataIngestion;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("harvest.toml")?;
//! let ingestion = DataIngestion::from_config(&config)?;
//!
//! let artifact = ingestion.initiate_data_ingestion().await?;
//! println!("train: {}", artifact.trained_file_path().display());
//! println!("test: {}", artifact.test_file_path().display());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod ingestion;
pub mod persist;
pub mod split;
pub mod transform;
