//! Domain models and types for Harvest.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated identifiers** ([`CollectionName`], [`RunId`])
//! - **The tabular snapshot** ([`Snapshot`], [`Column`], [`Cell`])
//! - **The run artifact** ([`DataIngestionArtifact`])
//! - **Error types** ([`HarvestError`], [`StoreError`], [`SplitError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, HarvestError>`]:
//!
//! ```rust,no_run
//! use harvest::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = harvest::config::load_config("harvest.toml")?;
//!     println!("collection: {}", config.ingestion.collection_name);
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod errors;
pub mod ids;
pub mod result;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use artifact::DataIngestionArtifact;
pub use errors::{HarvestError, SplitError, StoreError};
pub use ids::{CollectionName, RunId};
pub use result::Result;
pub use snapshot::{Cell, Column, ColumnType, Snapshot, SnapshotOptions};
