//! Ingestion orchestration
//!
//! [`DataIngestion`] runs export then split for one collection and returns
//! a [`DataIngestionArtifact`](crate::domain::DataIngestionArtifact).

pub mod coordinator;
pub mod summary;

pub use coordinator::DataIngestion;
pub use summary::{IngestionStage, IngestionSummary};
