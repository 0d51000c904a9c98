//! Collection export into the feature store
//!
//! The [`Exporter`] reads a collection through a
//! [`DocumentStore`](crate::adapters::store::DocumentStore), turns it into a
//! [`Snapshot`](crate::domain::Snapshot) and writes the raw CSV.

pub mod exporter;

pub use exporter::Exporter;
