//! Collection exporter
//!
//! Fetches a whole collection, tabulates it and writes the raw CSV.

use crate::adapters::store::DocumentStore;
use crate::config::IngestionConfig;
use crate::core::persist::write_snapshot_csv;
use crate::core::transform::flatten_document;
use crate::domain::errors::{HarvestError, StoreError};
use crate::domain::ids::CollectionName;
use crate::domain::snapshot::{Snapshot, SnapshotOptions};
use crate::domain::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Span;

/// Exports a collection into the feature store file
pub struct Exporter {
    store: Arc<dyn DocumentStore>,
    row_data_path: PathBuf,
    options: SnapshotOptions,
    flatten_separator: Option<String>,
    span: Span,
}

impl Exporter {
    /// Create an exporter reading from `store` and writing to the configured raw data path
    pub fn new(store: Arc<dyn DocumentStore>, config: &IngestionConfig, span: Span) -> Self {
        Self {
            store,
            row_data_path: config.row_data_path.clone(),
            options: config.snapshot_options(),
            flatten_separator: config
                .flatten_nested
                .then(|| config.flatten_separator.clone()),
            span,
        }
    }

    /// Path the raw snapshot is written to
    pub fn row_data_path(&self) -> &std::path::Path {
        &self.row_data_path
    }

    /// Fetch `collection`, build its snapshot and persist it as CSV
    ///
    /// Nothing is written if the fetch fails or the collection is empty.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::StoreFetch`] for store failures (including an
    /// empty collection) and [`HarvestError::Io`] if the file cannot be written.
    pub async fn export(&self, collection: &CollectionName) -> Result<Snapshot> {
        tracing::info!(
            parent: &self.span,
            collection = %collection,
            store = %self.store.describe(),
            "Exporting collection into feature store"
        );

        let documents = self
            .store
            .fetch_collection(collection)
            .await
            .map_err(|e| HarvestError::store_fetch(collection.as_str(), e))?;

        if documents.is_empty() {
            return Err(HarvestError::store_fetch(
                collection.as_str(),
                StoreError::EmptyCollection(collection.to_string()),
            ));
        }

        tracing::debug!(
            parent: &self.span,
            documents = documents.len(),
            "Fetched documents"
        );

        let snapshot = match &self.flatten_separator {
            Some(separator) => Snapshot::from_documents(
                documents
                    .into_iter()
                    .map(|doc| flatten_document(doc, separator)),
                &self.options,
            ),
            None => Snapshot::from_documents(documents, &self.options),
        };

        let rows = write_snapshot_csv(&snapshot, &self.row_data_path)?;

        tracing::info!(
            parent: &self.span,
            rows = rows,
            columns = snapshot.column_count(),
            path = %self.row_data_path.display(),
            "Raw data saved to feature store"
        );

        Ok(snapshot)
    }
}
