//! Data ingestion coordinator
//!
//! Runs the export and split steps in order and produces the
//! [`DataIngestionArtifact`] describing the train and test files.

use super::summary::{IngestionStage, IngestionSummary};
use crate::adapters::mongodb::MongoDataApiClient;
use crate::adapters::store::DocumentStore;
use crate::config::{HarvestConfig, IngestionConfig};
use crate::core::export::Exporter;
use crate::core::split::{SplitCounts, Splitter};
use crate::domain::artifact::DataIngestionArtifact;
use crate::domain::errors::HarvestError;
use crate::domain::ids::{CollectionName, RunId};
use crate::domain::snapshot::Snapshot;
use crate::domain::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::Span;

/// Data ingestion component
///
/// Each instance is one run: it carries a fresh [`RunId`] and a tracing span
/// that every event of the run is recorded under.
///
/// # Example
///
/// ```no_run
/// use harvest::config::load_config;
/// use harvest::core::ingestion::DataIngestion;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("harvest.toml")?;
/// let ingestion = DataIngestion::from_config(&config)?;
///
/// let artifact = ingestion.initiate_data_ingestion().await?;
/// println!("{artifact}");
/// # Ok(())
/// # }
/// ```
pub struct DataIngestion {
    config: IngestionConfig,
    collection: CollectionName,
    run_id: RunId,
    exporter: Exporter,
    splitter: Splitter,
    span: Span,
}

impl DataIngestion {
    /// Create an ingestion run over an arbitrary document store
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Configuration`] if the collection name is invalid.
    pub fn new(config: IngestionConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let collection = CollectionName::new(config.collection_name.as_str())
            .map_err(|e| HarvestError::Configuration(format!("Invalid collection name: {e}")))?;
        let run_id = RunId::generate();
        let span = tracing::info_span!(
            "data_ingestion",
            run_id = %run_id,
            collection = %collection
        );

        let exporter = Exporter::new(store, &config, span.clone());
        let splitter = Splitter::new(&config, span.clone());

        Ok(Self {
            config,
            collection,
            run_id,
            exporter,
            splitter,
            span,
        })
    }

    /// Create an ingestion run backed by the MongoDB Data API
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Configuration`] if the configuration is invalid
    /// or the HTTP client cannot be built.
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        config.validate().map_err(HarvestError::Configuration)?;

        let client = MongoDataApiClient::new(config.mongodb.clone()).map_err(|e| {
            HarvestError::Configuration(format!("Failed to create document store client: {e}"))
        })?;

        Self::new(config.ingestion.clone(), Arc::new(client))
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Collection this run exports
    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    /// Export the collection to the raw data file and return its snapshot
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::StoreFetch`] if the collection cannot be read or
    /// is empty and [`HarvestError::Io`] if the file cannot be written.
    pub async fn export_data_into_feature_store(&self) -> Result<Snapshot> {
        self.exporter.export(&self.collection).await
    }

    /// Split a snapshot and write the train and test files
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Split`] if the snapshot cannot be partitioned and
    /// [`HarvestError::Io`] if a file cannot be written.
    pub fn split_data_as_train_test(&self, snapshot: &Snapshot) -> Result<()> {
        self.splitter.split_and_persist(snapshot).map(|_| ())
    }

    /// Run export then split and return the artifact
    ///
    /// The first failure aborts the run; no artifact is produced for a failed
    /// run and files already written are left in place.
    ///
    /// # Errors
    ///
    /// Returns the error of the step that failed.
    pub async fn initiate_data_ingestion(&self) -> Result<DataIngestionArtifact> {
        let start_time = Instant::now();
        let mut stage = IngestionStage::Start;

        tracing::info!(parent: &self.span, "Starting data ingestion");

        let outcome = self.run(&mut stage).await;
        match outcome {
            Ok((snapshot, counts)) => {
                let stage = stage.next();
                tracing::debug!(parent: &self.span, stage = %stage, "Stage complete");

                let mut summary = IngestionSummary::new(self.run_id, self.collection.clone())
                    .with_duration(start_time.elapsed());
                summary.total_rows = snapshot.row_count();
                summary.columns = snapshot.column_count();
                summary.train_rows = counts.train_rows;
                summary.test_rows = counts.test_rows;

                summary.log_summary(&self.span);

                Ok(DataIngestionArtifact::new(
                    self.config.train_file_name.clone(),
                    self.config.test_file_name.clone(),
                ))
            }
            Err(e) => {
                tracing::error!(
                    parent: &self.span,
                    stage = %stage,
                    error_kind = e.kind(),
                    error = %e,
                    "Data ingestion failed"
                );
                Err(e)
            }
        }
    }

    /// Runs the two steps, advancing `stage` as each completes
    async fn run(&self, stage: &mut IngestionStage) -> Result<(Snapshot, SplitCounts)> {
        let snapshot = self.export_data_into_feature_store().await?;
        *stage = stage.next();
        tracing::debug!(parent: &self.span, stage = %stage, "Stage complete");

        let counts = self.splitter.split_and_persist(&snapshot)?;
        *stage = stage.next();
        tracing::debug!(parent: &self.span, stage = %stage, "Stage complete");

        Ok((snapshot, counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::Document;
    use crate::domain::errors::{SplitError, StoreError};
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    struct VecStore(Vec<Document>);

    #[async_trait]
    impl DocumentStore for VecStore {
        async fn fetch_collection(
            &self,
            _collection: &CollectionName,
        ) -> std::result::Result<Vec<Document>, StoreError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn documents(count: usize) -> Vec<Document> {
        (0..count)
            .map(|i| {
                json!({"_id": format!("id-{i}"), "rating": i % 5, "text": format!("review {i}")})
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect()
    }

    fn config(temp_dir: &TempDir, ratio: f64) -> IngestionConfig {
        IngestionConfig {
            collection_name: "reviews".to_string(),
            row_data_path: temp_dir.path().join("feature_store/data.csv"),
            train_file_name: temp_dir.path().join("ingested/train.csv"),
            test_file_name: temp_dir.path().join("ingested/test.csv"),
            train_test_split_ratio: ratio,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_collection_name() {
        let config = IngestionConfig {
            collection_name: "bad$name".to_string(),
            ..Default::default()
        };

        let result = DataIngestion::new(config, Arc::new(VecStore(vec![])));
        assert!(matches!(result, Err(HarvestError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_initiate_data_ingestion_returns_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir, 0.2);
        let ingestion =
            DataIngestion::new(config.clone(), Arc::new(VecStore(documents(100)))).unwrap();

        let artifact = ingestion.initiate_data_ingestion().await.unwrap();

        assert_eq!(artifact.trained_file_path(), config.train_file_name.as_path());
        assert_eq!(artifact.test_file_path(), config.test_file_name.as_path());

        let count_lines = |p: &std::path::Path| std::fs::read_to_string(p).unwrap().lines().count();
        assert_eq!(count_lines(&config.row_data_path), 101);
        assert_eq!(count_lines(&config.train_file_name), 81);
        assert_eq!(count_lines(&config.test_file_name), 21);
    }

    #[tokio::test]
    async fn test_operations_can_run_separately() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir, 0.25);
        let ingestion =
            DataIngestion::new(config.clone(), Arc::new(VecStore(documents(10)))).unwrap();

        let snapshot = ingestion.export_data_into_feature_store().await.unwrap();
        assert_eq!(snapshot.row_count(), 10);
        assert!(!config.train_file_name.exists());

        ingestion.split_data_as_train_test(&snapshot).unwrap();
        assert!(config.train_file_name.exists());
        assert!(config.test_file_name.exists());
    }

    #[tokio::test]
    async fn test_single_document_fails_before_split_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir, 0.2);
        let ingestion =
            DataIngestion::new(config.clone(), Arc::new(VecStore(documents(1)))).unwrap();

        let err = ingestion.initiate_data_ingestion().await.unwrap_err();

        assert!(matches!(
            err,
            HarvestError::Split(SplitError::EmptyPartition { train: 0, test: 1 })
        ));
        assert!(config.row_data_path.exists());
        assert!(!config.train_file_name.exists());
        assert!(!config.test_file_name.exists());
    }

    #[tokio::test]
    async fn test_empty_collection_writes_no_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir, 0.2);
        let ingestion = DataIngestion::new(config.clone(), Arc::new(VecStore(vec![]))).unwrap();

        let err = ingestion.initiate_data_ingestion().await.unwrap_err();

        assert_eq!(err.kind(), "store_fetch");
        assert!(!config.row_data_path.exists());
        assert!(!config.train_file_name.exists());
    }

    #[test]
    fn test_each_run_gets_its_own_id() {
        let first = DataIngestion::new(
            IngestionConfig {
                collection_name: "reviews".to_string(),
                ..Default::default()
            },
            Arc::new(VecStore(vec![])),
        )
        .unwrap();
        let second = DataIngestion::new(
            IngestionConfig {
                collection_name: "reviews".to_string(),
                ..Default::default()
            },
            Arc::new(VecStore(vec![])),
        )
        .unwrap();

        assert_ne!(first.run_id(), second.run_id());
        assert_eq!(first.collection().as_str(), "reviews");
    }
}
