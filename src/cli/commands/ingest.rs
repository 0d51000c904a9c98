//! Ingest command implementation
//!
//! This module implements the `ingest` command, which runs a full data
//! ingestion: export the collection, split it and report the artifact.

use crate::config::load_config;
use crate::core::ingestion::DataIngestion;
use crate::domain::{DataIngestionArtifact, HarvestError};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Override the collection to export
    #[arg(long)]
    pub collection: Option<String>,

    /// Override the fraction of rows assigned to the test set
    #[arg(long, value_name = "RATIO")]
    pub split_ratio: Option<f64>,

    /// Write the resulting artifact as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub artifact_out: Option<PathBuf>,
}

impl IngestArgs {
    /// Execute the ingest command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting ingest command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(collection) = &self.collection {
            tracing::info!(collection = %collection, "Overriding collection from CLI");
            config.ingestion.collection_name = collection.clone();
        }

        if let Some(ratio) = self.split_ratio {
            tracing::info!(ratio = ratio, "Overriding split ratio from CLI");
            config.ingestion.train_test_split_ratio = ratio;
        }

        let ingestion = match DataIngestion::from_config(&config) {
            Ok(i) => i,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize ingestion");
                eprintln!("Failed to initialize ingestion: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🚀 Ingesting collection '{}'", ingestion.collection());
        println!("  Run ID: {}", ingestion.run_id());
        println!("  Database: {}", config.mongodb.database_name);
        println!(
            "  Split ratio: {}",
            config.ingestion.train_test_split_ratio
        );
        println!();

        let artifact = match ingestion.initiate_data_ingestion().await {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Ingestion failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("✅ Data ingestion completed");
        println!("  Raw data: {}", config.ingestion.row_data_path.display());
        println!("  Train file: {}", artifact.trained_file_path().display());
        println!("  Test file: {}", artifact.test_file_path().display());
        println!();

        if let Some(path) = &self.artifact_out {
            if let Err(e) = write_artifact(&artifact, path) {
                tracing::error!(error = %e, "Failed to write artifact");
                eprintln!("Failed to write artifact: {e}");
                return Ok(5);
            }
            println!("📝 Artifact written to {}", path.display());
        }

        Ok(0)
    }
}

/// Process exit code for a failed run
pub fn exit_code_for(error: &HarvestError) -> i32 {
    match error {
        HarvestError::Configuration(_) => 2,
        HarvestError::StoreFetch { .. } => 4,
        HarvestError::Io { .. } | HarvestError::Split(_) => 5,
    }
}

/// Serialize the artifact as pretty JSON to `path`
fn write_artifact(artifact: &DataIngestionArtifact, path: &Path) -> anyhow::Result<()> {
    crate::core::persist::ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(artifact)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SplitError, StoreError};
    use tempfile::TempDir;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&HarvestError::Configuration("bad".to_string())),
            2
        );
        assert_eq!(
            exit_code_for(&HarvestError::store_fetch(
                "reviews",
                StoreError::ConnectionFailed("refused".to_string())
            )),
            4
        );
        assert_eq!(
            exit_code_for(&HarvestError::Split(SplitError::InvalidRatio(1.5))),
            5
        );
    }

    #[test]
    fn test_write_artifact_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("artifact.json");
        let artifact = DataIngestionArtifact::new("a/train.csv", "a/test.csv");

        write_artifact(&artifact, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["trained_file_path"], "a/train.csv");
        assert_eq!(value["test_file_path"], "a/test.csv");
    }

    #[tokio::test]
    async fn test_missing_config_exits_with_configuration_code() {
        let args = IngestArgs {
            collection: None,
            split_ratio: None,
            artifact_out: None,
        };

        let code = args.execute("/nonexistent/harvest.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
