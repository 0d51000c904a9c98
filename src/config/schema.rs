//! Configuration schema types
//!
//! This module defines the configuration structure for Harvest. It maps
//! one-to-one onto the sections of `harvest.toml`.

use crate::config::SecretString;
use crate::domain::ids::CollectionName;
use crate::domain::snapshot::SnapshotOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Harvest configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Document store connection
    pub mongodb: MongoDbConfig,

    /// Export and split settings
    pub ingestion: IngestionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarvestConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.mongodb.validate()?;
        self.ingestion.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// MongoDB Data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoDbConfig {
    /// Data API endpoint URL.
    /// Format: https://data.mongodb-api.com/app/<app-id>/endpoint/data/v1
    pub data_api_url: String,

    /// Data API key
    /// Stored securely in memory and automatically zeroized on drop
    pub api_key: SecretString,

    /// Linked cluster name (the Data API "dataSource")
    #[serde(default = "default_data_source")]
    pub data_source: String,

    /// Database holding the collection
    pub database_name: String,

    /// Documents requested per `find` call
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl MongoDbConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.data_api_url.is_empty() {
            return Err("mongodb.data_api_url cannot be empty".to_string());
        }

        let url = url::Url::parse(&self.data_api_url)
            .map_err(|e| format!("mongodb.data_api_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("mongodb.data_api_url must start with http:// or https://".to_string());
        }

        if self.api_key.expose_secret().is_empty() {
            return Err("mongodb.api_key cannot be empty".to_string());
        }

        if self.data_source.is_empty() {
            return Err("mongodb.data_source cannot be empty".to_string());
        }

        if self.database_name.is_empty() {
            return Err("mongodb.database_name cannot be empty".to_string());
        }

        if !(1..=50_000).contains(&self.page_size) {
            return Err(format!(
                "mongodb.page_size must be between 1 and 50000, got {}",
                self.page_size
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("mongodb.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Export and train/test split configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Collection to export
    pub collection_name: String,

    /// Where the raw snapshot is written
    #[serde(default = "default_row_data_path")]
    pub row_data_path: PathBuf,

    /// Where the training split is written
    #[serde(default = "default_train_file_name")]
    pub train_file_name: PathBuf,

    /// Where the test split is written
    #[serde(default = "default_test_file_name")]
    pub test_file_name: PathBuf,

    /// Fraction of rows held out as the test set, strictly between 0 and 1
    #[serde(default = "default_split_ratio")]
    pub train_test_split_ratio: f64,

    /// Seed for the row permutation
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Fields removed from every document before tabulation
    #[serde(default = "default_drop_columns")]
    pub drop_columns: Vec<String>,

    /// String values read as null
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,

    /// Expand nested objects into `parent<sep>child` columns
    #[serde(default)]
    pub flatten_nested: bool,

    /// Separator used when flattening nested objects
    #[serde(default = "default_flatten_separator")]
    pub flatten_separator: String,
}

impl IngestionConfig {
    fn validate(&self) -> Result<(), String> {
        CollectionName::new(self.collection_name.as_str())
            .map_err(|e| format!("ingestion.collection_name is invalid: {e}"))?;

        for (key, path) in [
            ("row_data_path", &self.row_data_path),
            ("train_file_name", &self.train_file_name),
            ("test_file_name", &self.test_file_name),
        ] {
            if path.as_os_str().is_empty() {
                return Err(format!("ingestion.{key} cannot be empty"));
            }
        }

        if self.train_file_name == self.test_file_name {
            return Err(
                "ingestion.train_file_name and ingestion.test_file_name must differ".to_string(),
            );
        }

        let ratio = self.train_test_split_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(format!(
                "ingestion.train_test_split_ratio must be strictly between 0 and 1, got {ratio}"
            ));
        }

        if self.flatten_nested && self.flatten_separator.is_empty() {
            return Err(
                "ingestion.flatten_separator cannot be empty when flatten_nested is enabled"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Snapshot building options derived from this configuration
    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            drop_columns: self.drop_columns.clone(),
            null_markers: self.null_markers.clone(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            collection_name: String::new(),
            row_data_path: default_row_data_path(),
            train_file_name: default_train_file_name(),
            test_file_name: default_test_file_name(),
            train_test_split_ratio: default_split_ratio(),
            random_seed: default_random_seed(),
            drop_columns: default_drop_columns(),
            null_markers: default_null_markers(),
            flatten_nested: false,
            flatten_separator: default_flatten_separator(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_source() -> String {
    "Cluster0".to_string()
}

fn default_page_size() -> usize {
    1000
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_row_data_path() -> PathBuf {
    PathBuf::from("artifact/data_ingestion/feature_store/data.csv")
}

fn default_train_file_name() -> PathBuf {
    PathBuf::from("artifact/data_ingestion/ingested/train.csv")
}

fn default_test_file_name() -> PathBuf {
    PathBuf::from("artifact/data_ingestion/ingested/test.csv")
}

fn default_split_ratio() -> f64 {
    0.25
}

fn default_random_seed() -> u64 {
    42
}

fn default_drop_columns() -> Vec<String> {
    vec!["_id".to_string()]
}

fn default_null_markers() -> Vec<String> {
    vec!["na".to_string()]
}

fn default_flatten_separator() -> String {
    ".".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
