//! Domain error types
//!
//! This module defines the error hierarchy for Harvest. Each pipeline step
//! reports failures through one of a small set of explicit kinds, and every
//! kind keeps the originating cause so callers can decide on remediation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main Harvest error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Fetching the collection from the document store failed
    #[error("Failed to fetch collection '{collection}': {source}")]
    StoreFetch {
        /// Collection being exported
        collection: String,
        /// Underlying store failure
        #[source]
        source: StoreError,
    },

    /// Filesystem or CSV encoding failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Train/test partitioning failed
    #[error("Split error: {0}")]
    Split(#[from] SplitError),
}

impl HarvestError {
    /// Wraps a store failure for the given collection
    pub fn store_fetch(collection: impl Into<String>, source: StoreError) -> Self {
        HarvestError::StoreFetch {
            collection: collection.into(),
            source,
        }
    }

    /// Wraps an I/O failure for the given path
    pub fn io(path: impl AsRef<Path>, source: impl Into<std::io::Error>) -> Self {
        HarvestError::Io {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Short, stable name of the error kind for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            HarvestError::Configuration(_) => "configuration",
            HarvestError::StoreFetch { .. } => "store_fetch",
            HarvestError::Io { .. } => "io",
            HarvestError::Split(_) => "split",
        }
    }
}

/// Document store errors
///
/// Errors that occur when talking to the document store.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Credentials were rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The store answered with a non-success status
    #[error("Query failed: {status} - {message}")]
    QueryFailed {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The store answered with a body we could not interpret
    #[error("Invalid response from document store: {0}")]
    InvalidResponse(String),

    /// The collection holds no documents
    #[error("Collection '{0}' is empty")]
    EmptyCollection(String),
}

/// Train/test partitioning errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// Ratio outside the open interval (0, 1)
    #[error("Split ratio must be strictly between 0 and 1, got {0}")]
    InvalidRatio(f64),

    /// One side of the partition would hold no rows
    #[error("Split would produce an empty partition (train={train}, test={test})")]
    EmptyPartition {
        /// Rows assigned to the training set
        train: usize,
        /// Rows assigned to the test set
        test: usize,
    },
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HarvestError {
    fn from(err: toml::de::Error) -> Self {
        HarvestError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harvest_error_display() {
        let err = HarvestError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_fetch_keeps_source() {
        use std::error::Error as _;

        let err = HarvestError::store_fetch(
            "reviews",
            StoreError::ConnectionFailed("connection refused".to_string()),
        );
        assert!(err.to_string().contains("reviews"));
        assert_eq!(err.kind(), "store_fetch");

        let source = err.source().expect("source should be kept");
        assert!(source.to_string().contains("connection refused"));
    }

    #[test]
    fn test_io_error_includes_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HarvestError::io("/tmp/out/train.csv", io_err);
        assert!(matches!(err, HarvestError::Io { .. }));
        assert!(err.to_string().contains("/tmp/out/train.csv"));
    }

    #[test]
    fn test_split_error_conversion() {
        let err: HarvestError = SplitError::InvalidRatio(1.5).into();
        assert!(matches!(err, HarvestError::Split(SplitError::InvalidRatio(_))));
        assert_eq!(err.kind(), "split");
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: HarvestError = toml_err.into();
        assert!(matches!(err, HarvestError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_store_error_implements_std_error() {
        let err = StoreError::EmptyCollection("reviews".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
