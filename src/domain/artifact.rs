//! Data ingestion artifact
//!
//! The artifact is the handle returned to the caller of an ingestion run.
//! It only references the produced split files; it owns no data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Paths of the train and test files produced by an ingestion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIngestionArtifact {
    /// Path of the training split
    pub trained_file_path: PathBuf,

    /// Path of the test split
    pub test_file_path: PathBuf,
}

impl DataIngestionArtifact {
    /// Creates a new artifact
    pub fn new(trained_file_path: impl Into<PathBuf>, test_file_path: impl Into<PathBuf>) -> Self {
        Self {
            trained_file_path: trained_file_path.into(),
            test_file_path: test_file_path.into(),
        }
    }

    /// Path of the training split
    pub fn trained_file_path(&self) -> &Path {
        &self.trained_file_path
    }

    /// Path of the test split
    pub fn test_file_path(&self) -> &Path {
        &self.test_file_path
    }
}

impl fmt::Display for DataIngestionArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataIngestionArtifact(trained_file_path={}, test_file_path={})",
            self.trained_file_path.display(),
            self.test_file_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let artifact = DataIngestionArtifact::new("out/train.csv", "out/test.csv");
        assert_eq!(artifact.trained_file_path(), Path::new("out/train.csv"));
        assert_eq!(artifact.test_file_path(), Path::new("out/test.csv"));
    }

    #[test]
    fn test_artifact_json_field_names() {
        let artifact = DataIngestionArtifact::new("train.csv", "test.csv");
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["trained_file_path"], "train.csv");
        assert_eq!(json["test_file_path"], "test.csv");
    }

    #[test]
    fn test_artifact_display() {
        let artifact = DataIngestionArtifact::new("a.csv", "b.csv");
        assert_eq!(
            artifact.to_string(),
            "DataIngestionArtifact(trained_file_path=a.csv, test_file_path=b.csv)"
        );
    }
}
