//! Train/test splitting
//!
//! Rows are permuted with a seeded ChaCha8 generator and cut in two: the
//! first `ceil(ratio × rows)` permuted rows are the test set, the remaining
//! rows the training set. The same snapshot and seed always give the same
//! partition, on every platform.

use crate::config::IngestionConfig;
use crate::core::persist::write_snapshot_csv;
use crate::domain::errors::SplitError;
use crate::domain::snapshot::Snapshot;
use crate::domain::Result;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::Span;

/// Train and test subsets of a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Training rows
    pub train: Snapshot,
    /// Test rows
    pub test: Snapshot,
}

/// Row counts of a persisted split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    /// Rows written to the training file
    pub train_rows: usize,
    /// Rows written to the test file
    pub test_rows: usize,
}

/// Number of test rows for `total` rows at `ratio`
///
/// Rounds up, ignoring floating-point noise in the product so that
/// `0.7 × 10` gives 7 rather than 8.
///
/// # Errors
///
/// Returns [`SplitError::InvalidRatio`] unless `0 < ratio < 1`.
pub fn test_row_count(total: usize, ratio: f64) -> std::result::Result<usize, SplitError> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(SplitError::InvalidRatio(ratio));
    }
    let exact = ratio * total as f64;
    Ok((exact * (1.0 - 4.0 * f64::EPSILON)).ceil() as usize)
}

/// Partition `0..total` into (train, test) index lists
///
/// # Errors
///
/// Returns [`SplitError::InvalidRatio`] for a ratio outside (0, 1) and
/// [`SplitError::EmptyPartition`] when either side would be empty.
pub fn partition_indices(
    total: usize,
    ratio: f64,
    seed: u64,
) -> std::result::Result<(Vec<usize>, Vec<usize>), SplitError> {
    let test_rows = test_row_count(total, ratio)?.min(total);
    let train_rows = total - test_rows;
    if train_rows == 0 || test_rows == 0 {
        return Err(SplitError::EmptyPartition {
            train: train_rows,
            test: test_rows,
        });
    }

    let mut indices: Vec<usize> = (0..total).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(test_rows);
    Ok((train, indices))
}

/// Split a snapshot into train and test subsets
///
/// # Examples
///
/// ```
/// use harvest::core::split::train_test_split;
/// use harvest::domain::{Snapshot, SnapshotOptions};
/// use serde_json::json;
///
/// let docs = (0..100).map(|i| json!({"n": i}).as_object().unwrap().clone());
/// let snapshot = Snapshot::from_documents(docs, &SnapshotOptions::default());
///
/// let split = train_test_split(&snapshot, 0.2, 42).unwrap();
/// assert_eq!(split.train.row_count(), 80);
/// assert_eq!(split.test.row_count(), 20);
/// ```
pub fn train_test_split(
    snapshot: &Snapshot,
    ratio: f64,
    seed: u64,
) -> std::result::Result<SplitResult, SplitError> {
    let (train, test) = partition_indices(snapshot.row_count(), ratio, seed)?;
    Ok(SplitResult {
        train: snapshot.take(&train),
        test: snapshot.take(&test),
    })
}

/// Splits snapshots and writes the two subsets to their configured paths
///
/// Log events are emitted under the span injected at construction.
pub struct Splitter {
    ratio: f64,
    seed: u64,
    train_path: PathBuf,
    test_path: PathBuf,
    span: Span,
}

impl Splitter {
    /// Create a splitter from the ingestion configuration
    pub fn new(config: &IngestionConfig, span: Span) -> Self {
        Self {
            ratio: config.train_test_split_ratio,
            seed: config.random_seed,
            train_path: config.train_file_name.clone(),
            test_path: config.test_file_name.clone(),
            span,
        }
    }

    /// Split the snapshot and write train then test file
    ///
    /// The partition is computed and checked before anything is written. A
    /// failure while writing the test file leaves the train file in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::HarvestError::Split`] for an invalid ratio or
    /// empty partition and [`crate::domain::HarvestError::Io`] for write failures.
    pub fn split_and_persist(&self, snapshot: &Snapshot) -> Result<SplitCounts> {
        tracing::info!(
            parent: &self.span,
            rows = snapshot.row_count(),
            ratio = self.ratio,
            seed = self.seed,
            "Splitting data into train and test sets"
        );

        let split = train_test_split(snapshot, self.ratio, self.seed)?;

        tracing::info!(
            parent: &self.span,
            train_path = %self.train_path.display(),
            test_path = %self.test_path.display(),
            "Exporting train and test files"
        );

        let train_rows = write_snapshot_csv(&split.train, &self.train_path)?;
        let test_rows = write_snapshot_csv(&split.test, &self.test_path)?;

        tracing::info!(
            parent: &self.span,
            train_rows = train_rows,
            test_rows = test_rows,
            "Train and test data saved"
        );

        Ok(SplitCounts {
            train_rows,
            test_rows,
        })
    }
}
