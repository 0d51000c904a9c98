//! Ingestion run stages and summary reporting

use crate::domain::ids::{CollectionName, RunId};
use std::fmt;
use std::time::Duration;
use tracing::Span;

/// Progress of an ingestion run
///
/// A run moves `Start → Exported → Split → Done`; any failure moves it to
/// `Failed` from whichever stage was current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionStage {
    /// Nothing done yet
    Start,
    /// Raw snapshot written to the feature store
    Exported,
    /// Train and test files written
    Split,
    /// Artifact produced
    Done,
    /// Run aborted
    Failed,
}

impl IngestionStage {
    /// Stage reached after this one completes successfully
    pub fn next(self) -> Self {
        match self {
            IngestionStage::Start => IngestionStage::Exported,
            IngestionStage::Exported => IngestionStage::Split,
            IngestionStage::Split | IngestionStage::Done => IngestionStage::Done,
            IngestionStage::Failed => IngestionStage::Failed,
        }
    }

    /// Whether the run can make no further progress
    pub fn is_terminal(self) -> bool {
        matches!(self, IngestionStage::Done | IngestionStage::Failed)
    }
}

impl fmt::Display for IngestionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IngestionStage::Start => "start",
            IngestionStage::Exported => "exported",
            IngestionStage::Split => "split",
            IngestionStage::Done => "done",
            IngestionStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of a successful ingestion run
#[derive(Debug, Clone)]
pub struct IngestionSummary {
    /// Run identifier
    pub run_id: RunId,

    /// Exported collection
    pub collection: CollectionName,

    /// Rows in the raw snapshot
    pub total_rows: usize,

    /// Columns in the raw snapshot
    pub columns: usize,

    /// Rows in the training file
    pub train_rows: usize,

    /// Rows in the test file
    pub test_rows: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl IngestionSummary {
    /// Create an empty summary for a run
    pub fn new(run_id: RunId, collection: CollectionName) -> Self {
        Self {
            run_id,
            collection,
            total_rows: 0,
            columns: 0,
            train_rows: 0,
            test_rows: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fraction of rows that went to the test file
    pub fn test_fraction(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        self.test_rows as f64 / self.total_rows as f64
    }

    /// Log the summary under `span`
    pub fn log_summary(&self, span: &Span) {
        tracing::info!(
            parent: span,
            run_id = %self.run_id,
            collection = %self.collection,
            total_rows = self.total_rows,
            columns = self.columns,
            train_rows = self.train_rows,
            test_rows = self.test_rows,
            test_fraction = format!("{:.3}", self.test_fraction()),
            duration_ms = self.duration.as_millis() as u64,
            "Data ingestion completed"
        );
    }
}
