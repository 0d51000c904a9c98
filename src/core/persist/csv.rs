//! CSV persistence for snapshots
//!
//! Files get a header row with the column names and one record per row,
//! without an index column.

use crate::domain::errors::HarvestError;
use crate::domain::snapshot::Snapshot;
use crate::domain::Result;
use std::fs::{self, File};
use std::path::Path;

/// Create the parent directory of `path` if it does not exist
///
/// # Errors
///
/// Returns [`HarvestError::Io`] naming the directory that could not be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| HarvestError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Write a snapshot to `path` as CSV, creating parent directories
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns [`HarvestError::Io`] if a directory or the file cannot be created
/// or written.
///
/// # Examples
///
/// ```no_run
/// use harvest::core::persist::write_snapshot_csv;
/// use harvest::domain::{Snapshot, SnapshotOptions};
///
/// # fn example(snapshot: &Snapshot) -> harvest::domain::Result<()> {
/// let rows = write_snapshot_csv(snapshot, "artifact/feature_store/data.csv")?;
/// println!("wrote {rows} rows");
/// # Ok(())
/// # }
/// ```
pub fn write_snapshot_csv(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let file = File::create(path).map_err(|e| HarvestError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(snapshot.column_names())
        .map_err(|e| HarvestError::io(path, e))?;

    let mut written = 0;
    for row in snapshot.rendered_rows() {
        writer
            .write_record(&row)
            .map_err(|e| HarvestError::io(path, e))?;
        written += 1;
    }

    writer.flush().map_err(|e| HarvestError::io(path, e))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::SnapshotOptions;
    use serde_json::json;
    use tempfile::TempDir;

    fn snapshot() -> Snapshot {
        let docs = vec![
            json!({"_id": "1", "name": "Ada, Countess", "score": 1, "ok": true}),
            json!({"_id": "2", "name": "Bob", "score": 2.5}),
        ];
        Snapshot::from_documents(
            docs.into_iter().map(|d| d.as_object().cloned().unwrap()),
            &SnapshotOptions::default(),
        )
    }

    #[test]
    fn test_write_snapshot_creates_directories_and_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feature_store").join("nested").join("data.csv");

        let written = write_snapshot_csv(&snapshot(), &path).unwrap();

        assert_eq!(written, 2);
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "name,score,ok");
        assert_eq!(lines[1], "\"Ada, Countess\",1.0,True");
        assert_eq!(lines[2], "Bob,2.5,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_snapshot_reads_back_with_csv_reader() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        write_snapshot_csv(&snapshot(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["name", "score", "ok"]);
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn test_write_snapshot_reports_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_snapshot_csv(&snapshot(), blocker.join("data.csv")).unwrap_err();

        assert!(matches!(err, HarvestError::Io { .. }));
    }

    #[test]
    fn test_ensure_parent_dir_with_bare_file_name() {
        assert!(ensure_parent_dir(Path::new("data.csv")).is_ok());
    }
}
