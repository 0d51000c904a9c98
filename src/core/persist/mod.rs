//! Persistence of snapshots to disk

pub mod csv;

pub use self::csv::{ensure_parent_dir, write_snapshot_csv};
