//! Seeded train/test partitioning

pub mod splitter;

pub use splitter::{
    partition_indices, test_row_count, train_test_split, SplitCounts, SplitResult, Splitter,
};
