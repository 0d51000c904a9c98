//! Document transformation applied before tabulation

pub mod flatten;

pub use flatten::flatten_document;
