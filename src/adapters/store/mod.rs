//! Document store abstraction layer
//!
//! The exporter only sees [`DocumentStore`]; concrete stores live in sibling
//! adapter modules.

pub mod traits;

pub use traits::{Document, DocumentStore};
