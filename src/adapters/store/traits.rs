//! Document store abstraction traits
//!
//! This module defines the trait that document store adapters must implement
//! to be exported by Harvest.

use crate::domain::errors::StoreError;
use crate::domain::ids::CollectionName;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A schema-less document: field name to JSON value, in stored field order
pub type Document = Map<String, Value>;

/// Read access to a document store
///
/// Implementations return every document of a collection with store-specific
/// encodings already reduced to plain JSON scalars.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch all documents of a collection
    ///
    /// # Arguments
    ///
    /// * `collection` - Collection to read
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be reached, rejects the
    /// credentials, or answers with something that is not a document list.
    async fn fetch_collection(&self, collection: &CollectionName) -> Result<Vec<Document>, StoreError>;

    /// Human-readable store description for logs (e.g. database name)
    fn describe(&self) -> String;
}
