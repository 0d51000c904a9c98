//! MongoDB adapter
//!
//! Talks to MongoDB through the Atlas Data API (HTTPS + JSON), so no native
//! driver is required.

pub mod client;
pub mod models;

pub use client::MongoDataApiClient;
pub use models::normalize_extended_json;
