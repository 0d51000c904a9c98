// Harvest - Document Collection Ingestion for ML Pipelines
// Copyright (c) 2025 Harvest Contributors
// Licensed under the MIT License

//! # Harvest - document collection ingestion
//!
//! Harvest exports a MongoDB collection into a CSV feature store and splits it
//! into reproducible train and test files for model training.
//!
//! ## Overview
//!
//! A single ingestion run:
//! - **Fetches** every document of a collection through the MongoDB Data API
//! - **Tabulates** the documents into a column-major [`domain::Snapshot`]
//! - **Persists** the snapshot as the raw feature store CSV
//! - **Splits** the rows with a seeded shuffle and writes train and test CSVs
//! - **Returns** a [`domain::DataIngestionArtifact`] naming the two files
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, split, persistence, orchestration)
//! - [`adapters`] - Document store integrations
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harvest::config::load_config;
//! use harvest::core::ingestion::DataIngestion;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("harvest.toml")?;
//!     let ingestion = DataIngestion::from_config(&config)?;
//!
//!     let artifact = ingestion.initiate_data_ingestion().await?;
//!     println!("{artifact}");
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Stores
//!
//! Any type implementing [`adapters::store::DocumentStore`] can feed an
//! ingestion run:
//!
//! ```rust,no_run
//! use harvest::adapters::store::{Document, DocumentStore};
//! use harvest::config::IngestionConfig;
//! use harvest::core::ingestion::DataIngestion;
//! use harvest::domain::{CollectionName, StoreError};
//! use std::sync::Arc;
//!
//! struct InMemory(Vec<Document>);
//!
//! #[async_trait::async_trait]
//! impl DocumentStore for InMemory {
//!     async fn fetch_collection(&self, _: &CollectionName) -> Result<Vec<Document>, StoreError> {
//!         Ok(self.0.clone())
//!     }
//!
//!     fn describe(&self) -> String {
//!         "in-memory".to_string()
//!     }
//! }
//!
//! # async fn example(docs: Vec<Document>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = IngestionConfig {
//!     collection_name: "reviews".to_string(),
//!     ..Default::default()
//! };
//! let ingestion = DataIngestion::new(config, Arc::new(InMemory(docs)))?;
//! let artifact = ingestion.initiate_data_ingestion().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible library operations return [`domain::HarvestError`]. The first
//! failure aborts a run and no artifact is produced.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
