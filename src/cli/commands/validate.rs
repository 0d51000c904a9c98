//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Harvest configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Data API: {}", config.mongodb.data_api_url);
        println!("  Data Source: {}", config.mongodb.data_source);
        println!("  Database: {}", config.mongodb.database_name);
        println!("  Page Size: {}", config.mongodb.page_size);
        println!("  Collection: {}", config.ingestion.collection_name);
        println!(
            "  Raw Data Path: {}",
            config.ingestion.row_data_path.display()
        );
        println!("  Train File: {}", config.ingestion.train_file_name.display());
        println!("  Test File: {}", config.ingestion.test_file_name.display());
        println!(
            "  Split Ratio: {}",
            config.ingestion.train_test_split_ratio
        );
        println!("  Random Seed: {}", config.ingestion.random_seed);
        println!("  Dropped Columns: {:?}", config.ingestion.drop_columns);
        println!();
        Ok(0)
    }
}
