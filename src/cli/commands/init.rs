//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "harvest.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Harvest configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set HARVEST_MONGODB_API_KEY");
                println!("  3. Validate configuration: harvest validate-config");
                println!("  4. Run ingestion: harvest ingest");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Harvest Configuration File

[application]
log_level = "info"

[mongodb]
data_api_url = "https://data.mongodb-api.com/app/<app-id>/endpoint/data/v1"
api_key = "${HARVEST_MONGODB_API_KEY}"
data_source = "Cluster0"
database_name = "Proj1"

[ingestion]
collection_name = "reviews"
row_data_path = "artifact/data_ingestion/feature_store/data.csv"
train_file_name = "artifact/data_ingestion/ingested/train.csv"
test_file_name = "artifact/data_ingestion/ingested/test.csv"
train_test_split_ratio = 0.25

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Harvest Configuration File
# Exports a MongoDB collection to CSV and splits it into train/test sets

[application]
# Log level: trace, debug, info, warn, error
# RUST_LOG takes precedence when set
log_level = "info"

[mongodb]
# MongoDB Data API endpoint
# Format: https://data.mongodb-api.com/app/<app-id>/endpoint/data/v1
data_api_url = "https://data.mongodb-api.com/app/<app-id>/endpoint/data/v1"

# Data API key (use an environment variable)
api_key = "${HARVEST_MONGODB_API_KEY}"

# Linked cluster name
data_source = "Cluster0"

# Database holding the collection
database_name = "Proj1"

# Documents requested per page (1-50000)
page_size = 1000

# Request timeout in seconds
timeout_seconds = 60

[ingestion]
# Collection to export
collection_name = "reviews"

# Raw snapshot of the whole collection
row_data_path = "artifact/data_ingestion/feature_store/data.csv"

# Train and test outputs (must differ)
train_file_name = "artifact/data_ingestion/ingested/train.csv"
test_file_name = "artifact/data_ingestion/ingested/test.csv"

# Fraction of rows assigned to the test set, strictly between 0 and 1
train_test_split_ratio = 0.25

# Seed of the row shuffle; the same seed always gives the same split
random_seed = 42

# Columns removed from every snapshot
drop_columns = ["_id"]

# String values treated as missing
null_markers = ["na"]

# Flatten nested objects into parent.child columns
flatten_nested = false
flatten_separator = "."

[logging]
# Write JSON logs to a rolling file
local_enabled = true
local_path = "logs"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
