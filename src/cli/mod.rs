//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Harvest using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Harvest - document collection ingestion for ML pipelines
#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(version, about, long_about = None)]
#[command(author = "Harvest Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "harvest.toml", env = "HARVEST_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HARVEST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the collection and write raw, train and test CSV files
    Ingest(commands::ingest::IngestArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_ingest() {
        let cli = Cli::parse_from(["harvest", "ingest"]);
        assert_eq!(cli.config, "harvest.toml");
        assert!(matches!(cli.command, Commands::Ingest(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["harvest", "--config", "custom.toml", "ingest"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["harvest", "--log-level", "debug", "ingest"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_ingest_overrides() {
        let cli = Cli::parse_from([
            "harvest",
            "ingest",
            "--collection",
            "reviews",
            "--artifact-out",
            "artifact.json",
        ]);
        match cli.command {
            Commands::Ingest(args) => {
                assert_eq!(args.collection.as_deref(), Some("reviews"));
                assert_eq!(
                    args.artifact_out.as_deref(),
                    Some(std::path::Path::new("artifact.json"))
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["harvest", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["harvest", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
