// Harvest - Document Collection Ingestion for ML Pipelines
// Copyright (c) 2025 Harvest Contributors
// Licensed under the MIT License

use clap::Parser;
use harvest::cli::{Cli, Commands};
use harvest::config::{load_config, LoggingConfig};
use harvest::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the config file when it loads; commands report
    // their own config errors
    let file_config = load_config(&cli.config).ok();
    let logging_config = match (&cli.command, &file_config) {
        (Commands::Ingest(_), Some(config)) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.map(|c| c.application.log_level))
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Harvest - Document Collection Ingestion"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Ingest(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
