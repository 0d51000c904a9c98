//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HarvestConfig;
use super::secret::secret_string;
use crate::domain::errors::HarvestError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HarvestConfig
/// 4. Applies environment variable overrides (HARVEST_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`HarvestError::Configuration`] if any of the steps fail.
///
/// # Examples
///
/// ```no_run
/// use harvest::config::loader::load_config;
///
/// let config = load_config("harvest.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HarvestConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HarvestError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HarvestError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: HarvestConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        HarvestError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HarvestError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        HarvestError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using HARVEST_* prefix
///
/// Environment variables follow the pattern: HARVEST_<SECTION>_<KEY>
/// For example: HARVEST_MONGODB_API_KEY, HARVEST_INGESTION_COLLECTION_NAME
fn apply_env_overrides(config: &mut HarvestConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("HARVEST_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // MongoDB overrides
    if let Ok(val) = std::env::var("HARVEST_MONGODB_DATA_API_URL") {
        config.mongodb.data_api_url = val;
    }
    if let Ok(val) = std::env::var("HARVEST_MONGODB_API_KEY") {
        config.mongodb.api_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("HARVEST_MONGODB_DATA_SOURCE") {
        config.mongodb.data_source = val;
    }
    if let Ok(val) = std::env::var("HARVEST_MONGODB_DATABASE_NAME") {
        config.mongodb.database_name = val;
    }
    if let Ok(val) = std::env::var("HARVEST_MONGODB_PAGE_SIZE") {
        config.mongodb.page_size = parse_env("HARVEST_MONGODB_PAGE_SIZE", &val)?;
    }

    // Ingestion overrides
    if let Ok(val) = std::env::var("HARVEST_INGESTION_COLLECTION_NAME") {
        config.ingestion.collection_name = val;
    }
    if let Ok(val) = std::env::var("HARVEST_INGESTION_ROW_DATA_PATH") {
        config.ingestion.row_data_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("HARVEST_INGESTION_TRAIN_FILE_NAME") {
        config.ingestion.train_file_name = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("HARVEST_INGESTION_TEST_FILE_NAME") {
        config.ingestion.test_file_name = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("HARVEST_INGESTION_TRAIN_TEST_SPLIT_RATIO") {
        config.ingestion.train_test_split_ratio =
            parse_env("HARVEST_INGESTION_TRAIN_TEST_SPLIT_RATIO", &val)?;
    }
    if let Ok(val) = std::env::var("HARVEST_INGESTION_RANDOM_SEED") {
        config.ingestion.random_seed = parse_env("HARVEST_INGESTION_RANDOM_SEED", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HARVEST_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HARVEST_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
