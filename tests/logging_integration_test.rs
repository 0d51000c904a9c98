//! Integration tests for logging functionality
//!
//! A global subscriber can be installed once per process, so every check that
//! needs it lives in a single test.

use harvest::config::LoggingConfig;
use harvest::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_init_logging_writes_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(init_logging("verbose", &config).is_err());
    assert!(!log_path.exists());

    let guard = init_logging("info", &config).unwrap();
    // The default filter only admits the harvest target
    let span = tracing::info_span!(target: "harvest::core", "data_ingestion", run_id = "run-1");
    span.in_scope(|| {
        tracing::info!(target: "harvest::core", rows = 3, "Raw data saved to feature store");
    });
    drop(span);
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("harvest.log")).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("Raw data saved to feature store"))
        .unwrap();
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["fields"]["rows"], 3);
    assert_eq!(event["span"]["run_id"], "run-1");
}
