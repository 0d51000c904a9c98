//! End-to-end ingestion tests against a mocked MongoDB Data API

use harvest::config::{
    secret_string, ApplicationConfig, HarvestConfig, IngestionConfig, LoggingConfig,
    MongoDbConfig,
};
use harvest::core::ingestion::DataIngestion;
use harvest::domain::{HarvestError, StoreError};
use mockito::Matcher;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

fn harvest_config(url: &str, temp_dir: &TempDir, page_size: usize) -> HarvestConfig {
    HarvestConfig {
        application: ApplicationConfig::default(),
        mongodb: MongoDbConfig {
            data_api_url: url.to_string(),
            api_key: secret_string("integration-key".to_string()),
            data_source: "Cluster0".to_string(),
            database_name: "Proj1".to_string(),
            page_size,
            timeout_seconds: 5,
        },
        ingestion: IngestionConfig {
            collection_name: "reviews".to_string(),
            row_data_path: temp_dir.path().join("artifact/feature_store/data.csv"),
            train_file_name: temp_dir.path().join("artifact/ingested/train.csv"),
            test_file_name: temp_dir.path().join("artifact/ingested/test.csv"),
            train_test_split_ratio: 0.2,
            ..Default::default()
        },
        logging: LoggingConfig::default(),
    }
}

fn review(i: usize) -> Value {
    json!({
        "_id": {"$oid": format!("{i:024x}")},
        "rating": {"$numberInt": (i % 5 + 1).to_string()},
        "review": if i % 10 == 0 { "na".to_string() } else { format!("review number {i}") },
        "verified": i % 2 == 0,
    })
}

fn page(range: std::ops::Range<usize>) -> String {
    json!({ "documents": range.map(review).collect::<Vec<_>>() }).to_string()
}

fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}

fn headers(path: &Path) -> Vec<String> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_reviews_collection_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    for (skip, range) in [(0, 0..40), (40, 40..80), (80, 80..100)] {
        mocks.push(
            server
                .mock("POST", "/action/find")
                .match_header("api-key", "integration-key")
                .match_body(Matcher::PartialJson(json!({ "skip": skip, "limit": 40 })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(page(range))
                .create_async()
                .await,
        );
    }

    let temp_dir = TempDir::new().unwrap();
    let config = harvest_config(&server.url(), &temp_dir, 40);

    let ingestion = DataIngestion::from_config(&config).unwrap();
    let artifact = ingestion.initiate_data_ingestion().await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }

    assert_eq!(
        artifact.trained_file_path(),
        config.ingestion.train_file_name.as_path()
    );
    assert_eq!(
        artifact.test_file_path(),
        config.ingestion.test_file_name.as_path()
    );

    let raw = &config.ingestion.row_data_path;
    assert_eq!(headers(raw), vec!["rating", "review", "verified"]);
    let raw_rows = read_rows(raw);
    assert_eq!(raw_rows.len(), 100);
    assert_eq!(&raw_rows[0][1], "");
    assert_eq!(&raw_rows[1][0], "2");
    assert_eq!(&raw_rows[1][2], "False");

    let train_rows = read_rows(artifact.trained_file_path());
    let test_rows = read_rows(artifact.test_file_path());
    assert_eq!(train_rows.len(), 80);
    assert_eq!(test_rows.len(), 20);
    assert_eq!(headers(artifact.trained_file_path()), headers(raw));
    assert_eq!(headers(artifact.test_file_path()), headers(raw));
}

#[tokio::test]
async fn test_same_seed_gives_same_split() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/action/find")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(0..30))
        .expect_at_least(2)
        .create_async()
        .await;

    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();

    for dir in [&first_dir, &second_dir] {
        let config = harvest_config(&server.url(), dir, 1000);
        DataIngestion::from_config(&config)
            .unwrap()
            .initiate_data_ingestion()
            .await
            .unwrap();
    }

    let first = std::fs::read_to_string(first_dir.path().join("artifact/ingested/test.csv")).unwrap();
    let second =
        std::fs::read_to_string(second_dir.path().join("artifact/ingested/test.csv")).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 7);
}

#[tokio::test]
async fn test_unreachable_store_writes_no_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = harvest_config("http://127.0.0.1:9", &temp_dir, 100);

    let err = DataIngestion::from_config(&config)
        .unwrap()
        .initiate_data_ingestion()
        .await
        .unwrap_err();

    match err {
        HarvestError::StoreFetch { collection, source } => {
            assert_eq!(collection, "reviews");
            assert!(matches!(source, StoreError::ConnectionFailed(_)));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!temp_dir.path().join("artifact").exists());
}

#[tokio::test]
async fn test_rejected_api_key_is_authentication_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/action/find")
        .with_status(401)
        .with_body(r#"{"error":"invalid session"}"#)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = harvest_config(&server.url(), &temp_dir, 100);

    let err = DataIngestion::from_config(&config)
        .unwrap()
        .initiate_data_ingestion()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HarvestError::StoreFetch {
            source: StoreError::AuthenticationFailed(_),
            ..
        }
    ));
    assert!(!config.ingestion.row_data_path.exists());
}

#[tokio::test]
async fn test_empty_collection_fails_fast() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/action/find")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"documents":[]}"#)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = harvest_config(&server.url(), &temp_dir, 100);

    let err = DataIngestion::from_config(&config)
        .unwrap()
        .initiate_data_ingestion()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HarvestError::StoreFetch {
            source: StoreError::EmptyCollection(_),
            ..
        }
    ));
    assert!(!temp_dir.path().join("artifact").exists());
}

#[test]
fn test_invalid_configuration_is_rejected_before_running() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = harvest_config("http://127.0.0.1:9", &temp_dir, 100);
    config.ingestion.train_test_split_ratio = 0.0;

    assert!(matches!(
        DataIngestion::from_config(&config),
        Err(HarvestError::Configuration(_))
    ));
}
