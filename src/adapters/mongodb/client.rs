//! MongoDB Data API client
//!
//! Reads whole collections through the Data API `find` action, paging with
//! `skip`/`limit` over an `_id`-sorted cursor so that pages never overlap.

use super::models::{normalize_extended_json, FindRequest, FindResponse};
use crate::adapters::store::{Document, DocumentStore};
use crate::config::MongoDbConfig;
use crate::domain::errors::StoreError;
use crate::domain::ids::CollectionName;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::time::Duration;

/// Document store backed by the MongoDB Data API
///
/// # Example
///
/// ```no_run
/// use harvest::adapters::mongodb::MongoDataApiClient;
/// use harvest::adapters::store::DocumentStore;
/// use harvest::config::load_config;
/// use harvest::domain::CollectionName;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("harvest.toml")?;
/// let client = MongoDataApiClient::new(config.mongodb)?;
///
/// let collection = CollectionName::new("reviews")?;
/// let documents = client.fetch_collection(&collection).await?;
/// println!("fetched {} documents", documents.len());
/// # Ok(())
/// # }
/// ```
pub struct MongoDataApiClient {
    client: Client,
    config: MongoDbConfig,
}

impl MongoDataApiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConnectionFailed`] if the HTTP client cannot be built.
    pub fn new(config: MongoDbConfig) -> Result<Self, StoreError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Builds the API URL for a specific action
    fn action_url(&self, action: &str) -> String {
        format!(
            "{}/action/{}",
            self.config.data_api_url.trim_end_matches('/'),
            action
        )
    }

    /// Fetches one page of documents
    async fn find_page(
        &self,
        collection: &CollectionName,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Value>, StoreError> {
        let request = FindRequest {
            data_source: &self.config.data_source,
            database: &self.config.database_name,
            collection: collection.as_str(),
            filter: json!({}),
            sort: json!({ "_id": 1 }),
            skip,
            limit,
        };

        let response = self
            .client
            .post(self.action_url("find"))
            .header("api-key", self.config.api_key.expose_secret().as_str())
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    StoreError::AuthenticationFailed(format!("status {status}: {body}"))
                }
                _ => StoreError::QueryFailed {
                    status: status.as_u16(),
                    message: body,
                },
            });
        }

        let page: FindResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse find response: {e}")))?;

        Ok(page.documents)
    }
}

#[async_trait]
impl DocumentStore for MongoDataApiClient {
    async fn fetch_collection(&self, collection: &CollectionName) -> Result<Vec<Document>, StoreError> {
        let page_size = self.config.page_size.max(1) as u64;
        let mut documents = Vec::new();
        let mut skip = 0u64;

        loop {
            let page = self.find_page(collection, skip, page_size).await?;
            let fetched = page.len() as u64;

            tracing::debug!(
                collection = %collection,
                skip = skip,
                fetched = fetched,
                "Fetched page"
            );

            for value in page {
                match normalize_extended_json(value) {
                    Value::Object(document) => documents.push(document),
                    other => {
                        return Err(StoreError::InvalidResponse(format!(
                            "Expected a document, got {other}"
                        )))
                    }
                }
            }

            if fetched < page_size {
                break;
            }
            skip += fetched;
        }

        Ok(documents)
    }

    fn describe(&self) -> String {
        format!(
            "mongodb-data-api {}/{}",
            self.config.data_source, self.config.database_name
        )
    }
}
