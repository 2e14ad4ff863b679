//! Remote record collection served by a PocketBase instance.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::db::repository::{ErrorContext, RecordSource, RepositoryError, RepositoryResult};
use crate::models::RawRecord;

/// Connection settings for the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PocketBaseConfig {
    /// Server root, e.g. `http://127.0.0.1:8090`
    pub base_url: String,
    /// Collection holding the interaction records
    pub collection: String,
    /// Records requested per fetch (the API's page size)
    pub per_page: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PocketBaseConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090".to_string(),
            collection: "interactions".to_string(),
            per_page: 500,
            timeout_secs: 10,
        }
    }
}

impl PocketBaseConfig {
    pub fn records_url(&self) -> String {
        format!(
            "{}/api/collections/{}/records?perPage={}",
            self.base_url.trim_end_matches('/'),
            self.collection,
            self.per_page
        )
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url.trim_end_matches('/'))
    }
}

/// One page of a collection listing; items stay untyped until each is checked.
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

pub struct PocketBaseSource {
    client: reqwest::Client,
    config: PocketBaseConfig,
}

impl PocketBaseSource {
    pub fn new(config: PocketBaseConfig) -> RepositoryResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "PocketBase source requires a base_url",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                RepositoryError::configuration(format!("Failed to build HTTP client: {}", e))
                    .with_source("pocketbase")
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PocketBaseConfig {
        &self.config
    }

    fn context(&self, operation: &str) -> ErrorContext {
        ErrorContext::new(operation)
            .with_source("pocketbase")
            .with_details(self.config.collection.clone())
    }
}

/// Decode every item that is a valid record; log and skip the rest.
fn decode_items(items: Vec<serde_json::Value>) -> Vec<RawRecord> {
    let total = items.len();
    let records: Vec<RawRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!("Skipped {} of {} remote records", total - records.len(), total);
    }
    records
}

#[async_trait]
impl RecordSource for PocketBaseSource {
    fn name(&self) -> &'static str {
        "pocketbase"
    }

    async fn fetch_all(&self) -> RepositoryResult<Vec<RawRecord>> {
        let url = self.config.records_url();
        debug!("Fetching records from {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("fetch_all").with_source("pocketbase"))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let mut context = self.context("fetch_all").with_status(status.as_u16());
            if status.is_server_error() {
                context = context.retryable();
            }
            return Err(RepositoryError::query_with_context(
                format!("Collection API error {}: {}", status, text),
                context,
            ));
        }

        let page: RecordPage = resp.json().await.map_err(|e| {
            RepositoryError::validation_with_context(
                format!("Failed to parse collection response: {}", e),
                self.context("fetch_all"),
            )
        })?;

        Ok(decode_items(page.items))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        let resp = self
            .client
            .get(self.config.health_url())
            .send()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("health_check").with_source("pocketbase"))?;
        Ok(resp.status().is_success())
    }
}
