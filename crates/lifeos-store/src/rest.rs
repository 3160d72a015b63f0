//! PostgREST-compatible remote store
//!
//! Talks to a `/rest/v1/<table>` endpoint the way a Supabase project exposes
//! its tables. Each table is expected to have an `id` column assigned by the
//! database on insert.
//!
//! # Features
//!
//! - Service-key authentication (`apikey` and bearer headers)
//! - Per-request timeout
//! - Retry with exponential backoff for reads only; inserts are sent once
//!   because a retried insert can double-write
//!
//! # Examples
//!
//! ```no_run
//! use lifeos_store::{RestConfig, RestStore};
//!
//! let store = RestStore::new(RestConfig::new("https://project.supabase.co", "service-key")).unwrap();
//! ```

use crate::StoreError;
use async_trait::async_trait;
use lifeos_domain::{FieldValue, KeyPredicate, RecordId, RecordStore, Row, StoredRecord, Table};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for store requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for read requests
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Connection settings for a remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://project.supabase.co`
    pub url: String,

    /// Service key sent as `apikey` and bearer token
    pub api_key: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts for idempotent reads
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl RestConfig {
    /// Settings with default timeout and retries
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Remote record store over a PostgREST API
pub struct RestStore {
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl RestStore {
    /// Build a store client from its settings
    ///
    /// Fails if the key cannot be sent as an HTTP header or the client
    /// cannot be constructed.
    pub fn new(config: RestConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::InvalidData(format!("api key is not a valid header: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| StoreError::InvalidData(format!("api key is not a valid header: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
            max_retries: config.max_retries.max(1),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.as_str())
    }

    /// PostgREST filter parameters for a key predicate
    pub(crate) fn key_query(key: &KeyPredicate) -> Vec<(String, String)> {
        key.fields
            .iter()
            .map(|(field, value)| {
                let rendered = match value {
                    FieldValue::Text(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.to_string(), format!("eq.{}", rendered))
            })
            .collect()
    }

    /// Parse the total from a `Content-Range` header such as `0-24/3573` or `*/0`
    pub(crate) fn parse_content_range(header: &str) -> Option<usize> {
        header.rsplit('/').next()?.trim().parse().ok()
    }

    /// Read the `id` column of a returned row
    pub(crate) fn row_id(row: &Row) -> Result<RecordId, StoreError> {
        match row.get("id") {
            Some(Value::String(s)) => RecordId::from_string(s).map_err(StoreError::InvalidData),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|v| RecordId::from_value(v as u128))
                .ok_or_else(|| StoreError::InvalidData(format!("invalid numeric id {}", n))),
            _ => Err(StoreError::InvalidData("returned row has no id".to_string())),
        }
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Send an idempotent request, retrying transport errors and 5xx answers
    async fn send_read<F>(&self, build: F) -> Result<Response, StoreError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let result = match build().send().await {
                Ok(response) => Self::check(response).await,
                Err(e) => Err(StoreError::Http(e)),
            };

            let retryable = match &result {
                Err(StoreError::Http(_)) => true,
                Err(StoreError::Status { status, .. }) => *status >= 500,
                _ => false,
            };
            if !retryable || attempts >= self.max_retries {
                return result;
            }

            // Exponential backoff: 250ms, 500ms, 1s, ...
            let delay = Duration::from_millis(250 * 2u64.pow(attempts - 1));
            warn!("Store read failed (attempt {}), retrying in {:?}", attempts, delay);
            tokio::time::sleep(delay).await;
        }
    }

    async fn post_rows(&self, table: Table, rows: &[Row]) -> Result<Vec<RecordId>, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        let returned: Vec<Row> = Self::check(response).await?.json().await?;
        debug!("Inserted {} row(s) into {}", returned.len(), table);
        returned.iter().map(Self::row_id).collect()
    }
}

#[async_trait]
impl RecordStore for RestStore {
    type Error = StoreError;

    async fn insert(&self, table: Table, row: Row) -> Result<RecordId, Self::Error> {
        let ids = self.post_rows(table, std::slice::from_ref(&row)).await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidData("insert returned no rows".to_string()))
    }

    async fn insert_batch(&self, table: Table, rows: Vec<Row>) -> Result<Vec<RecordId>, Self::Error> {
        self.post_rows(table, &rows).await
    }

    async fn find_one(
        &self,
        table: Table,
        key: &KeyPredicate,
    ) -> Result<Option<StoredRecord>, Self::Error> {
        let url = self.table_url(table);
        let filters = Self::key_query(key);
        let response = self
            .send_read(|| {
                self.client
                    .get(&url)
                    .query(&[("select", "*"), ("limit", "1")])
                    .query(&filters)
            })
            .await?;

        let rows: Vec<Row> = response.json().await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(StoredRecord {
                id: Self::row_id(&row)?,
                row,
            })),
            None => Ok(None),
        }
    }

    async fn count(&self, table: Table) -> Result<usize, Self::Error> {
        let url = self.table_url(table);
        let response = self
            .send_read(|| {
                self.client
                    .head(&url)
                    .query(&[("select", "id")])
                    .header("Prefer", "count=exact")
            })
            .await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(Self::parse_content_range)
            .ok_or_else(|| StoreError::InvalidData("missing Content-Range count".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_store_creation_trims_slash() {
        let store = RestStore::new(RestConfig::new("https://example.supabase.co/", "key")).unwrap();
        assert_eq!(
            store.table_url(Table::WorkHours),
            "https://example.supabase.co/rest/v1/work_hours"
        );
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = RestStore::new(RestConfig::new("https://example.supabase.co", "bad\nkey"));
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_key_query_renders_eq_filters() {
        let key = KeyPredicate::new()
            .eq("date", FieldValue::Date(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()))
            .eq("title", FieldValue::Text("Fixed the bug, finally".into()))
            .eq("hours", FieldValue::Number(6.0));

        assert_eq!(
            RestStore::key_query(&key),
            vec![
                ("date".to_string(), "eq.2026-02-14".to_string()),
                ("title".to_string(), "eq.Fixed the bug, finally".to_string()),
                ("hours".to_string(), "eq.6".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(RestStore::parse_content_range("0-24/3573"), Some(3573));
        assert_eq!(RestStore::parse_content_range("*/0"), Some(0));
        assert_eq!(RestStore::parse_content_range("0-24/*"), None);
    }

    #[test]
    fn test_row_id_variants() {
        let uuid_row: Row = serde_json::from_value(json!({"id": "3f2b8c1e-9a4d-4e7b-8c2a-1d5e6f7a8b9c"})).unwrap();
        assert!(RestStore::row_id(&uuid_row).is_ok());

        let int_row: Row = serde_json::from_value(json!({"id": 17})).unwrap();
        assert_eq!(RestStore::row_id(&int_row).unwrap(), RecordId::from_value(17));

        let no_id: Row = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert!(RestStore::row_id(&no_id).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_store_errors() {
        let mut config = RestConfig::new("http://127.0.0.1:9", "key");
        config.max_retries = 1;
        config.timeout_secs = 2;
        let store = RestStore::new(config).unwrap();

        let result = store.count(Table::Wins).await;
        assert!(matches!(result, Err(StoreError::Http(_))));
    }
}
