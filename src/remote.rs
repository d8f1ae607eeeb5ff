//! Remote organization catalog over a PostgREST-style HTTP API.
//!
//! Reads the `[remote]` table (Supabase exposes tables this way):
//!
//! | Operation | Request |
//! |-----------|---------|
//! | fetch all | `GET {url}/rest/v1/{table}?select=*` |
//! | fetch one | `GET {url}/rest/v1/{table}?select=*&id=eq.{id}` |
//!
//! When an API key is available it is sent both as `apikey` and as a
//! bearer token. Each call is a single attempt bounded by
//! `timeout_secs`; there is no retry.

use async_trait::async_trait;
use std::time::Duration;

use partner_match_core::catalog::{decode_rows, CatalogSource, FetchError};
use partner_match_core::models::Organization;

use crate::config::RemoteConfig;

/// [`CatalogSource`] backed by a remote REST table.
pub struct RestCatalog {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl RestCatalog {
    pub fn new(config: &RemoteConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            api_key: config.resolved_api_key(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_rows(&self, query: &[(&str, &str)]) -> Result<Vec<serde_json::Value>, FetchError> {
        let mut req = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "*")])
            .query(query)
            .header("Accept", "application/json");

        if let Some(ref key) = self.api_key {
            req = req.header("apikey", key).bearer_auth(key);
        }

        let resp = req.send().await.map_err(|e| self.map_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        resp.json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl CatalogSource for RestCatalog {
    fn name(&self) -> &str {
        "remote"
    }

    async fn fetch_all(&self) -> Result<Vec<Organization>, FetchError> {
        let rows = self.fetch_rows(&[]).await?;
        tracing::debug!(endpoint = %self.endpoint, rows = rows.len(), "fetched remote organizations");
        Ok(decode_rows(rows))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Organization>, FetchError> {
        let filter = format!("eq.{}", id);
        let rows = self.fetch_rows(&[("id", filter.as_str())]).await?;
        Ok(decode_rows(rows).into_iter().find(|o| o.id == id))
    }
}
