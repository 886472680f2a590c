// src/fetch/http.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};

use super::{FetchError, SnapshotSource};
use crate::snapshot::Resource;

/// Fetches `{base}/{resource}.json` over HTTP with caching disabled end to end:
/// no-cache request headers plus a timestamp query parameter so intermediate
/// proxies cannot serve a stale export.
pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base: impl Into<String>, connect_timeout: Duration, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("news-digest/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self::with_client(base, client))
    }

    pub fn with_client(base: impl Into<String>, client: reqwest::Client) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base, client }
    }

    pub fn url_for(&self, resource: Resource) -> String {
        format!(
            "{}/{}?t={}",
            self.base,
            resource.file_name(),
            chrono::Utc::now().timestamp_millis()
        )
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch_bytes(&self, resource: Resource) -> Result<Vec<u8>, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            resource,
            message: e.to_string(),
        };

        let resp = self
            .client
            .get(self.url_for(resource))
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
