//! HTTP client for the OpenKilda GUI backend

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};

use super::models::{CacheBuster, SwitchDetail, SwitchStoreConfig};
use super::store_setting::StoreConfigSource;
use crate::config::ApiConfig;

/// Read access to switch records
#[async_trait]
pub trait SwitchService: Send + Sync {
    /// Fetch one switch. `Ok(None)` when the backend has no such switch.
    async fn switch_detail(&self, switch_id: &str) -> Result<Option<SwitchDetail>>;

    async fn list_switches(&self) -> Result<Vec<SwitchDetail>>;
}

pub struct KildaClient {
    http: reqwest::Client,
    base_url: String,
    store_config_path: String,
}

impl KildaClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("API token contains invalid header characters")?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store_config_path: config.store_config_path.trim_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a JSON document. A 404 is reported as `None`, other non-2xx as errors.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        let url = self.url(path);
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        debug!("GET {} -> {} in {}ms", url, status, started.elapsed().as_millis());

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GET {} returned {}: {}", url, status, body);
            anyhow::bail!("GET {} returned {}", url, status);
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("Response from {} is not valid JSON", url))?;
        Ok(Some(value))
    }
}

#[async_trait]
impl SwitchService for KildaClient {
    async fn switch_detail(&self, switch_id: &str) -> Result<Option<SwitchDetail>> {
        let path = format!("switch/{}", urlencoding::encode(switch_id));
        match self.get_json(&path, &CacheBuster::now().as_query()).await? {
            Some(value) => SwitchDetail::from_value(value),
            None => Ok(None),
        }
    }

    async fn list_switches(&self) -> Result<Vec<SwitchDetail>> {
        let Some(value) = self.get_json("switch/list", &CacheBuster::now().as_query()).await? else {
            return Ok(Vec::new());
        };

        let Value::Array(records) = value else {
            anyhow::bail!("Switch list is not an array");
        };
        records.into_iter().map(SwitchDetail::from_record).collect()
    }
}

#[async_trait]
impl StoreConfigSource for KildaClient {
    async fn switch_store_config(&self, query: CacheBuster) -> Result<SwitchStoreConfig> {
        let value = self.get_json(&self.store_config_path, &query.as_query()).await?;
        match value {
            Some(value) => serde_json::from_value(value).context("Failed to parse switch store config"),
            None => Ok(SwitchStoreConfig::default()),
        }
    }
}
