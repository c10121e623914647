//! AKHQ HTTP client
//!
//! Performs one HTTP request per tool call against the configured base URL
//! and hands back the parsed JSON body.

use crate::config::DEFAULT_BASE_URL;
use crate::error::{AdapterError, Result};
use crate::mcp::HttpMethod;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Content type used for request bodies unless a tool says otherwise
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Shared, updatable AKHQ base URL
#[derive(Debug, Clone)]
pub struct BaseUrl(Arc<RwLock<String>>);

impl BaseUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(url.into())))
    }

    pub async fn get(&self) -> String {
        self.0.read().await.clone()
    }

    /// Replace the base URL. The value is not validated.
    pub async fn set(&self, url: impl Into<String>) {
        *self.0.write().await = url.into();
    }

    /// Swap in a new base URL and return the old one, under a single write lock.
    pub async fn replace(&self, url: impl Into<String>) -> String {
        let mut guard = self.0.write().await;
        std::mem::replace(&mut *guard, url.into())
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the AKHQ HTTP API
#[derive(Debug, Clone)]
pub struct Dispatcher {
    base_url: BaseUrl,
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new(base_url: BaseUrl, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Send one request to `path` (already templated) and parse the reply.
    ///
    /// The status code is not interpreted: AKHQ error bodies are JSON too and
    /// are returned as-is. An empty body yields `Value::Null`.
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Value>,
        content_type: Option<&str>,
    ) -> Result<Value> {
        let base = self.base_url.get().await;
        let url = format!("{}{}", base.trim_end_matches('/'), path);

        debug!("➡️  {} {}", method, url);

        let mut request = self
            .client
            .request(method.as_reqwest(), &url)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            let content_type = content_type.unwrap_or(DEFAULT_CONTENT_TYPE);
            let payload = match body {
                Value::String(raw) if content_type != DEFAULT_CONTENT_TYPE => raw.clone(),
                other => other.to_string(),
            };
            request = request.header(CONTENT_TYPE, content_type).body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!("⬅️  {} {} ({} bytes)", status, url, text.len());
        } else {
            warn!("⬅️  {} {}", status, url);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|source| AdapterError::InvalidJson {
            url,
            status: status.as_u16(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_base_url_defaults_to_localhost() {
        let base_url = BaseUrl::default();
        assert_eq!(base_url.get().await, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_base_url_shared_between_clones() {
        let base_url = BaseUrl::default();
        let dispatcher = Dispatcher::new(base_url.clone(), Duration::from_secs(1)).unwrap();

        base_url.set("http://akhq:9090").await;
        assert_eq!(dispatcher.base_url().get().await, "http://akhq:9090");
    }

    #[tokio::test]
    async fn test_replace_returns_previous() {
        let base_url = BaseUrl::default();
        assert_eq!(base_url.replace("http://a:1").await, "http://localhost:8080");
        assert_eq!(base_url.replace("http://b:2").await, "http://a:1");
        assert_eq!(base_url.get().await, "http://b:2");
    }

    #[tokio::test]
    async fn test_concurrent_replaces_chain() {
        let base_url = BaseUrl::default();
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let base_url = base_url.clone();
                tokio::spawn(async move { base_url.replace(format!("http://akhq-{}", i)).await })
            })
            .collect();

        let mut previous = Vec::new();
        for task in tasks {
            previous.push(task.await.unwrap());
        }
        previous.sort();
        previous.dedup();
        assert_eq!(previous.len(), 16);
        assert!(previous.contains(&"http://localhost:8080".to_string()));
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        let dispatcher = Dispatcher::new(BaseUrl::new("http://127.0.0.1:1"), Duration::from_secs(2)).unwrap();
        let err = dispatcher
            .request("/api/cluster", HttpMethod::Get, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Http(_)));
    }
}
