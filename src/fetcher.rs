//! HTTP page fetching shared by the built-in engines.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::proxy::ProxyConfig;
use crate::{BackendError, BackendResult};

/// Default user agent for built-in engines.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) metasearch/0.1";

/// Plain HTTP fetcher built for one unit of work.
///
/// The client's overall request timeout is the unit deadline and every
/// request goes through the proxy, if one was given.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher for a single backend call.
    pub fn new(user_agent: &str, deadline: Duration, proxy: Option<&str>) -> BackendResult<Self> {
        let mut builder = Client::builder().user_agent(user_agent).timeout(deadline);

        if let Some(raw) = proxy {
            let proxy_config = ProxyConfig::parse(raw)?;
            debug!("Using proxy: {}:{}", proxy_config.host, proxy_config.port);
            builder = builder.proxy(proxy_config.to_reqwest()?);
        }

        let client = builder
            .build()
            .map_err(|e| BackendError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the body as text.
    pub async fn fetch(&self, url: &str) -> BackendResult<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Fetches `url` and decodes the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> BackendResult<T> {
        let body = self.fetch(url).await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}
