//! Remote slider document fetch
//!
//! One GET per call, bounded by the request timeout, no retry.

use crate::{Error, Result, config::Settings, types::ConfigDocument};
use reqwest::{Client, Proxy, StatusCode, header::ACCEPT};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of remote configuration documents
#[async_trait::async_trait]
pub trait RemoteSource: Send + Sync + std::fmt::Debug {
    /// Fetch and parse the document at `url`
    async fn fetch(&self, url: &str) -> Result<ConfigDocument>;
}

/// HTTP implementation of [`RemoteSource`]
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
    timeout: Duration,
}

impl RemoteFetcher {
    /// Build a fetcher from the network settings, honouring the proxy variables
    pub fn new(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.network.request_timeout);
        let mut client_builder = Client::builder()
            .user_agent(settings.network.user_agent.clone())
            .timeout(timeout);

        if let Some(proxy_url) = settings.get_proxy_url() {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                crate::Error::config("proxy", &format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            client_builder = client_builder.proxy(proxy);
        } else {
            client_builder = client_builder.no_proxy();
        }

        let client = client_builder.build().map_err(|e| {
            crate::Error::internal(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl RemoteSource for RemoteFetcher {
    async fn fetch(&self, url: &str) -> Result<ConfigDocument> {
        debug!("Fetching remote calculator config from {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!("Remote config request to {} failed: {}", url, e);
                Error::RemoteTransport {
                    url: url.to_string(),
                    source: e,
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Remote config at {} answered HTTP {}", url, status);
            return Err(Error::RemoteHttp {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| Error::RemoteTransport {
            url: url.to_string(),
            source: e,
        })?;

        ConfigDocument::from_json(&body).map_err(|reason| {
            warn!("Remote config at {} is invalid: {}", url, reason);
            Error::remote_invalid(url.to_string(), reason)
        })
    }
}
