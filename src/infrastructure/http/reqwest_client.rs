//! HTTP transport adapter backed by reqwest.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::LoadError;
use crate::domain::ports::{HttpClientPort, HttpResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production HTTP client.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be built.
    pub fn new() -> Result<Self, LoadError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be built.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(concat!("photofeed/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LoadError::connectivity(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, LoadError> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "request failed");
            if e.is_timeout() {
                LoadError::connectivity("request timed out")
            } else if e.is_connect() {
                LoadError::connectivity("failed to connect")
            } else {
                LoadError::connectivity(e.to_string())
            }
        })?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::connectivity(format!("failed to read body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
