//! HTTP transport port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::LoadError;

/// The response surface the core consumes: status class and body bytes only.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for the HTTP transport.
///
/// One call, one GET. Errors are connectivity failures only; non-2xx
/// statuses are returned as responses and judged by the mappers.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Performs a single GET against `url`.
    async fn get(&self, url: &str) -> Result<HttpResponse, LoadError>;
}
