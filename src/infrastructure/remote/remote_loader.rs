//! Generic remote loader: HTTP port + pure mapper + fixed URL.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::LoadError;
use crate::domain::ports::{HttpClientPort, HttpResponse, ResourceLoader};

/// Loads a typed resource from one URL through the HTTP port.
///
/// Transport failures surface as `Connectivity`; everything about the
/// response is judged by the mapper.
pub struct RemoteLoader<R> {
    http: Arc<dyn HttpClientPort>,
    url: String,
    mapper: fn(&HttpResponse) -> Result<R, LoadError>,
}

impl<R> RemoteLoader<R> {
    /// Creates a loader for `url` using `mapper` to type the response.
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        url: impl Into<String>,
        mapper: fn(&HttpResponse) -> Result<R, LoadError>,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            mapper,
        }
    }

    /// The URL this loader targets.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<R: Send + Sync> ResourceLoader for RemoteLoader<R> {
    type Resource = R;

    async fn load(&self) -> Result<R, LoadError> {
        let response = self.http.get(&self.url).await?;
        (self.mapper)(&response)
    }
}
