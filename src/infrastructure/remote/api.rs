//! Typed endpoints of the feed service.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{FeedImage, ImageComment};
use crate::domain::ports::HttpClientPort;

use super::{RemoteLoader, map_comments, map_feed};

/// Factory for the remote loaders of the feed service endpoints.
pub struct FeedApi {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
}

impl FeedApi {
    /// Creates the API facade for `base_url`.
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Loader for the feed endpoint.
    #[must_use]
    pub fn feed_loader(&self) -> RemoteLoader<Vec<FeedImage>> {
        RemoteLoader::new(
            Arc::clone(&self.http),
            format!("{}/feed", self.base_url),
            map_feed,
        )
    }

    /// Loader for the comment thread of one photo.
    #[must_use]
    pub fn comments_loader(&self, image_id: Uuid) -> RemoteLoader<Vec<ImageComment>> {
        RemoteLoader::new(
            Arc::clone(&self.http),
            format!("{}/image/{image_id}/comments", self.base_url),
            map_comments,
        )
    }
}
