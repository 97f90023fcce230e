//! Feed loading use case.

use std::sync::Arc;

use tracing::warn;

use crate::application::combinators::{CachingLoader, FallbackLoader};
use crate::application::services::LocalFeedLoader;
use crate::application::task::LoadTask;
use crate::domain::entities::FeedImage;
use crate::domain::errors::LoadError;
use crate::domain::ports::{ResourceCache, ResourceLoader};

/// The resilient feed pipeline: remote primary with best-effort cache
/// write-through, falling back to the local snapshot on failure.
pub struct LoadFeedUseCase {
    loader: Arc<dyn ResourceLoader<Resource = Vec<FeedImage>>>,
}

impl LoadFeedUseCase {
    /// Composes `remote` and `local` into the full pipeline.
    ///
    /// The graph is built once and owned here; collaborators arrive by
    /// explicit injection, never through globals.
    pub fn new(
        remote: Arc<dyn ResourceLoader<Resource = Vec<FeedImage>>>,
        local: Arc<LocalFeedLoader>,
    ) -> Self {
        let cache = Arc::clone(&local) as Arc<dyn ResourceCache<Resource = Vec<FeedImage>>>;
        let primary = CachingLoader::new(remote, cache);
        let loader = FallbackLoader::new(primary, local);
        Self {
            loader: Arc::new(loader),
        }
    }

    /// Performs one load through the pipeline.
    ///
    /// # Errors
    /// Returns the fallback's error when both remote and cache fail.
    pub async fn execute(&self) -> Result<Vec<FeedImage>, LoadError> {
        self.loader.load().await
    }

    /// Performs one load, recovering total failure to an empty feed.
    pub async fn execute_or_empty(&self) -> Vec<FeedImage> {
        match self.execute().await {
            Ok(images) => images,
            Err(error) => {
                warn!(%error, "feed load failed with no usable cache");
                Vec::new()
            }
        }
    }

    /// Spawns a cancellable load.
    #[must_use]
    pub fn spawn(&self) -> LoadTask<Vec<FeedImage>> {
        LoadTask::spawn(Arc::clone(&self.loader))
    }
}
