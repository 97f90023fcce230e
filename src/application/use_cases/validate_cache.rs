//! Cache maintenance use case.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::LocalFeedLoader;

/// Expiry sweep triggered when the application leaves the foreground.
pub struct ValidateCacheUseCase {
    local: Arc<LocalFeedLoader>,
}

impl ValidateCacheUseCase {
    /// Creates the use case over the cache-policy loader.
    #[must_use]
    pub const fn new(local: Arc<LocalFeedLoader>) -> Self {
        Self { local }
    }

    /// Runs the sweep to completion. Failures are logged, never surfaced.
    pub async fn execute(&self) {
        debug!("running cache expiry sweep");
        self.local.validate_cache().await;
    }

    /// Fires the sweep without waiting for it.
    pub fn trigger(&self) {
        let local = Arc::clone(&self.local);
        tokio::spawn(async move {
            local.validate_cache().await;
        });
    }
}
