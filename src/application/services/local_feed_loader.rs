//! Cache-policy loader for the feed snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::entities::{CacheEntry, CachePolicy, FeedImage};
use crate::domain::errors::{LoadError, StoreError};
use crate::domain::ports::{Clock, FeedStorePort, ResourceCache, ResourceLoader};

/// Serves the stored feed snapshot while it is within max-age, writes new
/// snapshots, and sweeps expired ones.
///
/// No network activity happens here; the freshness decision is
/// [`CachePolicy`] applied to the stored timestamp and the injected clock.
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStorePort>,
    clock: Arc<dyn Clock>,
}

impl LocalFeedLoader {
    /// Creates a loader over `store` using `clock` for freshness decisions.
    pub fn new(store: Arc<dyn FeedStorePort>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Deletes the stored snapshot iff it has expired.
    ///
    /// Runs best-effort: read and delete failures are logged, never
    /// surfaced. Calling this on an already-swept or empty cache is a no-op,
    /// so the operation is idempotent.
    pub async fn validate_cache(&self) {
        match self.store.retrieve().await {
            Ok(Some(entry)) if !CachePolicy::is_valid(entry.timestamp, self.clock.now()) => {
                info!(timestamp = %entry.timestamp, "cached feed expired, deleting");
                if let Err(error) = self.store.delete().await {
                    warn!(%error, "failed to delete expired feed cache");
                }
            }
            Ok(Some(_)) => debug!("cached feed still valid, keeping"),
            Ok(None) => debug!("no cached feed to validate"),
            Err(error) => warn!(%error, "failed to read feed cache during validation"),
        }
    }
}

#[async_trait]
impl ResourceLoader for LocalFeedLoader {
    type Resource = Vec<FeedImage>;

    async fn load(&self) -> Result<Vec<FeedImage>, LoadError> {
        let entry = match self.store.retrieve().await {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "feed store read failed");
                return Err(LoadError::CacheEmpty);
            }
        };

        match entry {
            None => Err(LoadError::CacheEmpty),
            Some(entry) if CachePolicy::is_valid(entry.timestamp, self.clock.now()) => {
                debug!(count = entry.value.len(), "serving cached feed");
                Ok(entry.value)
            }
            Some(_) => Err(LoadError::CacheExpired),
        }
    }
}

#[async_trait]
impl ResourceCache for LocalFeedLoader {
    type Resource = Vec<FeedImage>;

    async fn save(&self, value: Vec<FeedImage>) -> Result<(), StoreError> {
        let entry = CacheEntry::new(value, self.clock.now());
        self.store.insert(entry).await
    }
}
