//! Disk-backed feed store persisting the snapshot as a JSON envelope.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::{CacheEntry, FeedImage};
use crate::domain::errors::StoreError;
use crate::domain::ports::FeedStorePort;

const SNAPSHOT_FILE: &str = "feed.json";

/// Stores the single feed snapshot as `feed.json` under a cache directory.
///
/// A corrupt snapshot is treated as a miss, not an error, so a bad write
/// never wedges the pipeline; the next successful remote load overwrites it.
pub struct DiskFeedStore {
    path: PathBuf,
}

impl DiskFeedStore {
    /// Creates the store under `cache_dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be created.
    pub async fn new(cache_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let cache_dir = cache_dir.as_ref();
        fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| StoreError::io(format!("failed to create cache dir: {e}")))?;

        Ok(Self {
            path: cache_dir.join(SNAPSHOT_FILE),
        })
    }
}

#[async_trait]
impl FeedStorePort for DiskFeedStore {
    async fn retrieve(&self) -> Result<Option<CacheEntry<Vec<FeedImage>>>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(format!("failed to read snapshot: {e}"))),
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt feed snapshot, treating as miss");
                Ok(None)
            }
        }
    }

    async fn insert(&self, entry: CacheEntry<Vec<FeedImage>>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| StoreError::corrupt(format!("failed to encode snapshot: {e}")))?;

        fs::write(&self.path, bytes)
            .await
            .map_err(|e| StoreError::io(format!("failed to write snapshot: {e}")))?;

        debug!(path = %self.path.display(), count = entry.value.len(), "stored feed snapshot");
        Ok(())
    }

    async fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted feed snapshot");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(format!("failed to delete snapshot: {e}"))),
        }
    }
}
