//! Disk-backed image blob store keyed by URL digest.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::entities::CacheEntry;
use crate::domain::errors::StoreError;
use crate::domain::ports::ImageStorePort;

/// Maximum disk usage in bytes (200 MB default).
pub const DEFAULT_MAX_DISK_CACHE_SIZE: u64 = 200 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
struct BlobMeta {
    timestamp: DateTime<Utc>,
}

/// Persists one blob per URL as `<sha256(url)>.img` plus a `.meta` sidecar
/// carrying the persisted timestamp. Blobs missing their sidecar read as
/// misses.
pub struct DiskImageStore {
    cache_dir: PathBuf,
    max_size: u64,
    current_size: AtomicU64,
    item_count: AtomicUsize,
}

impl DiskImageStore {
    /// Creates the store under `cache_dir`, scanning existing blobs for
    /// size accounting.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be created or read.
    pub async fn new(cache_dir: PathBuf, max_size: u64) -> Result<Self, StoreError> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| StoreError::io(format!("failed to create cache dir: {e}")))?;

        let mut total_size = 0u64;
        let mut count = 0usize;

        let mut entries = fs::read_dir(&cache_dir)
            .await
            .map_err(|e| StoreError::io(format!("failed to read cache dir: {e}")))?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "img")
                && let Ok(meta) = entry.metadata().await
            {
                total_size += meta.len();
                count += 1;
            }
        }

        let store = Self {
            cache_dir,
            max_size,
            current_size: AtomicU64::new(total_size),
            item_count: AtomicUsize::new(count),
        };

        store.cleanup_if_needed().await;

        Ok(store)
    }

    fn blob_path(&self, url: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        self.cache_dir.join(format!("{digest}.img"))
    }

    fn meta_path(&self, url: &str) -> PathBuf {
        self.blob_path(url).with_extension("meta")
    }

    /// Current disk usage in bytes.
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    /// Number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.item_count.load(Ordering::Relaxed)
    }

    /// Returns true if no blobs are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every stored blob.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be read.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = fs::read_dir(&self.cache_dir)
            .await
            .map_err(|e| StoreError::io(format!("failed to read cache dir: {e}")))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(format!("failed to read entry: {e}")))?
        {
            let path = entry.path();
            let is_ours = path
                .extension()
                .is_some_and(|ext| ext == "img" || ext == "meta");
            if is_ours && fs::remove_file(&path).await.is_err() {
                warn!(path = %path.display(), "failed to remove cache file");
            }
        }
        self.current_size.store(0, Ordering::Relaxed);
        self.item_count.store(0, Ordering::Relaxed);
        debug!("cleared disk image store");
        Ok(())
    }

    /// Deletes oldest blobs until usage is back under the limit.
    async fn cleanup_if_needed(&self) {
        let current_size = self.current_size();
        if current_size <= self.max_size {
            return;
        }

        debug!(current_size, max_size = self.max_size, "disk store over limit, cleaning up");

        let Ok(mut entries) = fs::read_dir(&self.cache_dir).await else {
            return;
        };

        let mut files: Vec<(PathBuf, std::time::SystemTime, u64)> = Vec::new();

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "img") {
                continue;
            }
            if let Ok(meta) = entry.metadata().await {
                let modified = meta.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                files.push((path, modified, meta.len()));
            }
        }

        files.sort_by_key(|(_, time, _)| *time);

        let mut freed_size = 0u64;
        let mut freed_count = 0usize;
        let target = current_size - self.max_size + (self.max_size / 10);

        for (path, _, size) in files {
            if freed_size >= target {
                break;
            }

            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "failed to remove old blob");
            } else {
                let _ = fs::remove_file(path.with_extension("meta")).await;
                freed_size += size;
                freed_count += 1;
            }
        }
        self.current_size.fetch_sub(freed_size, Ordering::Relaxed);
        self.item_count.fetch_sub(freed_count, Ordering::Relaxed);

        debug!(freed_size, freed_count, "disk store cleanup complete");
    }
}

#[async_trait]
impl ImageStorePort for DiskImageStore {
    async fn retrieve(&self, url: &str) -> Result<Option<CacheEntry<Bytes>>, StoreError> {
        let blob_path = self.blob_path(url);
        let bytes = match fs::read(&blob_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(url, "disk store miss");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(format!("failed to read blob: {e}"))),
        };

        let meta_bytes = match fs::read(self.meta_path(url)).await {
            Ok(bytes) => bytes,
            Err(_) => {
                warn!(url, "blob has no timestamp sidecar, treating as miss");
                return Ok(None);
            }
        };

        let meta: BlobMeta = match serde_json::from_slice(&meta_bytes) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(url, error = %e, "corrupt timestamp sidecar, treating as miss");
                return Ok(None);
            }
        };

        trace!(url, "disk store hit");
        Ok(Some(CacheEntry::new(Bytes::from(bytes), meta.timestamp)))
    }

    async fn insert(&self, url: &str, entry: CacheEntry<Bytes>) -> Result<(), StoreError> {
        let blob_path = self.blob_path(url);

        let old_size = fs::metadata(&blob_path).await.map(|m| m.len()).ok();

        fs::write(&blob_path, &entry.value)
            .await
            .map_err(|e| StoreError::io(format!("failed to write blob: {e}")))?;

        let meta = serde_json::to_vec(&BlobMeta {
            timestamp: entry.timestamp,
        })
        .map_err(|e| StoreError::corrupt(format!("failed to encode sidecar: {e}")))?;

        fs::write(self.meta_path(url), meta)
            .await
            .map_err(|e| StoreError::io(format!("failed to write sidecar: {e}")))?;

        let new_size = entry.value.len() as u64;
        if let Some(old) = old_size {
            if new_size > old {
                self.current_size.fetch_add(new_size - old, Ordering::Relaxed);
            } else {
                self.current_size.fetch_sub(old - new_size, Ordering::Relaxed);
            }
        } else {
            self.current_size.fetch_add(new_size, Ordering::Relaxed);
            self.item_count.fetch_add(1, Ordering::Relaxed);
        }

        debug!(url, size = entry.value.len(), "stored image blob");

        self.cleanup_if_needed().await;

        Ok(())
    }

    async fn delete(&self, url: &str) -> Result<(), StoreError> {
        let blob_path = self.blob_path(url);
        let size = fs::metadata(&blob_path).await.map(|m| m.len()).ok();

        match fs::remove_file(&blob_path).await {
            Ok(()) => {
                let _ = fs::remove_file(self.meta_path(url)).await;
                if let Some(s) = size {
                    self.current_size.fetch_sub(s, Ordering::Relaxed);
                    self.item_count.fetch_sub(1, Ordering::Relaxed);
                }
                debug!(url, "deleted image blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(format!("failed to delete blob: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    use super::*;

    async fn create_test_store() -> (DiskImageStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskImageStore::new(temp_dir.path().to_path_buf(), 1024 * 1024)
            .await
            .unwrap();
        (store, temp_dir)
    }

    const URL: &str = "https://example.com/a.png";

    #[tokio::test]
    async fn test_insert_then_retrieve_roundtrip() {
        let (store, _temp) = create_test_store().await;
        let entry = CacheEntry::new(Bytes::from_static(b"image data"), Utc::now());

        store.insert(URL, entry.clone()).await.unwrap();

        let retrieved = store.retrieve(URL).await.unwrap().unwrap();
        assert_eq!(retrieved.value, entry.value);
        assert_eq!(retrieved.timestamp, entry.timestamp);
    }

    #[tokio::test]
    async fn test_miss_for_unknown_url() {
        let (store, _temp) = create_test_store().await;

        assert_eq!(store.retrieve(URL).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blob_without_sidecar_is_a_miss() {
        let (store, _temp) = create_test_store().await;
        let entry = CacheEntry::new(Bytes::from_static(b"data"), Utc::now());
        store.insert(URL, entry).await.unwrap();

        fs::remove_file(store.meta_path(URL)).await.unwrap();

        assert_eq!(store.retrieve(URL).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_timestamp_survives_roundtrip() {
        let (store, _temp) = create_test_store().await;
        let timestamp = Utc::now() - Duration::days(3);
        let entry = CacheEntry::new(Bytes::from_static(b"old"), timestamp);

        store.insert(URL, entry).await.unwrap();

        let retrieved = store.retrieve(URL).await.unwrap().unwrap();
        assert_eq!(retrieved.timestamp, timestamp);
    }

    #[tokio::test]
    async fn test_delete_removes_blob() {
        let (store, _temp) = create_test_store().await;
        store
            .insert(URL, CacheEntry::new(Bytes::from_static(b"data"), Utc::now()))
            .await
            .unwrap();

        store.delete(URL).await.unwrap();

        assert_eq!(store.retrieve(URL).await.unwrap(), None);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_size_accounting() {
        let (store, _temp) = create_test_store().await;

        store
            .insert("a", CacheEntry::new(Bytes::from_static(b"hello"), Utc::now()))
            .await
            .unwrap();
        store
            .insert("b", CacheEntry::new(Bytes::from_static(b"world!"), Utc::now()))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.current_size(), 11);

        store
            .insert("a", CacheEntry::new(Bytes::from_static(b"hey"), Utc::now()))
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.current_size(), 9);

        store.delete("b").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.current_size(), 3);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let (store, _temp) = create_test_store().await;
        store
            .insert("a", CacheEntry::new(Bytes::from_static(b"1"), Utc::now()))
            .await
            .unwrap();
        store
            .insert("b", CacheEntry::new(Bytes::from_static(b"2"), Utc::now()))
            .await
            .unwrap();

        store.clear().await.unwrap();

        assert_eq!(store.len(), 0);
        assert_eq!(store.retrieve("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cleanup_drops_oldest_blobs_over_limit() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskImageStore::new(temp_dir.path().to_path_buf(), 10)
            .await
            .unwrap();

        store
            .insert("a", CacheEntry::new(Bytes::from_static(b"123456"), Utc::now()))
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        store
            .insert("b", CacheEntry::new(Bytes::from_static(b"123456"), Utc::now()))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.current_size(), 6);
    }
}
