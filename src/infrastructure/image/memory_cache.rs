//! In-memory LRU cache for raw image bytes.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{CacheEntry, CachePolicy};

/// Default maximum number of image blobs held in memory.
pub const DEFAULT_MEMORY_CACHE_SIZE: usize = 50;

/// LRU cache keyed by image URL. Entries keep their persisted timestamp so
/// the max-age rule also applies to the memory tier; a stale entry reads as
/// a miss and is dropped.
pub struct MemoryImageCache {
    cache: RwLock<LruCache<String, CacheEntry<Bytes>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates a cache with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Gets the blob cached for `url` if it is still within max-age at `now`.
    pub async fn get(&self, url: &str, now: DateTime<Utc>) -> Option<Bytes> {
        let mut cache = self.cache.write().await;
        match cache.get(url) {
            Some(entry) if CachePolicy::is_valid(entry.timestamp, now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(url, "memory cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                cache.pop(url);
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(url, "memory cache entry stale, dropped");
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(url, "memory cache miss");
                None
            }
        }
    }

    /// Stores a blob for `url`.
    pub async fn put(&self, url: impl Into<String>, entry: CacheEntry<Bytes>) {
        let url = url.into();
        let mut cache = self.cache.write().await;
        debug!(url, size = entry.value.len(), "storing image in memory cache");
        cache.put(url, entry);
    }

    /// Removes the blob cached for `url`.
    pub async fn evict(&self, url: &str) {
        let mut cache = self.cache.write().await;
        if cache.pop(url).is_some() {
            debug!(url, "evicted image from memory cache");
        }
    }

    /// Clears the cache.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
        debug!("cleared memory image cache");
    }

    /// Current number of cached blobs (best-effort under contention).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.try_read().map_or(0, |c| c.len())
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns hit/miss statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CACHE_SIZE)
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached blobs.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cache: {} blobs, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}
