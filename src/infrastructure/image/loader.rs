//! Async image loading orchestrator.
//!
//! Three tiers: memory, disk, network. Successful downloads populate both
//! caches, the disk write fire-and-forget.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::{RwLock, Semaphore, mpsc};
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{CacheEntry, CachePolicy, ImageSource, LoadedImageData};
use crate::domain::errors::LoadError;
use crate::domain::ports::{Clock, HttpClientPort, ImageStorePort};

use super::memory_cache::MemoryImageCache;

/// Message sent when an image finishes loading.
#[derive(Debug)]
pub struct ImageLoadedEvent {
    /// The image URL.
    pub url: String,
    /// The loaded bytes, or the error that stopped the load.
    pub result: Result<LoadedImageData, LoadError>,
}

/// Configuration for the image loader.
#[derive(Debug, Clone)]
pub struct ImageLoaderConfig {
    /// Maximum blobs in the memory cache.
    pub memory_cache_size: usize,
    /// Maximum concurrent downloads.
    pub max_concurrent_downloads: usize,
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: super::memory_cache::DEFAULT_MEMORY_CACHE_SIZE,
            max_concurrent_downloads: 4,
        }
    }
}

#[derive(Debug)]
enum LoaderCommand {
    Load { url: String },
    Cancel { url: String },
    CancelAll,
}

struct Inner {
    memory: MemoryImageCache,
    disk: Arc<dyn ImageStorePort>,
    http: Arc<dyn HttpClientPort>,
    clock: Arc<dyn Clock>,
    pending: RwLock<HashSet<String>>,
}

impl Inner {
    async fn load_image(&self, url: &str) -> Result<LoadedImageData, LoadError> {
        let now = self.clock.now();

        if let Some(data) = self.memory.get(url, now).await {
            return Ok(LoadedImageData {
                url: url.to_string(),
                data,
                source: ImageSource::MemoryCache,
            });
        }

        match self.disk.retrieve(url).await {
            Ok(Some(entry)) if CachePolicy::is_valid(entry.timestamp, now) => {
                self.memory.put(url, entry.clone()).await;
                return Ok(LoadedImageData {
                    url: url.to_string(),
                    data: entry.value,
                    source: ImageSource::DiskCache,
                });
            }
            Ok(Some(_)) => trace!(url, "disk blob stale, going to network"),
            Ok(None) => {}
            Err(error) => warn!(url, %error, "disk store read failed"),
        }

        debug!(url, "downloading image");
        let response = self.http.get(url).await?;
        if !response.is_success() {
            return Err(LoadError::invalid_data(format!(
                "unexpected status {} for image",
                response.status
            )));
        }

        let entry = CacheEntry::new(response.body.clone(), now);
        self.memory.put(url, entry.clone()).await;

        let disk = Arc::clone(&self.disk);
        let url_owned = url.to_string();
        tokio::spawn(async move {
            if let Err(error) = disk.insert(&url_owned, entry).await {
                warn!(url = url_owned, %error, "best-effort disk write failed");
            }
        });

        Ok(LoadedImageData {
            url: url.to_string(),
            data: response.body,
            source: ImageSource::Network,
        })
    }
}

/// Orchestrates image loading from memory, disk, and network.
pub struct ImageDataLoader {
    inner: Arc<Inner>,
    request_tx: mpsc::UnboundedSender<LoaderCommand>,
}

impl ImageDataLoader {
    /// Creates a loader and spawns its background download worker.
    ///
    /// Finished prefetches are announced on `event_tx`.
    #[must_use]
    pub fn new(
        config: &ImageLoaderConfig,
        event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
        http: Arc<dyn HttpClientPort>,
        disk: Arc<dyn ImageStorePort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let inner = Arc::new(Inner {
            memory: MemoryImageCache::new(config.memory_cache_size),
            disk,
            http,
            clock,
            pending: RwLock::new(HashSet::new()),
        });

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_downloads));

        tokio::spawn(Self::run_worker(
            Arc::clone(&inner),
            request_rx,
            event_tx,
            semaphore,
        ));

        Self { inner, request_tx }
    }

    /// Worker loop handling prefetch requests and throttling.
    async fn run_worker(
        inner: Arc<Inner>,
        mut request_rx: mpsc::UnboundedReceiver<LoaderCommand>,
        event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
        semaphore: Arc<Semaphore>,
    ) {
        let mut queue: VecDeque<String> = VecDeque::new();

        loop {
            tokio::select! {
                cmd = request_rx.recv() => {
                    match cmd {
                        Some(LoaderCommand::Load { url }) => {
                            if !queue.contains(&url) {
                                queue.push_back(url);
                            }
                        }
                        Some(LoaderCommand::Cancel { url }) => {
                            queue.retain(|queued| *queued != url);
                        }
                        Some(LoaderCommand::CancelAll) => {
                            queue.clear();
                        }
                        None => break,
                    }
                }
                Ok(permit) = semaphore.clone().acquire_owned(), if !queue.is_empty() => {
                    if let Some(url) = queue.pop_front() {
                        let inner = Arc::clone(&inner);
                        let event_tx = event_tx.clone();

                        tokio::spawn(async move {
                            {
                                let mut pending = inner.pending.write().await;
                                if !pending.insert(url.clone()) {
                                    drop(permit);
                                    return;
                                }
                            }

                            let result = inner.load_image(&url).await;

                            inner.pending.write().await.remove(&url);

                            let _ = event_tx.send(ImageLoadedEvent { url, result });
                            drop(permit);
                        });
                    }
                }
            }
        }
    }

    /// Loads an image, checking caches first.
    ///
    /// # Errors
    /// Returns error if the image cannot be served from any tier.
    pub async fn load(&self, url: &str) -> Result<LoadedImageData, LoadError> {
        self.inner.load_image(url).await
    }

    /// Queues an image for background loading; the result arrives on the
    /// event channel.
    pub fn prefetch(&self, url: impl Into<String>) {
        let url = url.into();
        if let Err(e) = self.request_tx.send(LoaderCommand::Load { url }) {
            error!(error = %e, "failed to queue image load");
        }
    }

    /// Queues several images at once.
    pub fn prefetch_batch(&self, urls: impl IntoIterator<Item = String>) {
        for url in urls {
            self.prefetch(url);
        }
    }

    /// Cancels a queued load for `url`. Other loads are unaffected.
    pub async fn cancel(&self, url: &str) {
        if let Err(e) = self.request_tx.send(LoaderCommand::Cancel {
            url: url.to_string(),
        }) {
            error!(error = %e, "failed to send cancel");
        }
        self.inner.pending.write().await.remove(url);
        debug!(url, "cancelled image load");
    }

    /// Cancels every queued load.
    pub async fn cancel_all(&self) {
        if let Err(e) = self.request_tx.send(LoaderCommand::CancelAll) {
            error!(error = %e, "failed to send cancel all");
        }
        let mut pending = self.inner.pending.write().await;
        let count = pending.len();
        pending.clear();
        if count > 0 {
            debug!(count, "cancelled all pending image loads");
        }
    }

    /// Returns true if `url` is currently being downloaded.
    pub async fn is_loading(&self, url: &str) -> bool {
        self.inner.pending.read().await.contains(url)
    }

    /// Number of in-flight downloads.
    pub async fn pending_count(&self) -> usize {
        self.inner.pending.read().await.len()
    }

    /// Memory tier statistics.
    #[must_use]
    pub fn memory_stats(&self) -> super::memory_cache::CacheStats {
        self.inner.memory.stats()
    }
}
