//! Cache write-through combinator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::errors::LoadError;
use crate::domain::ports::{ResourceCache, ResourceLoader};

/// Passthrough loader that persists successful results as a side effect.
///
/// The save runs fire-and-forget on a spawned task: its outcome never
/// surfaces to the caller and never delays the delivered value. Failures
/// are forwarded unchanged with no write attempted.
pub struct CachingLoader<P: ResourceLoader> {
    primary: P,
    cache: Arc<dyn ResourceCache<Resource = P::Resource>>,
}

impl<P: ResourceLoader> CachingLoader<P> {
    /// Decorates `primary` so its successes are written to `cache`.
    pub fn new(primary: P, cache: Arc<dyn ResourceCache<Resource = P::Resource>>) -> Self {
        Self { primary, cache }
    }
}

#[async_trait]
impl<P> ResourceLoader for CachingLoader<P>
where
    P: ResourceLoader,
    P::Resource: Clone + Send + Sync + 'static,
{
    type Resource = P::Resource;

    async fn load(&self) -> Result<Self::Resource, LoadError> {
        let value = self.primary.load().await?;

        let cache = Arc::clone(&self.cache);
        let snapshot = value.clone();
        tokio::spawn(async move {
            if let Err(error) = cache.save(snapshot).await {
                warn!(%error, "best-effort cache write failed");
            }
        });

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::{Mutex, Notify};

    use super::*;
    use crate::domain::errors::StoreError;

    struct StubLoader {
        result: Result<Vec<u32>, LoadError>,
    }

    #[async_trait]
    impl ResourceLoader for StubLoader {
        type Resource = Vec<u32>;

        async fn load(&self) -> Result<Vec<u32>, LoadError> {
            self.result.clone()
        }
    }

    struct SpyCache {
        saved: Mutex<Vec<Vec<u32>>>,
        save_result: Result<(), StoreError>,
        notify: Notify,
    }

    impl SpyCache {
        fn new(save_result: Result<(), StoreError>) -> Arc<Self> {
            Arc::new(Self {
                saved: Mutex::new(Vec::new()),
                save_result,
                notify: Notify::new(),
            })
        }

        async fn wait_for_save(&self) -> Vec<Vec<u32>> {
            tokio::time::timeout(Duration::from_secs(1), self.notify.notified())
                .await
                .expect("save was never attempted");
            self.saved.lock().await.clone()
        }
    }

    #[async_trait]
    impl ResourceCache for SpyCache {
        type Resource = Vec<u32>;

        async fn save(&self, value: Vec<u32>) -> Result<(), StoreError> {
            self.saved.lock().await.push(value);
            self.notify.notify_one();
            self.save_result.clone()
        }
    }

    #[tokio::test]
    async fn test_success_is_saved_and_value_unchanged() {
        let cache = SpyCache::new(Ok(()));
        let sut = CachingLoader::new(
            StubLoader {
                result: Ok(vec![1, 2, 3]),
            },
            cache.clone() as Arc<dyn ResourceCache<Resource = Vec<u32>>>,
        );

        let result = sut.load().await;

        assert_eq!(result, Ok(vec![1, 2, 3]));
        assert_eq!(cache.wait_for_save().await, vec![vec![1, 2, 3]]);
    }

    #[tokio::test]
    async fn test_save_failure_does_not_alter_delivered_value() {
        let cache = SpyCache::new(Err(StoreError::io("disk full")));
        let sut = CachingLoader::new(
            StubLoader {
                result: Ok(vec![7]),
            },
            cache.clone() as Arc<dyn ResourceCache<Resource = Vec<u32>>>,
        );

        let result = sut.load().await;

        assert_eq!(result, Ok(vec![7]));
        // The failed save still happened; the caller never saw it.
        assert_eq!(cache.wait_for_save().await, vec![vec![7]]);
    }

    #[tokio::test]
    async fn test_failure_attempts_no_save() {
        let cache = SpyCache::new(Ok(()));
        let sut = CachingLoader::new(
            StubLoader {
                result: Err(LoadError::connectivity("offline")),
            },
            cache.clone() as Arc<dyn ResourceCache<Resource = Vec<u32>>>,
        );

        let result = sut.load().await;

        assert_eq!(result, Err(LoadError::connectivity("offline")));
        tokio::task::yield_now().await;
        assert!(cache.saved.lock().await.is_empty());
    }
}
