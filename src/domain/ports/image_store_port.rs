//! Image blob store port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::CacheEntry;
use crate::domain::errors::StoreError;

/// Port for the per-URL image blob store.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Reads the blob stored for `url`, if any.
    async fn retrieve(&self, url: &str) -> Result<Option<CacheEntry<Bytes>>, StoreError>;

    /// Stores a blob for `url`, overwriting any previous one.
    async fn insert(&self, url: &str, entry: CacheEntry<Bytes>) -> Result<(), StoreError>;

    /// Deletes the blob stored for `url`, if any.
    async fn delete(&self, url: &str) -> Result<(), StoreError>;
}
