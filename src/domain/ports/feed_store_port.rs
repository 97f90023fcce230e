//! Feed store port definition.

use async_trait::async_trait;

use crate::domain::entities::{CacheEntry, FeedImage};
use crate::domain::errors::StoreError;

/// Port for the single-slot feed snapshot store.
///
/// The store is an opaque key-value slot; schema and durability are the
/// adapter's concern. Writes are last-write-wins.
#[async_trait]
pub trait FeedStorePort: Send + Sync {
    /// Reads the stored snapshot, if any.
    async fn retrieve(&self) -> Result<Option<CacheEntry<Vec<FeedImage>>>, StoreError>;

    /// Inserts a snapshot, overwriting any previous one.
    async fn insert(&self, entry: CacheEntry<Vec<FeedImage>>) -> Result<(), StoreError>;

    /// Deletes the stored snapshot. Deleting an empty slot is a no-op.
    async fn delete(&self) -> Result<(), StoreError>;
}
