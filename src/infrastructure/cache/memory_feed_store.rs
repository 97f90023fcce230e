//! In-memory feed store for tests and cache-less environments.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::{CacheEntry, FeedImage};
use crate::domain::errors::StoreError;
use crate::domain::ports::FeedStorePort;

/// Single-slot store held in memory. Counts operations so tests can assert
/// on side effects.
#[derive(Default)]
pub struct InMemoryFeedStore {
    slot: Mutex<Option<CacheEntry<Vec<FeedImage>>>>,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
    fail_reads: AtomicBool,
}

impl InMemoryFeedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entry`.
    #[must_use]
    pub fn with_entry(entry: CacheEntry<Vec<FeedImage>>) -> Self {
        Self {
            slot: Mutex::new(Some(entry)),
            ..Self::default()
        }
    }

    /// Makes subsequent reads fail, simulating a broken store.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of insert calls observed.
    #[must_use]
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of delete calls observed.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedStorePort for InMemoryFeedStore {
    async fn retrieve(&self) -> Result<Option<CacheEntry<Vec<FeedImage>>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::io("simulated read failure"));
        }
        Ok(self.slot.lock().await.clone())
    }

    async fn insert(&self, entry: CacheEntry<Vec<FeedImage>>) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().await = Some(entry);
        Ok(())
    }

    async fn delete(&self) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn entry() -> CacheEntry<Vec<FeedImage>> {
        CacheEntry::new(
            vec![FeedImage::new(
                Uuid::new_v4(),
                None,
                None,
                "https://example.com/a.png",
            )],
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_then_retrieve_roundtrip() {
        let store = InMemoryFeedStore::new();
        let entry = entry();

        store.insert(entry.clone()).await.unwrap();

        assert_eq!(store.retrieve().await.unwrap(), Some(entry));
        assert_eq!(store.insert_count(), 1);
    }

    #[tokio::test]
    async fn test_insert_overwrites_previous_entry() {
        let store = InMemoryFeedStore::with_entry(entry());
        let replacement = entry();

        store.insert(replacement.clone()).await.unwrap();

        assert_eq!(store.retrieve().await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_delete_empties_the_slot() {
        let store = InMemoryFeedStore::with_entry(entry());

        store.delete().await.unwrap();

        assert_eq!(store.retrieve().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_failure_injection() {
        let store = InMemoryFeedStore::with_entry(entry());
        store.set_fail_reads(true);

        assert!(store.retrieve().await.is_err());
    }
}
