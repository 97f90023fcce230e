//! Loader and cache-writer port definitions.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::{LoadError, StoreError};

/// A zero-argument asynchronous producer of a typed resource.
///
/// Remote loaders, cache-policy loaders, and the combinators that compose
/// them all implement this contract, so they can be stacked freely.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// The typed payload this loader produces.
    type Resource: Send;

    /// Performs one load attempt.
    async fn load(&self) -> Result<Self::Resource, LoadError>;
}

/// The write side of a cache, consumed by the caching combinator.
#[async_trait]
pub trait ResourceCache: Send + Sync {
    /// The typed payload this cache stores.
    type Resource: Send;

    /// Persists a value, overwriting any previous one.
    async fn save(&self, value: Self::Resource) -> Result<(), StoreError>;
}

#[async_trait]
impl<T> ResourceLoader for &T
where
    T: ResourceLoader + ?Sized,
{
    type Resource = T::Resource;

    async fn load(&self) -> Result<Self::Resource, LoadError> {
        (**self).load().await
    }
}

#[async_trait]
impl<T> ResourceLoader for Arc<T>
where
    T: ResourceLoader + ?Sized,
{
    type Resource = T::Resource;

    async fn load(&self) -> Result<Self::Resource, LoadError> {
        (**self).load().await
    }
}

#[async_trait]
impl<T> ResourceCache for Arc<T>
where
    T: ResourceCache + ?Sized,
{
    type Resource = T::Resource;

    async fn save(&self, value: Self::Resource) -> Result<(), StoreError> {
        (**self).save(value).await
    }
}
