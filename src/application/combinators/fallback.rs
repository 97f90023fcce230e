//! Primary/secondary fallback combinator.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::LoadError;
use crate::domain::ports::ResourceLoader;

/// Tries the primary loader; on failure, forwards the secondary's result.
///
/// A primary failure is never surfaced: it is logged and masked by whatever
/// the secondary returns, success or failure. On primary success the
/// secondary is never invoked.
pub struct FallbackLoader<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackLoader<P, S> {
    /// Composes `primary` with a `secondary` tried only after failure.
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P, S> ResourceLoader for FallbackLoader<P, S>
where
    P: ResourceLoader,
    S: ResourceLoader<Resource = P::Resource>,
{
    type Resource = P::Resource;

    async fn load(&self) -> Result<Self::Resource, LoadError> {
        match self.primary.load().await {
            Ok(value) => Ok(value),
            Err(error) => {
                debug!(%error, "primary load failed, trying fallback");
                self.secondary.load().await
            }
        }
    }
}
