//! Load error taxonomy.

use thiserror::Error;

/// Errors a load operation can surface to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport-level failure: no response was obtained.
    #[error("connectivity error: {message}")]
    Connectivity {
        /// Human-readable cause.
        message: String,
    },

    /// A response was obtained but failed status or payload validation.
    #[error("invalid data: {message}")]
    InvalidData {
        /// Human-readable cause.
        message: String,
    },

    /// The cached value exists but is older than the max-age rule allows.
    #[error("cache entry has expired")]
    CacheExpired,

    /// No cached value is available.
    #[error("no cached value available")]
    CacheEmpty,
}

impl LoadError {
    /// Creates a connectivity error.
    #[must_use]
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    /// Creates an invalid-data error.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Returns whether the error came from the transport rather than the
    /// payload or the cache.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Returns whether the error means the cache could not serve a value.
    #[must_use]
    pub const fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheExpired | Self::CacheEmpty)
    }
}
