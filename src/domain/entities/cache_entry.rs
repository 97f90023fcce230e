//! Cache entry and the max-age validity policy.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of days a cached snapshot stays valid.
pub const MAX_CACHE_AGE_DAYS: i64 = 7;

/// A stored value together with the instant it was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub value: T,
    /// When the value was persisted.
    pub timestamp: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Creates an entry timestamped at `timestamp`.
    #[must_use]
    pub const fn new(value: T, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}

/// The fixed max-age rule deciding whether a cache entry may still be served.
pub struct CachePolicy;

impl CachePolicy {
    /// Maximum age of a usable cache entry.
    #[must_use]
    pub fn max_age() -> Duration {
        Duration::days(MAX_CACHE_AGE_DAYS)
    }

    /// Returns true if an entry persisted at `timestamp` is still usable at
    /// `now`. The comparison is strictly less-than: an entry aged exactly
    /// `max_age` is expired.
    #[must_use]
    pub fn is_valid(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(timestamp) < Self::max_age()
    }
}
