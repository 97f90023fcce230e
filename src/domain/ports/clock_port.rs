//! Time source port, so cache-policy decisions are testable.

use chrono::{DateTime, Utc};

/// Supplies the current instant to policy decisions.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
