use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment on a feed photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageComment {
    /// Unique identifier of the comment.
    pub id: Uuid,
    /// Comment body.
    pub message: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// Username of the author.
    pub username: String,
}

impl ImageComment {
    /// Creates a new comment.
    #[must_use]
    pub fn new(
        id: Uuid,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            created_at,
            username: username.into(),
        }
    }
}
