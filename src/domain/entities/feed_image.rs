use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single photo in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedImage {
    /// Unique identifier of the photo.
    pub id: Uuid,
    /// Optional caption text.
    pub description: Option<String>,
    /// Optional location the photo was taken at.
    pub location: Option<String>,
    /// URL of the image data.
    pub url: String,
}

impl FeedImage {
    /// Creates a new feed image.
    #[must_use]
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url: url.into(),
        }
    }
}
