//! Wire-format DTOs for the feed service.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{FeedImage, ImageComment};

#[derive(Debug, Deserialize)]
pub(crate) struct FeedPayload {
    pub items: Vec<FeedImageDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedImageDto {
    pub id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub image: String,
}

impl FeedImageDto {
    pub(crate) fn into_domain(self) -> FeedImage {
        FeedImage::new(self.id, self.description, self.location, self.image)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsPayload {
    pub items: Vec<ImageCommentDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageCommentDto {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub author: CommentAuthorDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentAuthorDto {
    pub username: String,
}

impl ImageCommentDto {
    pub(crate) fn into_domain(self) -> ImageComment {
        ImageComment::new(self.id, self.message, self.created_at, self.author.username)
    }
}
