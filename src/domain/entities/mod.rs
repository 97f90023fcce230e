mod cache_entry;
mod feed_image;
mod image_comment;
mod image_data;

pub use cache_entry::{CacheEntry, CachePolicy, MAX_CACHE_AGE_DAYS};
pub use feed_image::FeedImage;
pub use image_comment::ImageComment;
pub use image_data::{ImageSource, LoadedImageData};
