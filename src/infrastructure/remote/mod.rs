mod api;
mod comments_mapper;
mod dto;
mod feed_mapper;
mod remote_loader;

pub use api::FeedApi;
pub use comments_mapper::map_comments;
pub use feed_mapper::map_feed;
pub use remote_loader::RemoteLoader;
