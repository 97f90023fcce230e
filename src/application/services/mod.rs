mod local_feed_loader;

pub use local_feed_loader::LocalFeedLoader;
