mod disk_feed_store;
mod memory_feed_store;

pub use disk_feed_store::DiskFeedStore;
pub use memory_feed_store::InMemoryFeedStore;
