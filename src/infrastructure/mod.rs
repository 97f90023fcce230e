//! Infrastructure layer with adapters for network, disk, and configuration.

/// Feed snapshot stores.
pub mod cache;
/// Wall-clock time source.
pub mod clock;
/// Application configuration.
pub mod config;
/// HTTP transport adapter.
pub mod http;
/// Image data pipeline (memory, disk, network tiers).
pub mod image;
/// Remote feed API client and mappers.
pub mod remote;

pub use cache::{DiskFeedStore, InMemoryFeedStore};
pub use clock::SystemClock;
pub use config::{AppConfig, CliArgs, Command, LogLevel};
pub use http::ReqwestHttpClient;
pub use image::{DiskImageStore, ImageDataLoader, ImageLoadedEvent, ImageLoaderConfig, MemoryImageCache};
pub use remote::{FeedApi, RemoteLoader};
