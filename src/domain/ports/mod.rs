mod clock_port;
mod feed_store_port;
mod http_port;
mod image_store_port;
mod loader_port;

pub use clock_port::Clock;
pub use feed_store_port::FeedStorePort;
pub use http_port::{HttpClientPort, HttpResponse};
pub use image_store_port::ImageStorePort;
pub use loader_port::{ResourceCache, ResourceLoader};
