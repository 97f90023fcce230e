//! Image data pipeline: memory, disk, and network tiers.

mod disk_store;
mod loader;
mod memory_cache;

pub use disk_store::{DEFAULT_MAX_DISK_CACHE_SIZE, DiskImageStore};
pub use loader::{ImageDataLoader, ImageLoadedEvent, ImageLoaderConfig};
pub use memory_cache::{CacheStats, DEFAULT_MEMORY_CACHE_SIZE, MemoryImageCache};
