mod cache_decorator;
mod fallback;

pub use cache_decorator::CachingLoader;
pub use fallback::FallbackLoader;
