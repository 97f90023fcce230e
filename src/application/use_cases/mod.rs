mod load_feed;
mod validate_cache;

pub use load_feed::LoadFeedUseCase;
pub use validate_cache::ValidateCacheUseCase;
