//! Application layer: loader combinators, cache services, and use cases.

/// Loader combinators (fallback, cache write-through).
pub mod combinators;
/// Cache-policy services built over the store ports.
pub mod services;
/// Cancellable load tasks.
pub mod task;
/// Use cases wiring loaders into caller-facing operations.
pub mod use_cases;

pub use combinators::{CachingLoader, FallbackLoader};
pub use services::LocalFeedLoader;
pub use task::LoadTask;
pub use use_cases::{LoadFeedUseCase, ValidateCacheUseCase};
