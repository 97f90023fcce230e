//! Cancellable load tasks.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::errors::LoadError;
use crate::domain::ports::ResourceLoader;

/// A spawned load with a caller-owned cancellation handle.
///
/// Cancellation is idempotent and final: after `cancel`, no completion is
/// ever delivered, even if the underlying transport finishes later or a
/// fallback leg is mid-flight (aborting covers whichever sub-operation is
/// currently active).
pub struct LoadTask<R> {
    handle: JoinHandle<Result<R, LoadError>>,
}

impl<R: Send + 'static> LoadTask<R> {
    /// Spawns `loader` onto the runtime and returns its handle.
    #[must_use]
    pub fn spawn(loader: Arc<dyn ResourceLoader<Resource = R>>) -> Self {
        let handle = tokio::spawn(async move { loader.load().await });
        Self { handle }
    }

    /// Aborts the load. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Waits for the load to finish. Returns `None` if it was cancelled.
    pub async fn join(self) -> Option<Result<R, LoadError>> {
        match self.handle.await {
            Ok(result) => Some(result),
            Err(error) if error.is_cancelled() => None,
            Err(error) => Some(Err(LoadError::invalid_data(format!(
                "load task panicked: {error}"
            )))),
        }
    }
}
