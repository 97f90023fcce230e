//! Store error types.

use thiserror::Error;

/// Errors raised by the local store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("store I/O error: {message}")]
    Io {
        /// Human-readable cause.
        message: String,
    },

    /// The stored payload could not be decoded.
    #[error("corrupt cache payload: {message}")]
    Corrupt {
        /// Human-readable cause.
        message: String,
    },
}

impl StoreError {
    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a corrupt-payload error.
    #[must_use]
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}
