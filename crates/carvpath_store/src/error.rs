//! Error types for long-path store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to a long-path store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("long-path store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the operation.
    #[error("long-path store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
