//! Key-value storage port backing snapshots and session caches.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key to string value storage medium.
///
/// Implementations decide the scope of the data: durable media survive
/// process restarts, session media are dropped with their owner.
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the medium cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the medium is full, or
    /// another [`StorageError`] when it cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the medium cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Errors returned by key-value storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The storage medium is not available at all.
    #[error("storage is unavailable")]
    Unavailable,

    /// Writing the value would exceed the medium's capacity.
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded {
        /// Key being written.
        key: String,
    },

    /// The key cannot be represented by the medium.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
