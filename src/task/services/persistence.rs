//! Snapshot persistence over a key-value storage medium.

use crate::task::{
    domain::BoardSnapshot,
    ports::{KeyValueStorage, StorageError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key used when none is configured.
pub const DEFAULT_SNAPSHOT_KEY: &str = "tasks";

/// Errors raised while reading or writing a snapshot.
///
/// [`SnapshotPersistence::load`] and [`SnapshotPersistence::save`] log and
/// swallow these; the `try_` variants expose them.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage medium failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a valid snapshot.
    #[error("snapshot under '{key}' is corrupt: {source}")]
    Corrupt {
        /// Storage key.
        key: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Reads and writes [`BoardSnapshot`]s as JSON under a fixed key.
#[derive(Debug)]
pub struct SnapshotPersistence<S>
where
    S: KeyValueStorage,
{
    storage: Arc<S>,
    key: String,
}

impl<S> Clone for SnapshotPersistence<S>
where
    S: KeyValueStorage,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
        }
    }
}

impl<S> SnapshotPersistence<S>
where
    S: KeyValueStorage,
{
    /// Creates a persistence adapter writing under `key`.
    #[must_use]
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Creates a persistence adapter writing under [`DEFAULT_SNAPSHOT_KEY`].
    #[must_use]
    pub fn with_default_key(storage: Arc<S>) -> Self {
        Self::new(storage, DEFAULT_SNAPSHOT_KEY)
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Loads the stored snapshot.
    ///
    /// Returns `None` when no snapshot exists, when it is corrupt, or when
    /// the medium is unavailable. Failures are logged.
    #[must_use]
    pub fn load(&self) -> Option<BoardSnapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to load board snapshot");
                None
            }
        }
    }

    /// Loads the stored snapshot, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Storage`] when the medium fails and
    /// [`PersistenceError::Corrupt`] when the stored JSON does not decode.
    pub fn try_load(&self) -> Result<Option<BoardSnapshot>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt {
                key: self.key.clone(),
                source,
            })
    }

    /// Writes the snapshot, logging and swallowing any failure.
    pub fn save(&self, snapshot: &BoardSnapshot) {
        if let Err(err) = self.try_save(snapshot) {
            warn!(key = %self.key, error = %err, "failed to save board snapshot");
        }
    }

    /// Writes the snapshot, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Encode`] when serialisation fails and
    /// [`PersistenceError::Storage`] when the medium rejects the write.
    pub fn try_save(&self, snapshot: &BoardSnapshot) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(snapshot).map_err(PersistenceError::Encode)?;
        self.storage.set(&self.key, &encoded)?;
        debug!(
            key = %self.key,
            tasks = snapshot.tasks.len(),
            bytes = encoded.len(),
            "saved board snapshot"
        );
        Ok(())
    }

    /// Deletes the stored snapshot, logging and swallowing any failure.
    pub fn clear(&self) {
        if let Err(err) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %err, "failed to clear board snapshot");
        }
    }
}
