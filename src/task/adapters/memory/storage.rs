//! In-memory key-value storage.
//!
//! Data lives only as long as the storage value (and its clones), which
//! makes the adapter suitable both as a session-scoped medium and as a test
//! double for durable storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{KeyValueStorage, StorageError, StorageResult};

/// Thread-safe in-memory key-value storage.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<RwLock<InMemoryStorageState>>,
}

#[derive(Debug, Default)]
struct InMemoryStorageState {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl InMemoryStorageState {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl InMemoryStorage {
    /// Creates an empty storage without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty storage that rejects writes once keys and values
    /// together exceed `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        let storage = Self::default();
        if let Ok(mut state) = storage.state.write() {
            state.quota_bytes = Some(quota_bytes);
        }
        storage
    }

    /// Makes every subsequent operation fail with
    /// [`StorageError::Unavailable`] until switched back.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn set_unavailable(&self, unavailable: bool) -> StorageResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.unavailable = unavailable;
        Ok(())
    }

    /// Drops every entry.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn clear(&self) -> StorageResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.entries.clear();
        Ok(())
    }

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn len(&self) -> StorageResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.entries.len())
    }

    /// Returns whether nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error(err: impl ToString) -> StorageError {
    StorageError::backend(std::io::Error::other(err.to_string()))
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let state = self.state.read().map_err(lock_error)?;
        if state.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.unavailable {
            return Err(StorageError::Unavailable);
        }
        if let Some(limit) = state.quota_bytes {
            let required = state.used_bytes_without(key) + key.len() + value.len();
            if required > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                });
            }
        }
        state.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.unavailable {
            return Err(StorageError::Unavailable);
        }
        state.entries.remove(key);
        Ok(())
    }
}
