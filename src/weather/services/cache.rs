//! Session cache of place suggestions keyed by the literal query.

use crate::task::ports::KeyValueStorage;
use crate::weather::domain::{PlaceQuery, PlaceSuggestion};
use std::sync::Arc;
use tracing::warn;

/// Prefix of every cache key.
pub const SUGGESTION_KEY_PREFIX: &str = "city_suggestions_";

/// Caches suggestion lists in a (normally session-scoped) storage medium.
///
/// Cache failures are logged and treated as misses.
#[derive(Debug)]
pub struct SuggestionCache<S>
where
    S: KeyValueStorage,
{
    storage: Arc<S>,
}

impl<S> Clone for SuggestionCache<S>
where
    S: KeyValueStorage,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S> SuggestionCache<S>
where
    S: KeyValueStorage,
{
    /// Creates a cache over `storage`.
    #[must_use]
    pub const fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Returns the storage key for a query.
    #[must_use]
    pub fn key_for(query: &PlaceQuery) -> String {
        format!("{SUGGESTION_KEY_PREFIX}{query}")
    }

    /// Returns the cached suggestions for exactly this query string.
    #[must_use]
    pub fn get(&self, query: &PlaceQuery) -> Option<Vec<PlaceSuggestion>> {
        let key = Self::key_for(query);
        let raw = match self.storage.get(&key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read suggestion cache");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(suggestions) => Some(suggestions),
            Err(err) => {
                warn!(key = %key, error = %err, "discarding corrupt suggestion cache entry");
                None
            }
        }
    }

    /// Stores suggestions for the query.
    pub fn put(&self, query: &PlaceQuery, suggestions: &[PlaceSuggestion]) {
        let key = Self::key_for(query);
        let encoded = match serde_json::to_string(suggestions) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to encode suggestions");
                return;
            }
        };
        if let Err(err) = self.storage.set(&key, &encoded) {
            warn!(key = %key, error = %err, "failed to write suggestion cache");
        }
    }
}
