//! Lookup ports for current weather and place-name autocomplete.

use crate::task::domain::Location;
use crate::weather::domain::{PlaceQuery, PlaceSuggestion, WeatherReading};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Current-conditions lookup contract.
///
/// Timeouts are the implementation's concern; callers neither retry nor
/// cancel.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Returns the current conditions at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the service rejects the location or
    /// cannot be reached.
    async fn current_conditions(&self, location: &Location) -> LookupResult<WeatherReading>;
}

/// Place-name autocomplete contract.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Returns up to `limit` places matching the query, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the service cannot be reached or answers
    /// with an error.
    async fn search_places(
        &self,
        query: &PlaceQuery,
        limit: u8,
    ) -> LookupResult<Vec<PlaceSuggestion>>;
}

/// Errors returned by lookup implementations.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The service answered with an error status.
    #[error("lookup service returned {status}: {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Message reported by the service, e.g. "city not found".
        message: String,
    },

    /// The service answered with a body that could not be interpreted.
    #[error("invalid lookup response: {0}")]
    InvalidResponse(String),

    /// No API key is configured.
    #[error("no lookup API key configured")]
    MissingApiKey,

    /// The request did not complete.
    #[error("lookup transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl LookupError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the message reported by the remote service, if any.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Service { message, .. } if !message.trim().is_empty() => Some(message),
            Self::Service { .. }
            | Self::InvalidResponse(_)
            | Self::MissingApiKey
            | Self::Transport(_) => None,
        }
    }
}
