//! Place-name autocomplete values.

use super::WeatherDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest characters a place query may have.
pub const MIN_QUERY_CHARS: usize = 2;

/// Partial place name typed by the user.
///
/// The query is kept verbatim, since suggestion caching is keyed by the
/// literal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Creates a validated query.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDomainError::QueryTooShort`] when the query has fewer
    /// than [`MIN_QUERY_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, WeatherDomainError> {
        let raw = value.into();
        if raw.chars().count() < MIN_QUERY_CHARS {
            return Err(WeatherDomainError::QueryTooShort {
                query: raw,
                min: MIN_QUERY_CHARS,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the query as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PlaceQuery {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Candidate place returned by the autocomplete lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    /// Place name.
    pub name: String,
    /// ISO 3166 country code.
    pub country: String,
    /// Region within the country, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl PlaceSuggestion {
    /// Creates a suggestion without a region.
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            state: None,
        }
    }

    /// Sets the region.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Returns the label shown to the user, e.g. "Paris, FR".
    #[must_use]
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}
