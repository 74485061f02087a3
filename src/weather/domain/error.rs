//! Error types for weather domain validation.

use thiserror::Error;

/// Errors returned while constructing weather domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherDomainError {
    /// A place query is shorter than the lookup accepts.
    #[error("place query '{query}' is shorter than {min} characters")]
    QueryTooShort {
        /// Rejected query.
        query: String,
        /// Minimum character count.
        min: usize,
    },
}
