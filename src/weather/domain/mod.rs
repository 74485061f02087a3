//! Domain model for weather readings and place suggestions.

mod error;
mod place;
mod reading;

pub use error::WeatherDomainError;
pub use place::{MIN_QUERY_CHARS, PlaceQuery, PlaceSuggestion};
pub use reading::{DEFAULT_WEATHER_ERROR, WeatherOutcome, WeatherReading};
