//! Application services for weather and place lookups.

mod cache;
mod weather;

pub use cache::{SUGGESTION_KEY_PREFIX, SuggestionCache};
pub use weather::{DEFAULT_SUGGESTION_ERROR, WeatherService};
