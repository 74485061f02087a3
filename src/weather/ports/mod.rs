//! Port contracts for external weather and place lookups.

pub mod lookup;

pub use lookup::{LookupError, LookupResult, PlaceLookup, WeatherLookup};
