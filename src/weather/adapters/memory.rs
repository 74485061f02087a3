//! Scripted in-memory lookup adapter for tests and offline use.

use crate::task::domain::Location;
use crate::weather::{
    domain::{PlaceQuery, PlaceSuggestion, WeatherReading},
    ports::{LookupError, LookupResult, PlaceLookup, WeatherLookup},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Message returned for locations nothing was scripted for.
pub const UNKNOWN_LOCATION_MESSAGE: &str = "city not found";

/// In-memory lookup returning scripted responses.
///
/// Locations and queries without a scripted response fail the same way the
/// remote service does for unknown places. Clones share the script and the
/// call counters.
#[derive(Debug, Clone, Default)]
pub struct StubLookup {
    state: Arc<RwLock<StubState>>,
}

#[derive(Debug, Default)]
struct StubState {
    weather: HashMap<String, LookupResult<WeatherReading>>,
    places: HashMap<String, LookupResult<Vec<PlaceSuggestion>>>,
    weather_calls: usize,
    place_calls: usize,
}

fn lock_error(err: impl ToString) -> LookupError {
    LookupError::transport(std::io::Error::other(err.to_string()))
}

impl StubLookup {
    /// Creates an empty stub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the weather response for a location.
    ///
    /// # Errors
    ///
    /// Returns lookup errors when lock acquisition fails.
    pub fn set_weather(
        &self,
        location: impl Into<String>,
        response: LookupResult<WeatherReading>,
    ) -> LookupResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.weather.insert(location.into(), response);
        Ok(())
    }

    /// Scripts the suggestion response for a query.
    ///
    /// # Errors
    ///
    /// Returns lookup errors when lock acquisition fails.
    pub fn set_places(
        &self,
        query: impl Into<String>,
        response: LookupResult<Vec<PlaceSuggestion>>,
    ) -> LookupResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.places.insert(query.into(), response);
        Ok(())
    }

    /// Returns how many weather lookups were served.
    ///
    /// # Errors
    ///
    /// Returns lookup errors when lock acquisition fails.
    pub fn weather_calls(&self) -> LookupResult<usize> {
        Ok(self.state.read().map_err(lock_error)?.weather_calls)
    }

    /// Returns how many place lookups were served.
    ///
    /// # Errors
    ///
    /// Returns lookup errors when lock acquisition fails.
    pub fn place_calls(&self) -> LookupResult<usize> {
        Ok(self.state.read().map_err(lock_error)?.place_calls)
    }
}

fn not_found() -> LookupError {
    LookupError::Service {
        status: 404,
        message: UNKNOWN_LOCATION_MESSAGE.to_owned(),
    }
}

#[async_trait]
impl WeatherLookup for StubLookup {
    async fn current_conditions(&self, location: &Location) -> LookupResult<WeatherReading> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.weather_calls += 1;
        state
            .weather
            .get(location.as_str())
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }
}

#[async_trait]
impl PlaceLookup for StubLookup {
    async fn search_places(
        &self,
        query: &PlaceQuery,
        limit: u8,
    ) -> LookupResult<Vec<PlaceSuggestion>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.place_calls += 1;
        let mut places = state
            .places
            .get(query.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))?;
        places.truncate(usize::from(limit));
        Ok(places)
    }
}
