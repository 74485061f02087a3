//! Attaches weather outcomes to tasks and serves place suggestions.

use super::SuggestionCache;
use crate::task::{
    domain::{BoardMutation, Location, Task, TaskDraft, TaskId},
    ports::KeyValueStorage,
    services::{TaskStore, lock_store},
};
use crate::weather::{
    domain::{DEFAULT_WEATHER_ERROR, PlaceQuery, PlaceSuggestion, WeatherOutcome},
    ports::{LookupError, PlaceLookup, WeatherLookup},
};
use mockable::Clock;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Message recorded when a failed suggestion lookup carries no service
/// message.
pub const DEFAULT_SUGGESTION_ERROR: &str = "Failed to fetch city suggestions";

/// Default number of suggestions requested.
const DEFAULT_SUGGESTION_LIMIT: u8 = 5;

/// Weather and suggestion orchestration service.
///
/// The store lock is only held while reading a task or applying a
/// mutation, never across a lookup, so lookups for different tasks can be
/// in flight at the same time. A lookup is never retried or cancelled: if
/// its task is deleted meanwhile, attaching the result is a no-op.
pub struct WeatherService<W, P, K>
where
    W: WeatherLookup,
    P: PlaceLookup,
    K: KeyValueStorage,
{
    weather: Arc<W>,
    places: Arc<P>,
    cache: SuggestionCache<K>,
    suggestion_limit: u8,
}

impl<W, P, K> Clone for WeatherService<W, P, K>
where
    W: WeatherLookup,
    P: PlaceLookup,
    K: KeyValueStorage,
{
    fn clone(&self) -> Self {
        Self {
            weather: Arc::clone(&self.weather),
            places: Arc::clone(&self.places),
            cache: self.cache.clone(),
            suggestion_limit: self.suggestion_limit,
        }
    }
}

impl<W, P, K> WeatherService<W, P, K>
where
    W: WeatherLookup,
    P: PlaceLookup,
    K: KeyValueStorage,
{
    /// Creates a service requesting up to five suggestions per query.
    #[must_use]
    pub const fn new(weather: Arc<W>, places: Arc<P>, cache: SuggestionCache<K>) -> Self {
        Self {
            weather,
            places,
            cache,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Sets how many suggestions are requested per query.
    #[must_use]
    pub const fn with_suggestion_limit(mut self, limit: u8) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Looks up the weather at a location.
    ///
    /// Failures become an error marker carrying the service's message, or
    /// [`DEFAULT_WEATHER_ERROR`] when there is none.
    pub async fn lookup(&self, location: &Location) -> WeatherOutcome {
        match self.weather.current_conditions(location).await {
            Ok(reading) => WeatherOutcome::Reading(reading),
            Err(err) => {
                warn!(location = %location, error = %err, "weather lookup failed");
                WeatherOutcome::failed(user_message(&err, DEFAULT_WEATHER_ERROR))
            }
        }
    }

    /// Looks up the weather for a task and records the outcome on it.
    ///
    /// Returns `None` without a lookup when the task does not exist, is not
    /// outdoor or has no location. Otherwise returns the outcome, which is
    /// recorded on the task if it still exists when the lookup completes.
    pub async fn refresh_task_weather<S, C>(
        &self,
        store: &Mutex<TaskStore<S, C>>,
        id: TaskId,
    ) -> Option<WeatherOutcome>
    where
        S: KeyValueStorage,
        C: Clock + Send + Sync,
    {
        let location = {
            let mut guard = lock_store(store);
            let location = guard.find(id)?.weather_location()?.clone();
            guard.dispatch(BoardMutation::RequestStarted);
            location
        };

        let outcome = self.lookup(&location).await;

        let mut guard = lock_store(store);
        guard.dispatch(BoardMutation::RequestFinished {
            error: outcome.error().map(str::to_owned),
        });
        if guard.set_weather(id, outcome.clone()) {
            info!(task_id = %id, failed = outcome.is_failure(), "attached weather to task");
        } else {
            debug!(task_id = %id, "task removed before weather lookup completed");
        }
        Some(outcome)
    }

    /// Adds a task and, when it is outdoor, immediately looks up its
    /// weather.
    ///
    /// A failed lookup leaves the task in place with an error marker.
    pub async fn add_task<S, C>(
        &self,
        store: &Mutex<TaskStore<S, C>>,
        draft: TaskDraft,
    ) -> (Task, Option<WeatherOutcome>)
    where
        S: KeyValueStorage,
        C: Clock + Send + Sync,
    {
        let task = lock_store(store).add(draft);
        let outcome = self.refresh_task_weather(store, task.id()).await;
        (task, outcome)
    }

    /// Returns place suggestions for a query, serving repeated identical
    /// queries from the session cache.
    ///
    /// The suggestions are also recorded on the board state.
    ///
    /// # Errors
    ///
    /// Returns the [`LookupError`] of a failed lookup, after recording its
    /// message as the board's request error. Nothing is cached on failure.
    pub async fn suggest_places<S, C>(
        &self,
        store: &Mutex<TaskStore<S, C>>,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceSuggestion>, LookupError>
    where
        S: KeyValueStorage,
        C: Clock + Send + Sync,
    {
        if let Some(cached) = self.cache.get(query) {
            debug!(query = %query, "serving place suggestions from cache");
            lock_store(store).dispatch(BoardMutation::SetSuggestions(cached.clone()));
            return Ok(cached);
        }

        lock_store(store).dispatch(BoardMutation::RequestStarted);
        let result = self.places.search_places(query, self.suggestion_limit).await;

        let mut guard = lock_store(store);
        match result {
            Ok(suggestions) => {
                self.cache.put(query, &suggestions);
                guard.dispatch(BoardMutation::RequestFinished { error: None });
                guard.dispatch(BoardMutation::SetSuggestions(suggestions.clone()));
                Ok(suggestions)
            }
            Err(err) => {
                warn!(query = %query, error = %err, "place lookup failed");
                guard.dispatch(BoardMutation::RequestFinished {
                    error: Some(user_message(&err, DEFAULT_SUGGESTION_ERROR)),
                });
                Err(err)
            }
        }
    }
}

fn user_message(err: &LookupError, fallback: &str) -> String {
    err.service_message().unwrap_or(fallback).to_owned()
}
