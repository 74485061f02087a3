//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    task::{
        adapters::memory::InMemoryStorage,
        domain::Task,
        services::{SharedTaskStore, SnapshotPersistence, TaskStore, lock_store},
    },
    weather::{
        adapters::memory::StubLookup,
        services::{SuggestionCache, WeatherService},
    },
};

/// Store type used by the BDD world.
pub type TestStore = TaskStore<InMemoryStorage, DefaultClock>;

/// Weather service type used by the BDD world.
pub type TestWeatherService = WeatherService<StubLookup, StubLookup, InMemoryStorage>;

/// Scenario world for task board behaviour tests.
pub struct BoardWorld {
    pub durable: InMemoryStorage,
    pub lookup: StubLookup,
    pub store: SharedTaskStore<InMemoryStorage, DefaultClock>,
    pub service: TestWeatherService,
}

impl BoardWorld {
    /// Creates a world with an empty board and an unscripted lookup.
    #[must_use]
    pub fn new() -> Self {
        let durable = InMemoryStorage::new();
        let lookup = StubLookup::new();
        let store = open_store(&durable).into_shared();
        let service = WeatherService::new(
            Arc::new(lookup.clone()),
            Arc::new(lookup.clone()),
            SuggestionCache::new(Arc::new(InMemoryStorage::new())),
        );
        Self {
            durable,
            lookup,
            store,
            service,
        }
    }

    /// Returns a copy of the first task with the given text.
    pub fn task_named(&self, text: &str) -> Result<Task, eyre::Report> {
        lock_store(&self.store)
            .tasks()
            .iter()
            .find(|task| task.text() == text)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task named {text:?} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens a store over the given durable storage.
pub fn open_store(durable: &InMemoryStorage) -> TestStore {
    TaskStore::open(
        SnapshotPersistence::with_default_key(Arc::new(durable.clone())),
        Arc::new(DefaultClock),
    )
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
