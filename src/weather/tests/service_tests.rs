//! Tests for weather and suggestion orchestration.

use crate::task::{
    adapters::memory::InMemoryStorage,
    domain::{Location, Priority, TaskDraft, TaskStatus},
    ports::KeyValueStorage,
    services::{SharedTaskStore, SnapshotPersistence, TaskStore, lock_store},
};
use crate::weather::{
    adapters::memory::{StubLookup, UNKNOWN_LOCATION_MESSAGE},
    domain::{DEFAULT_WEATHER_ERROR, PlaceQuery, PlaceSuggestion, WeatherOutcome, WeatherReading},
    ports::LookupError,
    services::{DEFAULT_SUGGESTION_ERROR, SuggestionCache, WeatherService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestWeatherService = WeatherService<StubLookup, StubLookup, InMemoryStorage>;
type TestSharedStore = SharedTaskStore<InMemoryStorage, DefaultClock>;

struct Harness {
    lookup: StubLookup,
    session: InMemoryStorage,
    durable: InMemoryStorage,
    store: TestSharedStore,
    service: TestWeatherService,
}

#[fixture]
fn harness() -> Harness {
    let lookup = StubLookup::new();
    let session = InMemoryStorage::new();
    let durable = InMemoryStorage::new();
    let store = TaskStore::open(
        SnapshotPersistence::with_default_key(Arc::new(durable.clone())),
        Arc::new(DefaultClock),
    )
    .into_shared();
    let service = WeatherService::new(
        Arc::new(lookup.clone()),
        Arc::new(lookup.clone()),
        SuggestionCache::new(Arc::new(session.clone())),
    );
    Harness {
        lookup,
        session,
        durable,
        store,
        service,
    }
}

fn reading(description: &str, temperature: f64) -> WeatherReading {
    WeatherReading {
        description: description.to_owned(),
        temperature,
        humidity: 60,
        wind_speed: 2.5,
    }
}

fn outdoor(text: &str, location: &str) -> TaskDraft {
    TaskDraft::new(text)
        .expect("valid draft")
        .outdoor(Location::new(location).expect("valid location"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outdoor_task_receives_weather(harness: Harness) {
    harness
        .lookup
        .set_weather("Lisbon", Ok(reading("clear sky", 21.0)))
        .expect("script lookup");

    let (task, outcome) = harness
        .service
        .add_task(&harness.store, outdoor("Walk the dog", "Lisbon"))
        .await;

    let expected = WeatherOutcome::from(reading("clear sky", 21.0));
    assert_eq!(outcome.as_ref(), Some(&expected));
    let store = lock_store(&harness.store);
    let stored = store.find(task.id()).expect("task exists");
    assert_eq!(stored.weather(), Some(&expected));
    assert!(!store.state().request().loading);
    assert_eq!(store.state().request().error, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_city_leaves_error_marker(harness: Harness) {
    let (task, outcome) = harness
        .service
        .add_task(&harness.store, outdoor("Picnic", "Paris"))
        .await;

    assert_eq!(
        outcome.as_ref().and_then(WeatherOutcome::error),
        Some(UNKNOWN_LOCATION_MESSAGE)
    );
    let store = lock_store(&harness.store);
    let stored = store.find(task.id()).expect("task kept despite failure");
    assert_eq!(stored.text(), "Picnic");
    assert_eq!(stored.status(), TaskStatus::Active);
    assert_eq!(stored.priority(), Priority::Medium);
    assert_eq!(
        stored.weather().and_then(WeatherOutcome::error),
        Some(UNKNOWN_LOCATION_MESSAGE)
    );
    assert_eq!(
        store.state().request().error.as_deref(),
        Some(UNKNOWN_LOCATION_MESSAGE)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failure_without_service_message_uses_default(harness: Harness) {
    harness
        .lookup
        .set_weather(
            "Oslo",
            Err(LookupError::transport(std::io::Error::other("timed out"))),
        )
        .expect("script lookup");

    let outcome = harness.service.lookup(&Location::new("Oslo").expect("valid location")).await;

    assert_eq!(outcome, WeatherOutcome::failed(DEFAULT_WEATHER_ERROR));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn indoor_task_is_not_looked_up(harness: Harness) {
    let draft = TaskDraft::new("Read a book").expect("valid draft");

    let (task, outcome) = harness.service.add_task(&harness.store, draft).await;

    assert!(outcome.is_none());
    assert_eq!(harness.lookup.weather_calls().expect("count calls"), 0);
    assert!(
        lock_store(&harness.store)
            .find(task.id())
            .and_then(|stored| stored.weather().cloned())
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_of_removed_task_is_a_noop(harness: Harness) {
    let task = lock_store(&harness.store).add(TaskDraft::new("Gone").expect("valid draft"));
    lock_store(&harness.store).remove(task.id());

    let outcome = harness
        .service
        .refresh_task_weather(&harness.store, task.id())
        .await;

    assert!(outcome.is_none());
    assert!(lock_store(&harness.store).tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weather_outcome_is_persisted(harness: Harness) {
    harness
        .lookup
        .set_weather("Lisbon", Ok(reading("clear sky", 21.0)))
        .expect("script lookup");

    let (task, _) = harness
        .service
        .add_task(&harness.store, outdoor("Walk the dog", "Lisbon"))
        .await;

    let reopened = TaskStore::open(
        SnapshotPersistence::with_default_key(Arc::new(harness.durable.clone())),
        Arc::new(DefaultClock),
    );
    assert!(
        reopened
            .find(task.id())
            .and_then(|stored| stored.weather())
            .is_some_and(|weather| !weather.is_failure())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_lookups_attach_to_their_own_tasks(harness: Harness) {
    harness
        .lookup
        .set_weather("Lisbon", Ok(reading("clear sky", 21.0)))
        .expect("script lookup");
    harness
        .lookup
        .set_weather("Bergen", Ok(reading("drizzle", 9.0)))
        .expect("script lookup");
    let (first, second) = {
        let mut store = lock_store(&harness.store);
        let first = store.add(outdoor("Surf", "Lisbon"));
        let second = store.add(outdoor("Hike", "Bergen"));
        (first, second)
    };

    let (first_outcome, second_outcome) = tokio::join!(
        harness.service.refresh_task_weather(&harness.store, first.id()),
        harness.service.refresh_task_weather(&harness.store, second.id()),
    );

    assert!(first_outcome.is_some() && second_outcome.is_some());
    let store = lock_store(&harness.store);
    let description = |id| {
        store
            .find(id)
            .and_then(|task| task.weather())
            .and_then(WeatherOutcome::reading)
            .map(|reading| reading.description.clone())
    };
    assert_eq!(description(first.id()).as_deref(), Some("clear sky"));
    assert_eq!(description(second.id()).as_deref(), Some("drizzle"));
    assert_eq!(harness.lookup.weather_calls().expect("count calls"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identical_queries_are_served_from_cache(harness: Harness) {
    let places = vec![
        PlaceSuggestion::new("Paris", "FR"),
        PlaceSuggestion::new("Paris", "US").with_state("Texas"),
    ];
    harness
        .lookup
        .set_places("Par", Ok(places.clone()))
        .expect("script lookup");
    let query = PlaceQuery::new("Par").expect("valid query");

    let first = harness
        .service
        .suggest_places(&harness.store, &query)
        .await
        .expect("first lookup succeeds");
    let second = harness
        .service
        .suggest_places(&harness.store, &query)
        .await
        .expect("second lookup succeeds");

    assert_eq!(first, places);
    assert_eq!(second, places);
    assert_eq!(harness.lookup.place_calls().expect("count calls"), 1);
    assert!(
        harness
            .session
            .get(&SuggestionCache::<InMemoryStorage>::key_for(&query))
            .expect("read cache")
            .is_some()
    );
    assert_eq!(lock_store(&harness.store).state().suggestions(), places.as_slice());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cache_is_keyed_by_literal_query(harness: Harness) {
    harness
        .lookup
        .set_places("Par", Ok(vec![PlaceSuggestion::new("Paris", "FR")]))
        .expect("script lookup");

    for raw in ["Par", "par"] {
        let query = PlaceQuery::new(raw).expect("valid query");
        harness
            .service
            .suggest_places(&harness.store, &query)
            .await
            .expect("lookup succeeds");
    }

    assert_eq!(harness.lookup.place_calls().expect("count calls"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn suggestion_limit_is_forwarded(harness: Harness) {
    let places: Vec<_> = ["Paris", "Parma", "Parnu", "Paros"]
        .into_iter()
        .map(|name| PlaceSuggestion::new(name, "XX"))
        .collect();
    harness
        .lookup
        .set_places("Par", Ok(places))
        .expect("script lookup");
    let service = harness.service.clone().with_suggestion_limit(2);

    let found = service
        .suggest_places(&harness.store, &PlaceQuery::new("Par").expect("valid query"))
        .await
        .expect("lookup succeeds");

    assert_eq!(found.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_suggestion_lookup_sets_request_error(harness: Harness) {
    harness
        .lookup
        .set_places(
            "Par",
            Err(LookupError::transport(std::io::Error::other("offline"))),
        )
        .expect("script lookup");
    let query = PlaceQuery::new("Par").expect("valid query");

    let result = harness.service.suggest_places(&harness.store, &query).await;

    assert!(matches!(result, Err(LookupError::Transport(_))));
    let store = lock_store(&harness.store);
    assert_eq!(
        store.state().request().error.as_deref(),
        Some(DEFAULT_SUGGESTION_ERROR)
    );
    assert!(!store.state().request().loading);
    assert!(harness.session.is_empty().expect("inspect cache"));
}
