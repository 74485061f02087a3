//! Task store: canonical board state mirrored into durable storage.

use super::SnapshotPersistence;
use crate::task::{
    domain::{
        BoardMutation, BoardState, FilterUpdate, Priority, SortCriteria, Task, TaskDraft, TaskId,
        TaskStats, TaskStatus, ViewportClass,
    },
    ports::KeyValueStorage,
};
use crate::weather::domain::WeatherOutcome;
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Task store shared between the presentation layer and in-flight lookups.
pub type SharedTaskStore<S, C> = Arc<Mutex<TaskStore<S, C>>>;

/// Owns the board state and writes a snapshot after every persisted
/// mutation.
///
/// Mutations apply synchronously. A failed snapshot write does not roll the
/// in-memory change back; it is only logged.
pub struct TaskStore<S, C>
where
    S: KeyValueStorage,
    C: Clock + Send + Sync,
{
    state: BoardState,
    persistence: SnapshotPersistence<S>,
    clock: Arc<C>,
}

impl<S, C> TaskStore<S, C>
where
    S: KeyValueStorage,
    C: Clock + Send + Sync,
{
    /// Opens the store, starting from the stored snapshot or from initial
    /// defaults when none can be loaded.
    #[must_use]
    pub fn open(persistence: SnapshotPersistence<S>, clock: Arc<C>) -> Self {
        let state = persistence
            .load()
            .map(BoardState::from_snapshot)
            .unwrap_or_default();
        debug!(tasks = state.tasks().len(), "opened task store");
        Self {
            state,
            persistence,
            clock,
        }
    }

    /// Wraps the store for sharing with asynchronous lookups.
    #[must_use]
    pub fn into_shared(self) -> SharedTaskStore<S, C> {
        Arc::new(Mutex::new(self))
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.state.find(id)
    }

    /// Returns the filtered, sorted tasks for the whole board.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.state.visible_tasks()
    }

    /// Returns the filtered, sorted tasks for one column.
    #[must_use]
    pub fn column_tasks(&self, status: TaskStatus) -> Vec<&Task> {
        self.state.column_tasks(status)
    }

    /// Returns counts over all tasks.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        self.state.stats()
    }

    /// Returns the persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &SnapshotPersistence<S> {
        &self.persistence
    }

    /// Applies a mutation and writes a snapshot when the mutation is
    /// persisted and changed the state.
    ///
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, mutation: BoardMutation) -> bool {
        let kind = mutation.kind();
        let persisted = mutation.is_persisted();
        let changed = self.state.apply(mutation);
        debug!(mutation = kind, changed, "applied board mutation");
        if persisted && changed {
            self.persistence.save(&self.state.snapshot());
        }
        changed
    }

    /// Creates a task from a draft and appends it.
    ///
    /// Returns a copy of the created task.
    pub fn add(&mut self, draft: TaskDraft) -> Task {
        let task = Task::new(draft, &*self.clock);
        self.dispatch(BoardMutation::AddTask(task.clone()));
        task
    }

    /// Removes a task. No-op when absent.
    pub fn remove(&mut self, id: TaskId) -> bool {
        self.dispatch(BoardMutation::RemoveTask(id))
    }

    /// Flips a task's completion flag. No-op when absent.
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        self.dispatch(BoardMutation::ToggleCompleted(id))
    }

    /// Replaces a task's text. No-op when absent.
    ///
    /// The text is stored as given; rejecting blank edits is up to the
    /// caller.
    pub fn edit_text(&mut self, id: TaskId, text: impl Into<String>) -> bool {
        self.dispatch(BoardMutation::EditText {
            id,
            text: text.into(),
        })
    }

    /// Replaces a task's priority. No-op when absent.
    pub fn set_priority(&mut self, id: TaskId, priority: Priority) -> bool {
        self.dispatch(BoardMutation::SetPriority { id, priority })
    }

    /// Advances a task's priority along low → medium → high → low.
    pub fn cycle_priority(&mut self, id: TaskId) -> bool {
        self.dispatch(BoardMutation::CyclePriority(id))
    }

    /// Replaces a task's column without touching its completion flag.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> bool {
        self.dispatch(BoardMutation::SetStatus { id, status })
    }

    /// Moves a task to a column, marking it completed exactly when the
    /// column is [`TaskStatus::Completed`].
    pub fn move_to_column(&mut self, id: TaskId, status: TaskStatus) -> bool {
        self.dispatch(BoardMutation::MoveToColumn { id, status })
    }

    /// Records a weather outcome on a task. No-op when absent.
    pub fn set_weather(&mut self, id: TaskId, weather: WeatherOutcome) -> bool {
        self.dispatch(BoardMutation::SetWeather { id, weather })
    }

    /// Updates one filter field.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.dispatch(BoardMutation::SetFilter(update));
    }

    /// Replaces the sort criteria.
    pub fn set_sort(&mut self, sort: SortCriteria) {
        self.dispatch(BoardMutation::SetSort(sort));
    }

    /// Replaces the viewport classification.
    pub fn set_viewport_class(&mut self, ui: ViewportClass) {
        self.dispatch(BoardMutation::SetViewportClass(ui));
    }

    /// Re-reads the stored snapshot and overwrites the persisted fields of
    /// the in-memory state with it.
    ///
    /// This picks up changes written by another session; it is a
    /// last-writer-wins overwrite, not a merge. Returns `false`, leaving the
    /// state untouched, when no snapshot can be loaded.
    pub fn reload(&mut self) -> bool {
        let Some(snapshot) = self.persistence.load() else {
            return false;
        };
        info!(tasks = snapshot.tasks.len(), "reloaded board snapshot");
        self.state.overlay(snapshot);
        true
    }
}

/// Locks a shared store, recovering the guard if a holder panicked.
///
/// Store mutations never leave the state half-applied, so a poisoned lock
/// still guards a consistent value.
pub fn lock_store<S, C>(store: &Mutex<TaskStore<S, C>>) -> MutexGuard<'_, TaskStore<S, C>>
where
    S: KeyValueStorage,
    C: Clock + Send + Sync,
{
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
