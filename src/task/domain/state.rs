//! In-memory board state and mutation semantics.

use super::{
    BoardMutation, BoardSnapshot, FilterCriteria, SortCriteria, Task, TaskId, TaskStats,
    TaskStatus, TaskView, ViewportClass,
};
use crate::weather::domain::PlaceSuggestion;

/// Progress of the last asynchronous lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    /// Whether a lookup is in flight.
    pub loading: bool,
    /// Failure message of the last finished lookup.
    pub error: Option<String>,
}

/// Full board state: the persisted snapshot fields plus transient request
/// data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    tasks: Vec<Task>,
    filters: FilterCriteria,
    sort: SortCriteria,
    ui: ViewportClass,
    request: RequestStatus,
    suggestions: Vec<PlaceSuggestion>,
}

impl BoardState {
    /// Creates a state from a loaded snapshot with idle request status.
    #[must_use]
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let mut state = Self::default();
        state.overlay(snapshot);
        state
    }

    /// Returns the persisted portion of the state.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.tasks.clone(),
            filters: self.filters.clone(),
            sort_by: self.sort.field,
            sort_order: self.sort.order,
            ui: self.ui,
        }
    }

    /// Overwrites every persisted field with the snapshot's values.
    ///
    /// Request status and suggestions are left untouched.
    pub fn overlay(&mut self, snapshot: BoardSnapshot) {
        self.sort = snapshot.sort();
        self.tasks = snapshot.tasks;
        self.filters = snapshot.filters;
        self.ui = snapshot.ui;
    }

    /// Returns tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the global filter criteria.
    #[must_use]
    pub const fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Returns the sort criteria.
    #[must_use]
    pub const fn sort(&self) -> SortCriteria {
        self.sort
    }

    /// Returns the viewport classification.
    #[must_use]
    pub const fn ui(&self) -> ViewportClass {
        self.ui
    }

    /// Returns the last request status.
    #[must_use]
    pub const fn request(&self) -> &RequestStatus {
        &self.request
    }

    /// Returns the last place suggestion list.
    #[must_use]
    pub fn suggestions(&self) -> &[PlaceSuggestion] {
        &self.suggestions
    }

    /// Returns a view using the global filter and sort criteria.
    #[must_use]
    pub const fn view(&self) -> TaskView<'_> {
        TaskView::new(&self.filters, self.sort)
    }

    /// Returns the filtered, sorted tasks for the whole board.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.view().apply(&self.tasks)
    }

    /// Returns the filtered, sorted tasks for one column.
    #[must_use]
    pub fn column_tasks(&self, status: TaskStatus) -> Vec<&Task> {
        self.view().for_column(status).apply(&self.tasks)
    }

    /// Returns counts over all tasks, ignoring filters.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Applies a mutation.
    ///
    /// Returns `false` when the mutation addressed a task that does not
    /// exist or otherwise left the state unchanged.
    pub fn apply(&mut self, mutation: BoardMutation) -> bool {
        match mutation {
            BoardMutation::AddTask(task) => {
                self.tasks.push(task);
                true
            }
            BoardMutation::RemoveTask(id) => {
                let before = self.tasks.len();
                self.tasks.retain(|task| task.id() != id);
                self.tasks.len() != before
            }
            BoardMutation::ToggleCompleted(id) => self.with_task(id, Task::toggle_completed),
            BoardMutation::EditText { id, text } => self.with_task(id, |task| task.set_text(text)),
            BoardMutation::SetPriority { id, priority } => {
                self.with_task(id, |task| task.set_priority(priority))
            }
            BoardMutation::CyclePriority(id) => {
                self.with_task(id, |task| task.set_priority(task.priority().next()))
            }
            BoardMutation::SetStatus { id, status } => {
                self.with_task(id, |task| task.set_status(status))
            }
            BoardMutation::MoveToColumn { id, status } => self
                .tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .is_some_and(|task| task.move_to_column(status)),
            BoardMutation::SetWeather { id, weather } => {
                self.with_task(id, |task| task.set_weather(weather))
            }
            BoardMutation::SetFilter(update) => {
                self.filters.update(update);
                true
            }
            BoardMutation::SetSort(sort) => {
                self.sort = sort;
                true
            }
            BoardMutation::SetViewportClass(ui) => {
                self.ui = ui;
                true
            }
            BoardMutation::RequestStarted => {
                self.request = RequestStatus {
                    loading: true,
                    error: None,
                };
                true
            }
            BoardMutation::RequestFinished { error } => {
                self.request = RequestStatus {
                    loading: false,
                    error,
                };
                true
            }
            BoardMutation::SetSuggestions(suggestions) => {
                self.suggestions = suggestions;
                true
            }
        }
    }

    fn with_task(&mut self, id: TaskId, change: impl FnOnce(&mut Task)) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            return false;
        };
        change(task);
        true
    }
}
