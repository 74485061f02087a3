//! Closed set of board mutations.

use super::{FilterUpdate, Priority, SortCriteria, Task, TaskId, TaskStatus, ViewportClass};
use crate::weather::domain::{PlaceSuggestion, WeatherOutcome};

/// A single change to the board state.
///
/// Task-addressed variants are no-ops when no task has the given identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMutation {
    /// Appends a task.
    AddTask(Task),
    /// Removes the task with the identifier.
    RemoveTask(TaskId),
    /// Flips the completion flag.
    ToggleCompleted(TaskId),
    /// Replaces the task text.
    EditText {
        /// Target task.
        id: TaskId,
        /// Replacement text.
        text: String,
    },
    /// Replaces the priority.
    SetPriority {
        /// Target task.
        id: TaskId,
        /// New priority.
        priority: Priority,
    },
    /// Advances the priority to the next one in the cycle.
    CyclePriority(TaskId),
    /// Replaces the column without touching the completion flag.
    SetStatus {
        /// Target task.
        id: TaskId,
        /// New column.
        status: TaskStatus,
    },
    /// Moves the task to a column and aligns the completion flag.
    MoveToColumn {
        /// Target task.
        id: TaskId,
        /// Destination column.
        status: TaskStatus,
    },
    /// Records a weather lookup outcome.
    SetWeather {
        /// Target task.
        id: TaskId,
        /// Reading or error marker.
        weather: WeatherOutcome,
    },
    /// Updates one filter field.
    SetFilter(FilterUpdate),
    /// Replaces the sort criteria.
    SetSort(SortCriteria),
    /// Replaces the viewport classification.
    SetViewportClass(ViewportClass),
    /// Marks an async lookup as in flight.
    RequestStarted,
    /// Marks the last async lookup as finished.
    RequestFinished {
        /// Failure message, if the lookup failed.
        error: Option<String>,
    },
    /// Replaces the last place suggestion list.
    SetSuggestions(Vec<PlaceSuggestion>),
}

impl BoardMutation {
    /// Returns whether applying the mutation must be followed by a snapshot
    /// write.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        match self {
            Self::AddTask(_)
            | Self::RemoveTask(_)
            | Self::ToggleCompleted(_)
            | Self::EditText { .. }
            | Self::SetPriority { .. }
            | Self::CyclePriority(_)
            | Self::SetStatus { .. }
            | Self::MoveToColumn { .. }
            | Self::SetWeather { .. }
            | Self::SetFilter(_)
            | Self::SetSort(_)
            | Self::SetViewportClass(_) => true,
            Self::RequestStarted | Self::RequestFinished { .. } | Self::SetSuggestions(_) => false,
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddTask(_) => "add_task",
            Self::RemoveTask(_) => "remove_task",
            Self::ToggleCompleted(_) => "toggle_completed",
            Self::EditText { .. } => "edit_text",
            Self::SetPriority { .. } => "set_priority",
            Self::CyclePriority(_) => "cycle_priority",
            Self::SetStatus { .. } => "set_status",
            Self::MoveToColumn { .. } => "move_to_column",
            Self::SetWeather { .. } => "set_weather",
            Self::SetFilter(_) => "set_filter",
            Self::SetSort(_) => "set_sort",
            Self::SetViewportClass(_) => "set_viewport_class",
            Self::RequestStarted => "request_started",
            Self::RequestFinished { .. } => "request_finished",
            Self::SetSuggestions(_) => "set_suggestions",
        }
    }
}
