//! Task entity and its scalar value types.

use super::{Location, ParsePriorityError, ParseTaskStatusError, TaskDomainError, TaskId};
use crate::weather::domain::WeatherOutcome;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the ordering weight used when sorting by priority.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Returns the next priority in the low → medium → high cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board column a task is placed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Not started ("To Do").
    #[default]
    Active,
    /// Being worked on.
    InProgress,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "active" => Ok(Self::Active),
            "inProgress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied fields for a task that has not been added yet.
///
/// # Examples
///
/// ```rust
/// use taskboard::task::domain::{Location, Priority, TaskDraft};
///
/// let draft = TaskDraft::new("Walk the dog")
///     .expect("valid draft")
///     .with_priority(Priority::High)
///     .outdoor(Location::new("Paris").expect("valid location"));
/// assert!(draft.is_outdoor());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    text: String,
    priority: Priority,
    location: Option<Location>,
}

impl TaskDraft {
    /// Creates a draft with default priority and no location.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when the text is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = text.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyText);
        }
        Ok(Self {
            text: normalized.to_owned(),
            priority: Priority::default(),
            location: None,
        })
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the task as outdoor at the given location.
    #[must_use]
    pub fn outdoor(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the requested priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns whether the draft describes an outdoor task.
    #[must_use]
    pub const fn is_outdoor(&self) -> bool {
        self.location.is_some()
    }

    /// Returns the location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

/// A single work item on the board.
///
/// Tasks stored before the column, completion or outdoor fields existed
/// load with those fields at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    is_outdoor: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(default)]
    weather: Option<WeatherOutcome>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted text.
    pub text: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted column.
    pub status: TaskStatus,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted outdoor flag.
    pub is_outdoor: bool,
    /// Persisted location, if any.
    pub location: Option<Location>,
    /// Last weather lookup outcome, if any.
    pub weather: Option<WeatherOutcome>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// New tasks always start in the [`TaskStatus::Active`] column, not
    /// completed and without weather data.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let TaskDraft {
            text,
            priority,
            location,
        } = draft;
        Self {
            id: TaskId::new(),
            text,
            priority,
            status: TaskStatus::Active,
            completed: false,
            is_outdoor: location.is_some(),
            location,
            weather: None,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            priority: data.priority,
            status: data.status,
            completed: data.completed,
            is_outdoor: data.is_outdoor,
            location: data.location,
            weather: data.weather,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the board column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completion flag.
    ///
    /// The flag is independent of [`Task::status`]; only
    /// [`Task::move_to_column`] keeps the two aligned.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns whether the task happens outdoors.
    #[must_use]
    pub const fn is_outdoor(&self) -> bool {
        self.is_outdoor
    }

    /// Returns the location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the last weather lookup outcome, if any.
    #[must_use]
    pub const fn weather(&self) -> Option<&WeatherOutcome> {
        self.weather.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the location weather can be looked up for.
    ///
    /// Indoor tasks never yield a location even if one was stored.
    #[must_use]
    pub fn weather_location(&self) -> Option<&Location> {
        self.location.as_ref().filter(|_| self.is_outdoor)
    }

    pub(crate) const fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn set_weather(&mut self, weather: WeatherOutcome) {
        self.weather = Some(weather);
    }

    /// Places the task in a column and aligns the completion flag with it.
    ///
    /// Returns `false` when the task is already in that column.
    pub(crate) fn move_to_column(&mut self, status: TaskStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.completed = matches!(status, TaskStatus::Completed);
        true
    }
}
