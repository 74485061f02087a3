//! Filter, sort and viewport preferences held alongside the task list.

use super::{ParsePriorityError, ParseTaskStatusError, Priority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Priority filter: every priority, or a single one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PriorityFilter {
    /// No filtering by priority.
    #[default]
    All,
    /// Only tasks with this priority.
    Only(Priority),
}

impl PriorityFilter {
    /// Returns whether a task priority passes the filter.
    #[must_use]
    pub fn admits(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl From<PriorityFilter> for String {
    fn from(value: PriorityFilter) -> Self {
        match value {
            PriorityFilter::All => "all".to_owned(),
            PriorityFilter::Only(priority) => priority.as_str().to_owned(),
        }
    }
}

impl TryFrom<String> for PriorityFilter {
    type Error = ParsePriorityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Priority::try_from(value.as_str()).map(Self::Only)
    }
}

/// Status filter: every column, or a single one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StatusFilter {
    /// No filtering by status.
    #[default]
    All,
    /// Only tasks in this column.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns whether a task status passes the filter.
    #[must_use]
    pub fn admits(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::All => "all".to_owned(),
            StatusFilter::Only(status) => status.as_str().to_owned(),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ParseTaskStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskStatus::try_from(value.as_str()).map(Self::Only)
    }
}

/// Global filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring the task text must contain.
    pub search: String,
    /// Priority filter.
    pub priority: PriorityFilter,
    /// Status filter.
    pub status: StatusFilter,
}

impl FilterCriteria {
    /// Applies a single-field update.
    pub fn update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Search(search) => self.search = search,
            FilterUpdate::Priority(priority) => self.priority = priority,
            FilterUpdate::Status(status) => self.status = status,
        }
    }
}

/// Replacement value for one filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Replaces the search text.
    Search(String),
    /// Replaces the priority filter.
    Priority(PriorityFilter),
    /// Replaces the status filter.
    Status(StatusFilter),
}

/// Field the view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Priority rank (high = 3, medium = 2, low = 1).
    Priority,
    /// Insertion order; any unrecognised stored field maps here.
    #[serde(other)]
    Unordered,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending; any unrecognised stored direction maps here.
    #[default]
    #[serde(other)]
    Desc,
}

/// Sort field and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortCriteria {
    /// Field to order by.
    pub field: SortField,
    /// Direction to order in.
    pub order: SortOrder,
}

impl SortCriteria {
    /// Creates sort criteria.
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// Viewport size classification reported by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportClass {
    /// Narrow (phone) viewport.
    pub is_mobile: bool,
    /// Medium (tablet) viewport.
    pub is_tablet: bool,
}

impl ViewportClass {
    /// Creates a viewport classification.
    #[must_use]
    pub const fn new(is_mobile: bool, is_tablet: bool) -> Self {
        Self {
            is_mobile,
            is_tablet,
        }
    }
}
