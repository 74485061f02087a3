//! Derived, read-only projections of the task list.

use super::{FilterCriteria, Priority, SortCriteria, SortField, SortOrder, Task, TaskStatus};
use std::cmp::Ordering;

/// Filter-and-sort projection over a task sequence.
///
/// The view never mutates or caches anything; every call to
/// [`TaskView::apply`] derives the result afresh.
#[derive(Debug, Clone, Copy)]
pub struct TaskView<'a> {
    filters: &'a FilterCriteria,
    sort: SortCriteria,
    column: Option<TaskStatus>,
}

impl<'a> TaskView<'a> {
    /// Creates a board-wide view.
    #[must_use]
    pub const fn new(filters: &'a FilterCriteria, sort: SortCriteria) -> Self {
        Self {
            filters,
            sort,
            column: None,
        }
    }

    /// Restricts the view to one column.
    ///
    /// The column replaces the global status filter; search, priority and
    /// sort criteria still apply.
    #[must_use]
    pub const fn for_column(mut self, status: TaskStatus) -> Self {
        self.column = Some(status);
        self
    }

    /// Returns whether a task passes every filter of the view.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = match self.column {
            Some(column) => task.status() == column,
            None => self.filters.status.admits(task.status()),
        };
        status_matches
            && self.filters.priority.admits(task.priority())
            && contains_ignoring_case(task.text(), &self.filters.search)
    }

    /// Filters and orders the tasks.
    ///
    /// The sort is stable, so tasks comparing equal keep their input order.
    #[must_use]
    pub fn apply<'t>(&self, tasks: impl IntoIterator<Item = &'t Task>) -> Vec<&'t Task> {
        let mut visible: Vec<&Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .collect();
        let field = self.sort.field;
        visible.sort_by(|left, right| match self.sort.order {
            SortOrder::Asc => compare(field, left, right),
            SortOrder::Desc => compare(field, right, left),
        });
        visible
    }
}

/// Unordered fields compare equal, which the stable sort turns into a
/// pass-through.
fn compare(field: SortField, left: &Task, right: &Task) -> Ordering {
    match field {
        SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        SortField::Priority => left.priority().rank().cmp(&right.priority().rank()),
        SortField::Unordered => Ordering::Equal,
    }
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Summary counts over a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with the completion flag set.
    pub completed: usize,
    /// Tasks with high priority.
    pub high_priority: usize,
    /// Outdoor tasks.
    pub outdoor: usize,
}

impl TaskStats {
    /// Counts the tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            stats.completed += usize::from(task.is_completed());
            stats.high_priority += usize::from(task.priority() == Priority::High);
            stats.outdoor += usize::from(task.is_outdoor());
            stats
        })
    }
}
