//! Domain model for the task board.
//!
//! The task domain models the task entity, the filter/sort/viewport
//! preferences stored beside it, the closed set of board mutations, and the
//! pure view derivation. Storage concerns stay outside the domain boundary.

mod criteria;
mod error;
mod ids;
mod mutation;
mod snapshot;
mod state;
mod task;
mod view;

pub use criteria::{
    FilterCriteria, FilterUpdate, PriorityFilter, SortCriteria, SortField, SortOrder,
    StatusFilter, ViewportClass,
};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{Location, TaskId};
pub use mutation::BoardMutation;
pub use snapshot::BoardSnapshot;
pub use state::{BoardState, RequestStatus};
pub use task::{PersistedTaskData, Priority, Task, TaskDraft, TaskStatus};
pub use view::{TaskStats, TaskView};
