//! Application services for the task board.

mod persistence;
mod store;

pub use persistence::{DEFAULT_SNAPSHOT_KEY, PersistenceError, SnapshotPersistence};
pub use store::{SharedTaskStore, TaskStore, lock_store};
