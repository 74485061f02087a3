//! In-memory adapters for the task board.

mod storage;

pub use storage::InMemoryStorage;
