//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod storage;

pub use storage::{KeyValueStorage, StorageError, StorageResult};
