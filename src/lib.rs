//! Taskboard: a persistent task board with weather-aware outdoor tasks.
//!
//! This crate provides the core of a kanban-style task manager: a task
//! store whose state is mirrored into key-value storage after every change,
//! a pure filter/sort view over that state, and the plumbing that attaches
//! live weather readings to outdoor tasks.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and lookups
//! - **Adapters**: Concrete implementations of ports (files, HTTP, memory)
//!
//! # Modules
//!
//! - [`task`]: Task store, snapshot persistence and view derivation
//! - [`weather`]: Weather and place lookups for outdoor tasks
//! - [`config`]: Runtime configuration

pub mod config;
pub mod task;
pub mod weather;
