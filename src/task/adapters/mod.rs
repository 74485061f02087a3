//! Adapter implementations for the task board ports.

pub mod directory;
pub mod memory;
