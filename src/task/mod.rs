//! Task board state management.
//!
//! This module owns the canonical task list together with the filter, sort
//! and viewport preferences stored beside it. Every persisted mutation is
//! followed by a full snapshot write; storage failures are logged and never
//! surface to callers. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
