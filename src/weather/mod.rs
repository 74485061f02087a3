//! Weather and place lookups attached to outdoor tasks.
//!
//! The lookups themselves belong to an external service; this module
//! defines what the board consumes from it and how outcomes reach tasks.
//! It follows the same hexagonal split as [`crate::task`]:
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
