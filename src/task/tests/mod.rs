//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain values, view derivation, snapshot
//! persistence, storage adapters, and store orchestration.
