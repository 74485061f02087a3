//! Unit tests for the weather context.

mod service_tests;
