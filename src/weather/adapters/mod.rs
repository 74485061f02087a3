//! Adapter implementations for the lookup ports.

pub mod memory;
pub mod openweather;
