//! Utility functions module
//!
//! Contains helpers for formatting timings and axis ticks.

pub mod units;

// Re-export commonly used functions
pub use units::{format_axis_value, format_micros, ticks};
