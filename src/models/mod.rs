//! Data models module
//!
//! Contains the parsed benchmark table and the in-memory figure
//! produced from it.

pub mod figure;
pub mod table;

// Re-export commonly used types
pub use figure::{Figure, Rgb, Series, Subplot};
pub use table::{BenchmarkTable, Column};
