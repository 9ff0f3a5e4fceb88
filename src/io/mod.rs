//! I/O operations module
//!
//! Reading and writing of tab-separated benchmark measurement files.

pub mod tsv;

pub use tsv::{load, load_with, read, save, write};
