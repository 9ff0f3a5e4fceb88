//! BMKPLOT - Benchmark comparison plots
//!
//! Loads tab-separated lookup benchmark measurements (std-style map,
//! unordered_map and a red-black tree) and renders them as a single
//! time-vs-size comparison chart, either in the terminal or as an image.

use std::fmt;
use std::path::PathBuf;

// Public re-exports
pub mod app;
pub mod bench;
pub mod chart;
pub mod config;
pub mod io;
pub mod models;
pub mod util;

pub use chart::{present, render, Presentation};
pub use io::tsv::{load, write};
pub use models::{BenchmarkTable, Figure};

// Common error types
#[derive(Debug)]
pub enum BmkError {
    /// Input path does not exist
    NotFound(PathBuf),
    /// A row does not match the fixed four-column numeric schema
    DataFormat {
        /// 1-based line number in the source file
        line: u64,
        /// What was wrong with the line
        message: String,
    },
    /// Table is missing columns required by the chart
    RenderError(String),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// I/O operation failed
    IoError(std::io::Error),
    /// Terminal viewer setup or drawing error
    TerminalError(String),
    /// Image or data export error
    ExportError(String),
}

impl fmt::Display for BmkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmkError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            BmkError::DataFormat { line, message } => {
                write!(f, "Data format error on line {}: {}", line, message)
            }
            BmkError::RenderError(msg) => write!(f, "Render error: {}", msg),
            BmkError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BmkError::IoError(err) => write!(f, "I/O error: {}", err),
            BmkError::TerminalError(msg) => write!(f, "Terminal error: {}", msg),
            BmkError::ExportError(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for BmkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BmkError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BmkError {
    fn from(err: std::io::Error) -> Self {
        BmkError::IoError(err)
    }
}

impl From<csv::Error> for BmkError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => BmkError::IoError(io_err),
            _ => BmkError::DataFormat { line, message },
        }
    }
}

impl From<serde_json::Error> for BmkError {
    fn from(err: serde_json::Error) -> Self {
        BmkError::ExportError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for BmkError {
    fn from(err: toml::de::Error) -> Self {
        BmkError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for BmkError {
    fn from(err: toml::ser::Error) -> Self {
        BmkError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for BMKPLOT operations
pub type Result<T> = std::result::Result<T, BmkError>;

/// Error reporting helpers for the command line
pub mod error {
    use super::BmkError;

    /// Convert error to a user-facing message with a hint where one helps
    pub fn user_friendly_message(error: &BmkError) -> String {
        match error {
            BmkError::NotFound(path) => format!(
                "Input file {} does not exist. Run `bmkplot generate` first or pass a path.",
                path.display()
            ),
            BmkError::DataFormat { line, message } => format!(
                "Line {} is not a row of four tab-separated numbers ({}).",
                line, message
            ),
            BmkError::RenderError(msg) => {
                format!("Cannot draw the chart: {}", msg)
            }
            BmkError::TerminalError(_) => {
                "Cannot open the terminal viewer. Use --output to write an image instead."
                    .to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "bmkplot";
pub const CONFIG_FILE: &str = "bmkplot.toml";
pub const NODES_FILE: &str = "bmk_measures.txt";
pub const DOUBLE_FILE: &str = "bmk_measures_double.txt";
pub const Y_LABEL: &str = "time (µs)";
