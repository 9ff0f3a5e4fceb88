//! Terminal viewer module
//!
//! Contains the crossterm terminal wrapper and the chart screen used to
//! present a figure interactively.

pub mod tui;
pub mod viewer;

pub use tui::Tui;
pub use viewer::{ChartScreen, Viewer, ViewerAction};
