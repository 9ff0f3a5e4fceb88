//! Chart construction and presentation
//!
//! `render` turns a [`BenchmarkTable`] into a [`Figure`] without touching any
//! output device; `present` hands a figure to the terminal viewer or to a
//! file exporter.

use std::path::PathBuf;

use log::debug;

use crate::app::Viewer;
use crate::models::figure::DEFAULT_SIZE;
use crate::models::table::{MAP_COLUMN, RBTREE_COLUMN, UNORDERED_MAP_COLUMN};
use crate::models::{BenchmarkTable, Figure, Rgb, Series, Subplot};
use crate::{BmkError, Result, Y_LABEL};

pub mod export;

pub use export::{export, ExportFormat};

/// Timing columns and their legend labels, in drawing order
pub const SERIES_ORDER: [(&str, &str); 3] = [
    (MAP_COLUMN, "map"),
    (UNORDERED_MAP_COLUMN, "unordered_map"),
    (RBTREE_COLUMN, "RBTree"),
];

/// Build the comparison figure at the default size
pub fn render(table: &BenchmarkTable, title: &str, x_label: &str) -> Result<Figure> {
    render_with_size(table, title, x_label, DEFAULT_SIZE)
}

/// Build the comparison figure at an explicit pixel size
///
/// Every series shares the table's independent column as x; series are
/// always produced in `map`, `unordered_map`, `RBTree` order.
pub fn render_with_size(
    table: &BenchmarkTable,
    title: &str,
    x_label: &str,
    size: (u32, u32),
) -> Result<Figure> {
    let xs = &table.x().values;

    let mut series = Vec::with_capacity(SERIES_ORDER.len());
    for (index, (column, label)) in SERIES_ORDER.iter().enumerate() {
        let values = table
            .columns()
            .iter()
            .skip(1)
            .find(|c| c.label == *column)
            .ok_or_else(|| {
                BmkError::RenderError(format!(
                    "table has no '{}' column (found: {})",
                    column,
                    table.labels().join(", ")
                ))
            })?;

        series.push(Series {
            label: label.to_string(),
            color: Rgb::for_series(index),
            points: xs.iter().copied().zip(values.values.iter().copied()).collect(),
        });
    }

    debug!(
        "Rendered '{}' with {} series of {} points",
        title,
        series.len(),
        table.row_count()
    );

    Ok(Figure {
        title: title.to_string(),
        size,
        subplot: Subplot {
            x_label: x_label.to_string(),
            y_label: Y_LABEL.to_string(),
            series,
            legend: true,
        },
    })
}

/// Final disposition of a figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Show in the terminal and block until dismissed
    Interactive,
    /// Write to a file, format chosen by extension
    Export(PathBuf),
}

impl Presentation {
    /// Export when an output path is given, interactive otherwise
    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => Presentation::Export(path),
            None => Presentation::Interactive,
        }
    }
}

/// Display or export a figure
pub fn present(figure: &Figure, presentation: &Presentation) -> Result<()> {
    match presentation {
        Presentation::Interactive => Viewer::new(figure.clone())?.run(),
        Presentation::Export(path) => export(figure, path),
    }
}
