//! File export of figures
//!
//! PNG and SVG are drawn with plotters; JSON dumps the figure data itself.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::models::{Figure, Rgb};
use crate::{BmkError, Result};

// Font sizes, scaled for the default 1500x1000 canvas
const TITLE_FONT_SIZE: u32 = 40;
const AXIS_LABEL_FONT_SIZE: u32 = 26;
const TICK_LABEL_FONT_SIZE: u32 = 20;
const LEGEND_FONT_SIZE: u32 = 22;

const LINE_WIDTH: u32 = 2;
// Fraction of the data range added on each side of both axes
const AXIS_MARGIN: f64 = 0.05;
const EMPTY_BOUNDS: (f64, f64, f64, f64) = (0.0, 1.0, 0.0, 1.0);

/// Output encodings understood by [`export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
    Json,
}

impl ExportFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(ExportFormat::Png),
            Some("svg") => Ok(ExportFormat::Svg),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(BmkError::ConfigError(format!(
                "Unsupported output format for {} (use .png, .svg or .json)",
                path.display()
            ))),
        }
    }
}

/// Write a figure to `path`
pub fn export(figure: &Figure, path: &Path) -> Result<()> {
    let format = ExportFormat::from_path(path)?;

    match format {
        ExportFormat::Png => {
            let root = BitMapBackend::new(path, figure.size).into_drawing_area();
            draw(figure, &root)?;
        }
        ExportFormat::Svg => {
            let root = SVGBackend::new(path, figure.size).into_drawing_area();
            draw(figure, &root)?;
        }
        ExportFormat::Json => {
            let file = File::create(path)?;
            serde_json::to_writer_pretty(BufWriter::new(file), figure)?;
        }
    }

    info!("Saved '{}' to {} ({:?})", figure.title, path.display(), format);
    Ok(())
}

fn plot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> BmkError {
    BmkError::ExportError(err.to_string())
}

fn padded(min: f64, max: f64) -> std::ops::Range<f64> {
    let pad = (max - min) * AXIS_MARGIN;
    (min - pad)..(max + pad)
}

fn draw<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()> {
    // A header-only file still gets a titled, labeled, empty chart
    let (x_min, x_max, y_min, y_max) = figure.subplot.bounds().unwrap_or(EMPTY_BOUNDS);

    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(padded(x_min, x_max), padded(y_min, y_max))
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(figure.subplot.x_label.as_str())
        .y_desc(figure.subplot.y_label.as_str())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(plot_error)?;

    for series in &figure.subplot.series {
        let Rgb(r, g, b) = series.color;
        let color = RGBColor(r, g, b);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(LINE_WIDTH),
            ))
            .map_err(plot_error)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    if figure.subplot.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()
            .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}
