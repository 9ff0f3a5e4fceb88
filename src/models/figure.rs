//! Figure data model
//!
//! A rendered chart held entirely in memory. Nothing here draws; the
//! presentation backends in `chart` consume it.

use serde::{Deserialize, Serialize};

/// Default figure size in pixels (15x10 inches at 100 dpi)
pub const DEFAULT_SIZE: (u32, u32) = (1500, 1000);

/// RGB color of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Series colors by position, blue, orange, green
pub const PALETTE: [Rgb; 3] = [Rgb(31, 119, 180), Rgb(255, 127, 14), Rgb(44, 160, 44)];

impl Rgb {
    /// Color for the series at `index`, cycling through the palette
    pub fn for_series(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

/// One plotted line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label
    pub label: String,
    /// Line color
    pub color: Rgb,
    /// `(x, y)` points in table order
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// X values of all points
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|(x, _)| *x).collect()
    }

    /// Y values of all points
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
}

/// The single set of axes inside a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subplot {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Whether a legend is attached
    pub legend: bool,
}

impl Subplot {
    /// Data bounds `(x_min, x_max, y_min, y_max)` over all series
    ///
    /// Returns `None` when there are no points. Degenerate ranges are
    /// widened so that callers can always build a non-empty axis.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let &(x0, y0) = points.next()?;
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if x_min == x_max {
            x_min -= 0.5;
            x_max += 0.5;
        }
        if y_min == y_max {
            y_min -= 0.5;
            y_max += 0.5;
        }
        Some((x_min, x_max, y_min, y_max))
    }
}

/// A complete chart: title, size and one subplot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    /// Width and height in pixels
    pub size: (u32, u32),
    pub subplot: Subplot,
}

impl Figure {
    /// All series of the figure in drawing order
    pub fn series(&self) -> &[Series] {
        &self.subplot.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subplot(points: Vec<(f64, f64)>) -> Subplot {
        Subplot {
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: vec![Series {
                label: "s".to_string(),
                color: Rgb::for_series(0),
                points,
            }],
            legend: true,
        }
    }

    #[test]
    fn test_bounds() {
        let s = subplot(vec![(10.0, 5.0), (100.0, 50.0), (50.0, 2.0)]);
        assert_eq!(s.bounds(), Some((10.0, 100.0, 2.0, 50.0)));
    }

    #[test]
    fn test_bounds_degenerate_and_empty() {
        let s = subplot(vec![(1.0, 3.0)]);
        assert_eq!(s.bounds(), Some((0.5, 1.5, 2.5, 3.5)));
        assert_eq!(subplot(Vec::new()).bounds(), None);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(Rgb::for_series(0), Rgb(31, 119, 180));
        assert_eq!(Rgb::for_series(3), Rgb::for_series(0));
    }
}
