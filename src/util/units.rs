//! Units formatting utilities
//!
//! Human-readable formatting of timings and axis values for the
//! terminal viewer.

/// Format a time given in microseconds
///
/// # Examples
/// ```
/// use bmkplot::util::units::format_micros;
///
/// assert_eq!(format_micros(0.25), "0.250µs");
/// assert_eq!(format_micros(12.0), "12.00µs");
/// assert_eq!(format_micros(2500.0), "2.50ms");
/// ```
pub fn format_micros(micros: f64) -> String {
    if micros >= 1000.0 {
        format!("{:.2}ms", micros / 1000.0)
    } else if micros >= 1.0 {
        format!("{:.2}µs", micros)
    } else {
        format!("{:.3}µs", micros)
    }
}

/// Format an axis tick value compactly
///
/// Whole numbers print without decimals, large values use a `k` suffix.
pub fn format_axis_value(value: f64) -> String {
    if value.abs() >= 10_000.0 {
        let thousands = value / 1000.0;
        if thousands.fract() == 0.0 {
            format!("{}k", thousands as i64)
        } else {
            format!("{:.1}k", thousands)
        }
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else if value.abs() >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Evenly spaced tick values from `min` to `max` inclusive
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count).map(|i| min + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_micros() {
        assert_eq!(format_micros(0.0), "0.000µs");
        assert_eq!(format_micros(1.5), "1.50µs");
        assert_eq!(format_micros(1000.0), "1.00ms");
    }

    #[test]
    fn test_format_axis_value() {
        assert_eq!(format_axis_value(50.0), "50");
        assert_eq!(format_axis_value(20000.0), "20k");
        assert_eq!(format_axis_value(12500.0), "12.5k");
        assert_eq!(format_axis_value(2.3), "2.3");
        assert_eq!(format_axis_value(0.125), "0.125");
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
        assert_eq!(ticks(2.0, 4.0, 1), vec![2.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }
}
