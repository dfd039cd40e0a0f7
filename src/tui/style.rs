//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Actual demand line color.
pub const ACTUAL_COLOR: Color = Color::Cyan;
/// Held-out prediction line color.
pub const PREDICTED_COLOR: Color = Color::Yellow;
/// Future forecast line color.
pub const FORECAST_COLOR: Color = Color::Magenta;
/// Horizon slider color.
pub const SLIDER_COLOR: Color = Color::Green;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Computes Y-axis bounds over several series with 10% padding.
pub fn auto_bounds_y(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

/// Computes X-axis bounds, widening a single point to a unit span.
pub fn bounds_x(points: &[(f64, f64)]) -> [f64; 2] {
    let lo = points.first().map_or(0.0, |p| p.0);
    let hi = points.last().map_or(1.0, |p| p.0).max(lo + 1.0);
    [lo, hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_data_range() {
        let a = [(0.0, 10.0), (1.0, 20.0)];
        let b = [(0.0, 15.0)];
        let [lo, hi] = auto_bounds_y(&[&a, &b]);
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 21.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_fall_back() {
        assert_eq!(auto_bounds_y(&[]), [-1.0, 1.0]);
        assert_eq!(bounds_x(&[]), [0.0, 1.0]);
    }
}
