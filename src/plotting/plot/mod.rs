//! Plot types for visualizing data.

mod line;
mod scatter;

pub use line::LinePlot;
pub use scatter::ScatterPlot;

use crate::plotting::backend::Canvas;
use crate::plotting::element::{Bounds, DataTransform, LegendEntry};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::style::{LineStyle, MarkerStyle};

/// Trait for plot types that can be rendered.
pub trait Plot: std::fmt::Debug {
    /// Data bounds of the finite points, if there are any.
    fn bounds(&self) -> Option<Bounds>;

    /// Label shown in the legend.
    fn label(&self) -> Option<&str>;

    fn line_style(&self) -> Option<LineStyle> {
        None
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        None
    }

    /// Create a legend entry for this plot.
    fn legend_entry(&self) -> Option<LegendEntry> {
        self.label().map(|label| {
            let mut entry = LegendEntry::new(label);
            if let Some(style) = self.line_style() {
                entry = entry.line_style(style);
            }
            if let Some(style) = self.marker_style() {
                entry = entry.marker_style(style);
            }
            entry
        })
    }

    /// Draw the plot through a data-to-canvas transform.
    fn draw(&self, canvas: &mut dyn Canvas, transform: &DataTransform);
}

/// Check that x and y series can be paired up.
pub(crate) fn check_series(x: &[f64], y: &[f64]) -> PlotResult<()> {
    if x.is_empty() || y.is_empty() {
        return Err(PlotError::EmptyData);
    }
    if x.len() != y.len() {
        return Err(PlotError::InvalidData(format!(
            "x has {} values but y has {}",
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

/// Bounds over the pairs where both coordinates are finite.
pub(crate) fn finite_bounds(x: &[f64], y: &[f64]) -> Option<Bounds> {
    let mut bounds = Bounds::empty();
    for (&x, &y) in x.iter().zip(y.iter()) {
        if x.is_finite() && y.is_finite() {
            bounds.include_point(x, y);
        }
    }
    if bounds.is_finite() {
        Some(bounds)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_series() {
        assert!(check_series(&[1.0], &[2.0]).is_ok());
        assert!(matches!(check_series(&[], &[]), Err(PlotError::EmptyData)));
        assert!(matches!(
            check_series(&[1.0, 2.0], &[1.0]),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn test_finite_bounds_skips_nan() {
        let b = finite_bounds(&[0.0, f64::NAN, 2.0], &[1.0, 5.0, -1.0]).unwrap();
        assert_eq!(b, Bounds::new(0.0, 2.0, -1.0, 1.0));
        assert!(finite_bounds(&[f64::NAN], &[1.0]).is_none());
    }
}
