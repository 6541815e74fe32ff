//! Scatter plot implementation.

use super::finite_bounds;
use crate::plotting::backend::Canvas;
use crate::plotting::element::{Bounds, DataTransform};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, Marker, MarkerStyle};

/// A scatter plot showing individual data points.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker_style: MarkerStyle,
    pub label: Option<String>,
    /// Per-point marker sizes, cycled when shorter than the data
    pub sizes: Option<Vec<f64>>,
    /// Per-point colors, cycled when shorter than the data
    pub colors: Option<Vec<Color>>,
}

impl ScatterPlot {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        ScatterPlot {
            x,
            y,
            marker_style: MarkerStyle::new(Marker::Circle),
            label: None,
            sizes: None,
            colors: None,
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.marker_style = self.marker_style.color(color);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker_style.marker = marker;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.marker_style.size = size;
        self
    }

    pub fn sizes(mut self, sizes: Vec<f64>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.marker_style.fill_opacity = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn edge_width(mut self, width: f64) -> Self {
        self.marker_style.edge_width = width;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marker style for the point at `index`.
    fn style_at(&self, index: usize) -> MarkerStyle {
        let mut style = self.marker_style.clone();
        if let Some(size) = self.sizes.as_ref().filter(|s| !s.is_empty()).map(|s| s[index % s.len()]) {
            style.size = size;
        }
        if let Some(color) = self.colors.as_ref().filter(|c| !c.is_empty()).map(|c| &c[index % c.len()]) {
            style.fill = color.clone();
            style.edge_color = color.clone();
        }
        style
    }
}

impl Plot for ScatterPlot {
    fn bounds(&self) -> Option<Bounds> {
        finite_bounds(&self.x, &self.y)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        Some(self.marker_style.clone())
    }

    fn draw(&self, canvas: &mut dyn Canvas, transform: &DataTransform) {
        for (i, (&x, &y)) in self.x.iter().zip(self.y.iter()).enumerate() {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            let (px, py) = transform.apply(x, y);
            self.style_at(i).draw_at(canvas, px, py);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::backend::SvgCanvas;

    #[test]
    fn test_per_point_styles_cycle() {
        let plot = ScatterPlot::new(vec![0.0; 3], vec![0.0; 3])
            .sizes(vec![2.0, 4.0])
            .colors(vec![Color::RED]);
        assert_eq!(plot.style_at(0).size, 2.0);
        assert_eq!(plot.style_at(1).size, 4.0);
        assert_eq!(plot.style_at(2).size, 2.0);
        assert_eq!(plot.style_at(2).fill, Color::RED);
    }

    #[test]
    fn test_draw_skips_non_finite() {
        let plot = ScatterPlot::new(vec![0.0, f64::NAN, 1.0], vec![0.0, 1.0, 1.0]);
        let transform = DataTransform::new(Bounds::default(), Bounds::new(0.0, 100.0, 0.0, 100.0));
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        plot.draw(&mut canvas, &transform);
        assert_eq!(canvas.finish().matches("<circle").count(), 2);
    }
}
