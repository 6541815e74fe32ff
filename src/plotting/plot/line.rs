//! Line plot implementation.

use super::finite_bounds;
use crate::plotting::backend::Canvas;
use crate::plotting::element::{Bounds, DataTransform};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, DashPattern, LineStyle, Marker, MarkerStyle};

/// A line plot connecting data points.
#[derive(Debug, Clone)]
pub struct LinePlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line_style: LineStyle,
    pub marker_style: Option<MarkerStyle>,
    pub label: Option<String>,
}

impl LinePlot {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        LinePlot {
            x,
            y,
            line_style: LineStyle::default(),
            marker_style: None,
            label: None,
        }
    }

    /// Set the line color; markers follow it.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.line_style.color = color.into();
        if let Some(ref mut marker) = self.marker_style {
            marker.fill = self.line_style.color.clone();
            marker.edge_color = self.line_style.color.clone();
        }
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.line_style.width = width;
        self
    }

    pub fn linestyle(mut self, dash: DashPattern) -> Self {
        self.line_style.dash = dash;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker_style = Some(MarkerStyle::new(marker).color(self.line_style.color.clone()));
        self
    }

    pub fn markersize(mut self, size: f64) -> Self {
        if let Some(ref mut marker) = self.marker_style {
            marker.size = size;
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Apply a matplotlib-style format string such as `"r--"`, `"k:o"` or `"^"`.
    ///
    /// Order is color letter, then dash pattern, then marker character; each
    /// part is optional. A format with a marker but no dash pattern draws
    /// markers only.
    pub fn format(mut self, fmt: &str) -> Self {
        let mut rest = fmt;

        if let Some(color) = rest.chars().next().and_then(color_for_char) {
            self = self.color(color);
            rest = &rest[1..];
        }

        let mut has_dash = false;
        if let Some((dash, consumed)) = DashPattern::from_format_str(rest) {
            self.line_style.dash = dash;
            rest = &rest[consumed..];
            has_dash = true;
        }

        if let Some(marker) = rest.chars().find_map(Marker::from_format_char) {
            self = self.marker(marker);
            if !has_dash {
                self.line_style.opacity = 0.0;
            }
        }

        self
    }
}

fn color_for_char(c: char) -> Option<Color> {
    match c {
        'b' => Some(Color::BLUE),
        'g' => Some(Color::GREEN),
        'r' => Some(Color::RED),
        'c' => Some(Color::CYAN),
        'm' => Some(Color::MAGENTA),
        'y' => Some(Color::YELLOW),
        'k' => Some(Color::BLACK),
        'w' => Some(Color::WHITE),
        _ => None,
    }
}

impl Plot for LinePlot {
    fn bounds(&self) -> Option<Bounds> {
        finite_bounds(&self.x, &self.y)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn line_style(&self) -> Option<LineStyle> {
        if self.line_style.opacity > 0.0 {
            Some(self.line_style.clone())
        } else {
            None
        }
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        self.marker_style.clone()
    }

    fn draw(&self, canvas: &mut dyn Canvas, transform: &DataTransform) {
        // Non-finite values break the line into separate runs.
        let mut runs: Vec<Vec<(f64, f64)>> = vec![Vec::new()];
        for (&x, &y) in self.x.iter().zip(self.y.iter()) {
            if x.is_finite() && y.is_finite() {
                if let Some(run) = runs.last_mut() {
                    run.push(transform.apply(x, y));
                }
            } else if runs.last().map_or(false, |r| !r.is_empty()) {
                runs.push(Vec::new());
            }
        }

        for run in &runs {
            canvas.polyline(run, &self.line_style);
        }

        if let Some(ref marker) = self.marker_style {
            for (x, y) in runs.iter().flatten() {
                marker.draw_at(canvas, *x, *y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_color_dash_marker() {
        let plot = LinePlot::new(vec![0.0], vec![0.0]).format("r--o");
        assert_eq!(plot.line_style.color, Color::RED);
        assert_eq!(plot.line_style.dash, DashPattern::Dashed);
        let marker = plot.marker_style.unwrap();
        assert_eq!(marker.marker, Marker::Circle);
        assert_eq!(marker.fill, Color::RED);
    }

    #[test]
    fn test_format_marker_only_hides_line() {
        let plot = LinePlot::new(vec![0.0], vec![0.0]).format("s");
        assert_eq!(plot.line_style.opacity, 0.0);
        assert!(Plot::line_style(&plot).is_none());
        assert!(plot.marker_style.is_some());
    }

    #[test]
    fn test_bounds() {
        let plot = LinePlot::new(vec![1.0, 2.0, 3.0], vec![4.0, -1.0, 0.5]);
        assert_eq!(plot.bounds(), Some(Bounds::new(1.0, 3.0, -1.0, 4.0)));
    }
}
