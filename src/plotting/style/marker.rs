//! Marker styles for scatter plots and line plot points.

use std::f64::consts::{FRAC_PI_2, PI};

use super::color::Color;
use super::fill_style::FillStyle;
use super::line_style::LineStyle;
use crate::plotting::backend::Canvas;

/// Marker shapes for data points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Marker {
    #[default]
    None,
    Circle,
    Square,
    /// Upward-pointing triangle
    Triangle,
    /// Downward-pointing triangle
    TriangleDown,
    Diamond,
    /// Plus sign drawn with two strokes
    Plus,
    /// X drawn with two strokes
    Cross,
}

impl Marker {
    /// Parse from format character.
    pub fn from_format_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(Marker::Circle),
            's' => Some(Marker::Square),
            '^' => Some(Marker::Triangle),
            'v' => Some(Marker::TriangleDown),
            'D' | 'd' => Some(Marker::Diamond),
            '+' => Some(Marker::Plus),
            'x' => Some(Marker::Cross),
            _ => None,
        }
    }

    /// Closed outline of a filled marker centered at the origin (y down).
    fn outline(&self, radius: f64) -> Option<Vec<(f64, f64)>> {
        let regular = |n: usize, r: f64, start: f64| -> Vec<(f64, f64)> {
            (0..n)
                .map(|i| {
                    let angle = start + 2.0 * PI * i as f64 / n as f64;
                    (r * angle.cos(), r * angle.sin())
                })
                .collect()
        };
        match self {
            Marker::Square => Some(vec![
                (-radius, -radius),
                (radius, -radius),
                (radius, radius),
                (-radius, radius),
            ]),
            Marker::Triangle => Some(regular(3, radius * 1.15, -FRAC_PI_2)),
            Marker::TriangleDown => Some(regular(3, radius * 1.15, FRAC_PI_2)),
            Marker::Diamond => Some(regular(4, radius * 1.2, -FRAC_PI_2)),
            _ => None,
        }
    }

    /// Stroke segments of an unfilled marker centered at the origin.
    fn strokes(&self, radius: f64) -> Option<[((f64, f64), (f64, f64)); 2]> {
        match self {
            Marker::Plus => Some([((-radius, 0.0), (radius, 0.0)), ((0.0, -radius), (0.0, radius))]),
            Marker::Cross => {
                let d = radius * std::f64::consts::FRAC_1_SQRT_2;
                Some([((-d, -d), (d, d)), ((-d, d), (d, -d))])
            }
            _ => None,
        }
    }
}

/// Style configuration for markers.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub marker: Marker,
    /// Marker size (diameter in points)
    pub size: f64,
    pub fill: Color,
    pub edge_color: Color,
    pub edge_width: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub fn new(marker: Marker) -> Self {
        MarkerStyle {
            marker,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        let c = color.into();
        self.fill = c.clone();
        self.edge_color = c;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    fn fill_style(&self) -> FillStyle {
        FillStyle::new(self.fill.clone())
            .opacity(self.fill_opacity)
            .stroke(self.edge_color.clone())
            .stroke_width(self.edge_width)
    }

    /// Draw the marker centered at a canvas position.
    pub fn draw_at(&self, canvas: &mut dyn Canvas, x: f64, y: f64) {
        let radius = self.size / 2.0;
        if self.marker == Marker::Circle {
            canvas.circle(x, y, radius, &self.fill_style());
        } else if let Some(outline) = self.marker.outline(radius) {
            let points: Vec<(f64, f64)> = outline.iter().map(|(dx, dy)| (x + dx, y + dy)).collect();
            canvas.polygon(&points, &self.fill_style());
        } else if let Some(strokes) = self.marker.strokes(radius) {
            let line = LineStyle::new()
                .color(self.edge_color.clone())
                .width(self.edge_width.max(1.0))
                .opacity(self.fill_opacity);
            for ((x1, y1), (x2, y2)) in strokes {
                canvas.line((x + x1, y + y1), (x + x2, y + y2), &line);
            }
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            marker: Marker::Circle,
            size: 6.0,
            fill: Color::default(),
            edge_color: Color::default(),
            edge_width: 1.0,
            fill_opacity: 1.0,
        }
    }
}
