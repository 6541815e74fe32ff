//! Fill styling options for shapes.

use super::color::Color;

/// Style configuration for filled shapes.
#[derive(Debug, Clone)]
pub struct FillStyle {
    /// Fill color (None for an outline-only shape)
    pub color: Option<Color>,
    /// Fill opacity (0.0 - 1.0)
    pub opacity: f64,
    /// Stroke/border color (None for no stroke)
    pub stroke: Option<Color>,
    /// Stroke width
    pub stroke_width: f64,
}

impl FillStyle {
    /// Create a new fill style with the given color.
    pub fn new(color: impl Into<Color>) -> Self {
        FillStyle {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    /// An unfilled shape with a stroked outline.
    pub fn outline(color: impl Into<Color>, width: f64) -> Self {
        FillStyle {
            color: None,
            opacity: 1.0,
            stroke: Some(color.into()),
            stroke_width: width,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn stroke(mut self, color: impl Into<Color>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Opacity applied to the fill, combining color alpha and style opacity.
    pub fn fill_alpha(&self) -> f64 {
        self.color.as_ref().map_or(0.0, |c| c.alpha() * self.opacity)
    }

    /// Opacity applied to the stroke.
    pub fn stroke_alpha(&self) -> f64 {
        self.stroke.as_ref().map_or(0.0, |c| c.alpha() * self.opacity)
    }

    /// Whether anything would be painted at all.
    pub fn is_visible(&self) -> bool {
        self.fill_alpha() > 0.0 || (self.stroke_alpha() > 0.0 && self.stroke_width > 0.0)
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle {
            color: Some(Color::default()),
            opacity: 1.0,
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::new(color)
    }
}
