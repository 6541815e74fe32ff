//! Legend configuration and rendering.

use crate::plotting::backend::Canvas;
use crate::plotting::element::{approx_text_width, Bounds};
use crate::plotting::style::{Color, FillStyle, LineStyle, MarkerStyle, TextStyle, VerticalAlign};

/// Corner of the axes the legend box is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A single entry in the legend.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub line_style: Option<LineStyle>,
    pub marker_style: Option<MarkerStyle>,
}

impl LegendEntry {
    /// Create an entry with a label and no swatch.
    pub fn new(label: impl Into<String>) -> Self {
        LegendEntry {
            label: label.into(),
            line_style: None,
            marker_style: None,
        }
    }

    /// Draw a line sample next to the label.
    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Draw a marker sample next to the label.
    pub fn marker_style(mut self, style: MarkerStyle) -> Self {
        self.marker_style = Some(style);
        self
    }
}

/// Legend configuration.
#[derive(Debug, Clone)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub position: LegendPosition,
    pub visible: bool,
    pub background: FillStyle,
    pub text_style: TextStyle,
    /// Padding inside the legend box
    pub padding: f64,
    /// Length of the line sample
    pub line_length: f64,
    /// Gap between sample and label
    pub label_gap: f64,
}

impl Legend {
    /// Create an empty, visible legend in the top-right corner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; entries are drawn in insertion order.
    pub fn add_entry(&mut self, entry: LegendEntry) {
        self.entries.push(entry);
    }

    /// Set the corner the legend box is attached to.
    pub fn position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    /// Set legend visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Draw the legend inside the given axes area.
    pub fn draw(&self, canvas: &mut dyn Canvas, area: &Bounds) {
        if !self.visible || self.entries.is_empty() {
            return;
        }

        let line_height = self.text_style.font_size * 1.4;
        let label_width = self
            .entries
            .iter()
            .map(|e| approx_text_width(&e.label, self.text_style.font_size))
            .fold(0.0, f64::max);
        let width = self.padding * 2.0 + self.line_length + self.label_gap + label_width;
        let height = self.padding * 2.0 + line_height * self.entries.len() as f64;
        let inset = 5.0;

        let x = match self.position {
            LegendPosition::TopLeft | LegendPosition::BottomLeft => area.x_min + inset,
            LegendPosition::TopRight | LegendPosition::BottomRight => area.x_max - inset - width,
        };
        let y = match self.position {
            LegendPosition::TopLeft | LegendPosition::TopRight => area.y_min + inset,
            LegendPosition::BottomLeft | LegendPosition::BottomRight => area.y_max - inset - height,
        };

        canvas.rect(x, y, width, height, &self.background);

        for (i, entry) in self.entries.iter().enumerate() {
            let ey = y + self.padding + (i as f64 + 0.5) * line_height;
            let x1 = x + self.padding;
            let x2 = x1 + self.line_length;

            if let Some(ref line) = entry.line_style {
                canvas.line((x1, ey), (x2, ey), line);
            }
            if let Some(ref marker) = entry.marker_style {
                marker.draw_at(canvas, (x1 + x2) / 2.0, ey);
            }

            let style = self.text_style.clone().align(VerticalAlign::Middle);
            canvas.text(x2 + self.label_gap, ey, &entry.label, &style);
        }
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            entries: Vec::new(),
            position: LegendPosition::TopRight,
            visible: true,
            background: FillStyle::new(Color::WHITE)
                .opacity(0.8)
                .stroke(Color::rgb(204, 204, 204))
                .stroke_width(0.8),
            text_style: TextStyle::new().font_size(10.0),
            padding: 5.0,
            line_length: 20.0,
            label_gap: 6.0,
        }
    }
}
