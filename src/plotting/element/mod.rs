//! Visual elements for plots.

mod axis;
mod grid;
mod legend;
pub mod text;

pub use axis::{AxisConfig, AxisSelect, TickConfig, TickDirection, TickParams, TickWhich};
pub use grid::GridConfig;
pub use legend::{Legend, LegendEntry, LegendPosition};
pub use text::{approx_text_width, escape_xml, Text};

/// Bounding box for elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds from a `[left, bottom, width, height]` rectangle.
    pub fn from_rect([left, bottom, width, height]: [f64; 4]) -> Self {
        Bounds::new(left, left + width, bottom, bottom + height)
    }

    /// Bounds that contain nothing yet; grow them with `include_point`.
    pub fn empty() -> Self {
        Bounds::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        )
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite() && self.x_max.is_finite() && self.y_min.is_finite() && self.y_max.is_finite()
    }

    /// Expand bounds to include a point.
    pub fn include_point(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Expand bounds to include another bounds.
    pub fn include_bounds(&mut self, other: &Bounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Add padding as a fraction of the range.
    pub fn pad(&self, fraction: f64) -> Bounds {
        let x_pad = self.width() * fraction;
        let y_pad = self.height() * fraction;
        Bounds {
            x_min: self.x_min - x_pad,
            x_max: self.x_max + x_pad,
            y_min: self.y_min - y_pad,
            y_max: self.y_max + y_pad,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }
}

/// Maps data coordinates onto a canvas region.
#[derive(Debug, Clone, Copy)]
pub struct DataTransform {
    /// The data range shown.
    pub data: Bounds,
    /// The canvas region in points, y growing downward.
    pub area: Bounds,
}

impl DataTransform {
    pub fn new(data: Bounds, area: Bounds) -> Self {
        DataTransform { data, area }
    }

    /// Transform a data point to canvas coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let x_norm = (x - self.data.x_min) / self.data.width();
        let y_norm = (y - self.data.y_min) / self.data.height();
        (
            self.area.x_min + x_norm * self.area.width(),
            self.area.y_max - y_norm * self.area.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rect() {
        let b = Bounds::from_rect([0.6, 0.3, 0.3, 0.3]);
        assert!((b.x_max - 0.9).abs() < 1e-12);
        assert!((b.y_max - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_transform_flips_y() {
        let t = DataTransform::new(Bounds::new(0.0, 10.0, 0.0, 10.0), Bounds::new(100.0, 200.0, 50.0, 150.0));
        assert_eq!(t.apply(0.0, 0.0), (100.0, 150.0));
        assert_eq!(t.apply(10.0, 10.0), (200.0, 50.0));
    }
}
