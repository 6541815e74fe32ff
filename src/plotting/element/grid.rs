//! Grid line configuration.

use crate::plotting::style::{Color, DashPattern, LineStyle};

/// Configuration for grid lines drawn at major tick positions.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub visible: bool,
    pub style: LineStyle,
    /// Whether to show X grid lines
    pub show_x: bool,
    /// Whether to show Y grid lines
    pub show_y: bool,
}

impl GridConfig {
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.style.color = color.into();
        self
    }

    /// Set which axes to show grid for.
    pub fn axes(mut self, show_x: bool, show_y: bool) -> Self {
        self.show_x = show_x;
        self.show_y = show_y;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            visible: false,
            style: LineStyle::new()
                .color(Color::rgb(176, 176, 176))
                .width(0.8)
                .dash(DashPattern::Solid)
                .opacity(0.8),
            show_x: true,
            show_y: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_by_default() {
        let grid = GridConfig::default();
        assert!(!grid.visible);
        assert!(grid.show_x && grid.show_y);
    }

    #[test]
    fn test_builders() {
        let grid = GridConfig::default().visible(true).color("#ff0000").axes(false, true);
        assert!(grid.visible);
        assert_eq!(grid.style.color, Color::rgb(255, 0, 0));
        assert!(!grid.show_x);
        assert!(grid.show_y);
    }
}
