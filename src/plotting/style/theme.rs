//! Predefined themes for figures.

use super::color::{default_color_cycle, Color};
use crate::plotting::element::TickDirection;

/// Predefined plot themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Plain white figure with outward ticks
    #[default]
    Default,
    /// Journal style: thin lines, inward ticks on all sides, minor ticks
    Science,
}

impl Theme {
    /// Theme selected by the helper's science flag.
    pub fn from_science_flag(use_science: bool) -> Self {
        if use_science {
            Theme::Science
        } else {
            Theme::Default
        }
    }

    /// Get the configuration for this theme.
    pub fn config(&self) -> ThemeConfig {
        match self {
            Theme::Default => ThemeConfig::default_theme(),
            Theme::Science => ThemeConfig::science_theme(),
        }
    }
}

/// Theme configuration containing all style settings.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Background color for the figure
    pub background: Color,
    /// Background color for the plot area
    pub plot_background: Color,
    pub axis_color: Color,
    pub axis_width: f64,
    pub show_grid: bool,
    pub grid_color: Color,
    pub font_family: String,
    pub text_color: Color,
    /// Default tick label size before any explicit sizing
    pub tick_label_size: f64,
    pub tick_direction: TickDirection,
    /// Draw ticks on the top and right spines too
    pub mirror_ticks: bool,
    pub minor_ticks: bool,
    /// Color cycle for plot series
    pub color_cycle: Vec<Color>,
    pub line_width: f64,
    pub marker_size: f64,
}

impl ThemeConfig {
    fn default_theme() -> Self {
        ThemeConfig {
            background: Color::WHITE,
            plot_background: Color::WHITE,
            axis_color: Color::BLACK,
            axis_width: 0.8,
            show_grid: false,
            grid_color: Color::rgb(176, 176, 176),
            font_family: "sans-serif".to_string(),
            text_color: Color::BLACK,
            tick_label_size: 10.0,
            tick_direction: TickDirection::Out,
            mirror_ticks: false,
            minor_ticks: false,
            color_cycle: default_color_cycle(),
            line_width: 1.5,
            marker_size: 6.0,
        }
    }

    fn science_theme() -> Self {
        ThemeConfig {
            background: Color::WHITE,
            plot_background: Color::WHITE,
            axis_color: Color::BLACK,
            axis_width: 0.5,
            show_grid: false,
            grid_color: Color::LIGHT_GRAY,
            font_family: "sans-serif".to_string(),
            text_color: Color::BLACK,
            tick_label_size: 7.0,
            tick_direction: TickDirection::In,
            mirror_ticks: true,
            minor_ticks: true,
            color_cycle: science_color_cycle(),
            line_width: 1.0,
            marker_size: 3.0,
        }
    }

    /// Color at a position of this theme's cycle.
    pub fn cycle_color(&self, index: usize) -> Color {
        if self.color_cycle.is_empty() {
            return super::color::cycle_color(index);
        }
        self.color_cycle[index % self.color_cycle.len()].clone()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::default_theme()
    }
}

fn science_color_cycle() -> Vec<Color> {
    vec![
        Color::rgb(0x0C, 0x5D, 0xA5),
        Color::rgb(0x00, 0xB9, 0x45),
        Color::rgb(0xFF, 0x95, 0x00),
        Color::rgb(0xFF, 0x2C, 0x00),
        Color::rgb(0x84, 0x5B, 0x97),
        Color::rgb(0x47, 0x47, 0x47),
        Color::rgb(0x9E, 0x9E, 0x9E),
    ]
}
