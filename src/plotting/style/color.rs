//! Color definitions and utilities.

use std::fmt;

/// Represents a color for plotting elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// RGBA color with alpha 0.0-1.0
    Rgba(u8, u8, u8, f64),
    /// Named color (e.g., "red", "C0", "k")
    Named(String),
}

impl Color {
    /// Create a new RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Create a new RGBA color.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba(r, g, b, a.clamp(0.0, 1.0))
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::Rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Convert the color to an SVG-compatible string.
    pub fn to_svg_string(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("rgb({},{},{})", r, g, b)
    }

    /// Get the alpha value (opacity) of the color.
    pub fn alpha(&self) -> f64 {
        match self {
            Color::Rgba(_, _, _, a) => *a,
            Color::Rgb(..) | Color::Named(_) => 1.0,
        }
    }

    /// Convert to RGB tuple, resolving named colors.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) | Color::Rgba(r, g, b, _) => (*r, *g, *b),
            Color::Named(name) => resolve_named_color(name)
                .and_then(Color::from_hex)
                .or_else(|| Color::from_hex(name))
                .map(|c| c.to_rgb())
                .unwrap_or((0, 0, 0)),
        }
    }

    /// RGB channels scaled to 0.0-1.0, as used by PDF and PostScript operators.
    pub fn to_unit_rgb(&self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_rgb();
        (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Composite this color with the given extra opacity over a white page.
    pub fn over_white(&self, opacity: f64) -> (f64, f64, f64) {
        let a = (self.alpha() * opacity).clamp(0.0, 1.0);
        let (r, g, b) = self.to_unit_rgb();
        (r * a + (1.0 - a), g * a + (1.0 - a), b * a + (1.0 - a))
    }

    // Predefined colors
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 128, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const CYAN: Color = Color::Rgb(0, 191, 191);
    pub const MAGENTA: Color = Color::Rgb(191, 0, 191);
    pub const YELLOW: Color = Color::Rgb(191, 191, 0);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::Rgb(211, 211, 211);
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Color::Rgb(0x1f, 0x77, 0xb4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_string())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            Color::from_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
        } else {
            Color::Named(s.to_string())
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, f64)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Color::rgba(r, g, b, a)
    }
}

/// Resolve a named color to its hex value.
fn resolve_named_color(name: &str) -> Option<&'static str> {
    let hex = match name.to_lowercase().as_str() {
        "black" | "k" => "#000000",
        "white" | "w" => "#FFFFFF",
        "red" | "r" => "#FF0000",
        "green" | "g" => "#008000",
        "blue" | "b" => "#0000FF",
        "cyan" | "c" => "#00BFBF",
        "magenta" | "m" => "#BF00BF",
        "yellow" | "y" => "#BFBF00",
        "orange" => "#FFA500",
        "purple" => "#800080",
        "gray" | "grey" => "#808080",
        "lightgray" | "lightgrey" => "#D3D3D3",

        // Default property cycle
        "c0" => "#1f77b4",
        "c1" => "#ff7f0e",
        "c2" => "#2ca02c",
        "c3" => "#d62728",
        "c4" => "#9467bd",
        "c5" => "#8c564b",
        "c6" => "#e377c2",
        "c7" => "#7f7f7f",
        "c8" => "#bcbd22",
        "c9" => "#17becf",
        _ => return None,
    };
    Some(hex)
}

const DEFAULT_CYCLE: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

/// Get a color from the default color cycle by index.
pub fn cycle_color(index: usize) -> Color {
    let (r, g, b) = DEFAULT_CYCLE[index % DEFAULT_CYCLE.len()];
    Color::Rgb(r, g, b)
}

/// The default color cycle as a list.
pub fn default_color_cycle() -> Vec<Color> {
    (0..DEFAULT_CYCLE.len()).map(cycle_color).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_hex() {
        assert_eq!(Color::from("C1").to_rgb(), (0xff, 0x7f, 0x0e));
        assert_eq!(Color::from("#00ff00").to_rgb(), (0, 255, 0));
        assert_eq!(Color::from("nonsense").to_rgb(), (0, 0, 0));
        assert_eq!(Color::from_hex("#11223380").map(|c| c.to_rgb()), Some((0x11, 0x22, 0x33)));
    }

    #[test]
    fn test_over_white() {
        let (r, g, b) = Color::BLACK.over_white(0.5);
        assert!((r - 0.5).abs() < 1e-9 && (g - 0.5).abs() < 1e-9 && (b - 0.5).abs() < 1e-9);
        assert_eq!(Color::rgba(255, 0, 0, 1.0).over_white(1.0), (1.0, 0.0, 0.0));
    }
}
