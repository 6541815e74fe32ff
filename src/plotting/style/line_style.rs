//! Line styling options.

use super::color::Color;

/// Dash pattern for lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashPattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dash-dot pattern
    DashDot,
    /// Custom dash array in points [dash_length, gap_length, ...]
    Custom(Vec<f64>),
}

impl DashPattern {
    /// Dash array in points, empty for solid lines.
    pub fn lengths(&self, width: f64) -> Vec<f64> {
        // Scaled with the line width so thick dashed lines keep their rhythm.
        let w = width.max(1.0);
        match self {
            DashPattern::Solid => Vec::new(),
            DashPattern::Dashed => vec![3.7 * w, 1.6 * w],
            DashPattern::Dotted => vec![w, 1.65 * w],
            DashPattern::DashDot => vec![6.4 * w, 1.6 * w, w, 1.6 * w],
            DashPattern::Custom(arr) => arr.clone(),
        }
    }

    /// Parse from format string prefix ("-", "--", "-.", ":").
    pub fn from_format_str(s: &str) -> Option<(Self, usize)> {
        if s.starts_with("--") {
            Some((DashPattern::Dashed, 2))
        } else if s.starts_with("-.") {
            Some((DashPattern::DashDot, 2))
        } else if s.starts_with(':') {
            Some((DashPattern::Dotted, 1))
        } else if s.starts_with('-') {
            Some((DashPattern::Solid, 1))
        } else {
            None
        }
    }
}

/// Line cap styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    /// Numeric cap code shared by PDF (`J`) and PostScript (`setlinecap`).
    pub fn code(&self) -> u8 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

/// Line join styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl LineJoin {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }

    /// Numeric join code shared by PDF (`j`) and PostScript (`setlinejoin`).
    pub fn code(&self) -> u8 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }
}

/// Style configuration for lines.
#[derive(Debug, Clone)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in points
    pub width: f64,
    /// Dash pattern
    pub dash: DashPattern,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Combined opacity of the color alpha and the style opacity.
    pub fn effective_alpha(&self) -> f64 {
        self.color.alpha() * self.opacity
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::default(),
            width: 1.5,
            dash: DashPattern::Solid,
            cap: LineCap::Round,
            join: LineJoin::Round,
            opacity: 1.0,
        }
    }
}
