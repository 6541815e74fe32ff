//! Text styling options.

use super::color::Color;

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Horizontal anchor of a text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }

    /// Fraction of the text advance to shift left before drawing.
    pub fn shift_fraction(&self) -> f64 {
        match self {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => 0.5,
            TextAnchor::End => 1.0,
        }
    }
}

/// Vertical alignment of a text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    /// Position is the baseline
    #[default]
    Baseline,
    /// Position is the vertical center
    Middle,
    /// Position is the top of the glyphs
    Top,
}

impl VerticalAlign {
    pub fn to_svg_string(&self) -> &'static str {
        match self {
            VerticalAlign::Baseline => "auto",
            VerticalAlign::Middle => "central",
            VerticalAlign::Top => "hanging",
        }
    }

    /// Distance from the anchor point down to the baseline, in em units.
    pub fn baseline_drop(&self) -> f64 {
        match self {
            VerticalAlign::Baseline => 0.0,
            VerticalAlign::Middle => 0.35,
            VerticalAlign::Top => 0.75,
        }
    }
}

/// Style configuration for text elements.
#[derive(Debug, Clone)]
pub struct TextStyle {
    /// Font family ("sans-serif", "serif", "monospace" or a concrete name)
    pub font_family: String,
    /// Font size in points
    pub font_size: f64,
    pub weight: FontWeight,
    pub color: Color,
    pub anchor: TextAnchor,
    pub align: VerticalAlign,
    /// Rotation angle in degrees, counter-clockwise
    pub rotation: f64,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn align(mut self, align: VerticalAlign) -> Self {
        self.align = align;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Name of the standard PostScript font used for this style in PDF and EPS.
    pub fn postscript_font(&self) -> &'static str {
        let family = self.font_family.to_lowercase();
        let bold = self.weight == FontWeight::Bold;
        if family.contains("mono") || family.contains("courier") {
            if bold { "Courier-Bold" } else { "Courier" }
        } else if family == "serif" || family.contains("times") {
            if bold { "Times-Bold" } else { "Times-Roman" }
        } else if bold {
            "Helvetica-Bold"
        } else {
            "Helvetica"
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            weight: FontWeight::Normal,
            color: Color::BLACK,
            anchor: TextAnchor::Start,
            align: VerticalAlign::Baseline,
            rotation: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postscript_font_mapping() {
        assert_eq!(TextStyle::new().postscript_font(), "Helvetica");
        assert_eq!(TextStyle::new().bold().postscript_font(), "Helvetica-Bold");
        assert_eq!(TextStyle::new().font_family("serif").postscript_font(), "Times-Roman");
        assert_eq!(TextStyle::new().font_family("DejaVu Sans Mono").postscript_font(), "Courier");
    }
}
