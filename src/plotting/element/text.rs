//! Text element for titles and labels.

use crate::plotting::backend::Canvas;
use crate::plotting::style::TextStyle;

/// A text with its style. Position is decided by whoever lays it out.
#[derive(Debug, Clone)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Text {
            content: content.into(),
            style,
        }
    }

    pub fn font_size(&self) -> f64 {
        self.style.font_size
    }

    /// Approximate advance width in points.
    pub fn width(&self) -> f64 {
        approx_text_width(&self.content, self.style.font_size)
    }

    /// Draw the text at a canvas position.
    pub fn draw_at(&self, canvas: &mut dyn Canvas, x: f64, y: f64) {
        if !self.content.is_empty() {
            canvas.text(x, y, &self.content, &self.style);
        }
    }
}

/// Estimate the advance width of a string set in a Helvetica-like face.
///
/// Used for layout and for anchoring text in backends that cannot measure
/// glyphs themselves.
pub fn approx_text_width(text: &str, font_size: f64) -> f64 {
    let em: f64 = text
        .chars()
        .map(|c| match c {
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.25,
            ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.32,
            '0'..='9' | '$' | '+' | '=' | '<' | '>' => 0.556,
            'm' | 'w' | 'M' | 'W' => 0.86,
            'A'..='Z' => 0.68,
            _ => 0.53,
        })
        .sum();
    em * font_size
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_size() {
        let small = approx_text_width("Time (s)", 10.0);
        let large = approx_text_width("Time (s)", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
        assert_eq!(approx_text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
