//! Output backends.
//!
//! Every backend draws in points with the origin at the top-left corner of
//! the page and y growing downwards. Backends whose native space is flipped
//! (PDF, PostScript) convert on output.

mod eps;
mod pdf;
mod svg;

pub use eps::EpsCanvas;
pub use pdf::PdfCanvas;
pub use svg::SvgCanvas;

use crate::plotting::style::{FillStyle, LineStyle, TextStyle};

/// Drawing surface shared by the vector backends.
pub trait Canvas {
    /// Page size in points.
    fn size(&self) -> (f64, f64);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), style: &LineStyle);

    fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle);

    /// Closed, filled shape.
    fn polygon(&mut self, points: &[(f64, f64)], style: &FillStyle);

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle);

    fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &FillStyle);

    /// Draw text anchored at (x, y) per the style's anchor and alignment.
    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);

    /// Restrict drawing to a rectangle until the matching `end_clip`.
    fn begin_clip(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn end_clip(&mut self);
}

/// Number of decimals needed to resolve one device pixel at `dpi`.
///
/// One pixel is 72/dpi points; one extra digit keeps rounding from
/// landing on a neighbouring pixel.
pub fn coord_precision(dpi: u32) -> usize {
    let dpi = dpi.max(1) as f64;
    let digits = (dpi / 72.0).log10().ceil().max(0.0) as usize;
    digits + 1
}

/// Format a coordinate with the given precision, trimming trailing zeros.
pub(crate) fn fmt_num(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Encode text as a PDF/PostScript literal string body.
///
/// Parentheses and backslashes are escaped, Latin-1 characters above ASCII
/// are written as octal escapes and anything else becomes `?`.
pub(crate) fn ps_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\u{2212}' => out.push('-'),
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Control points of four cubic Bezier arcs approximating a circle,
/// starting at the rightmost point and running counter-clockwise on screen.
pub(crate) fn circle_beziers(cx: f64, cy: f64, r: f64) -> [[(f64, f64); 3]; 4] {
    let k = 0.552_284_749_8 * r;
    [
        [(cx + r, cy - k), (cx + k, cy - r), (cx, cy - r)],
        [(cx - k, cy - r), (cx - r, cy - k), (cx - r, cy)],
        [(cx - r, cy + k), (cx - k, cy + r), (cx, cy + r)],
        [(cx + k, cy + r), (cx + r, cy + k), (cx + r, cy)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_precision() {
        assert_eq!(coord_precision(72), 1);
        assert_eq!(coord_precision(300), 2);
        assert_eq!(coord_precision(600), 2);
        assert_eq!(coord_precision(1200), 3);
        assert_eq!(coord_precision(0), 1);
    }

    #[test]
    fn test_fmt_num_trims() {
        assert_eq!(fmt_num(1.50, 2), "1.5");
        assert_eq!(fmt_num(2.0, 2), "2");
        assert_eq!(fmt_num(-0.001, 2), "0");
        assert_eq!(fmt_num(12.346, 2), "12.35");
    }

    #[test]
    fn test_ps_literal_escapes() {
        assert_eq!(ps_literal("f(x) \\ y"), "f\\(x\\) \\\\ y");
        assert_eq!(ps_literal("\u{2212}1"), "-1");
        assert_eq!(ps_literal("\u{e9}"), "\\351");
        assert_eq!(ps_literal("\u{3b1}"), "?");
    }
}
