//! Encapsulated PostScript rendering backend.
//!
//! PostScript has no transparency; translucent colors are composited over a
//! white page before they are written. Fonts are re-encoded to
//! ISOLatin1Encoding so that Latin-1 text matches the PDF output.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use super::{fmt_num, ps_literal, Canvas};
use crate::plotting::style::{Color, FillStyle, LineStyle, TextStyle};

/// EPS rendering backend.
#[derive(Debug)]
pub struct EpsCanvas {
    width: f64,
    height: f64,
    precision: usize,
    body: String,
    /// Base fonts referenced by text, re-encoded in the prolog
    fonts: BTreeSet<&'static str>,
}

/// Suffix of the re-encoded font names defined in the prolog.
const LATIN1_SUFFIX: &str = "-Latin1";

/// `/NewName /BaseFont ReEncode` defines a copy of the base font using
/// ISOLatin1Encoding.
const REENCODE_PROC: &str = "/ReEncode {
  findfont dup length dict begin
    { 1 index /FID ne { def } { pop pop } ifelse } forall
    /Encoding ISOLatin1Encoding def
  currentdict end definefont pop
} bind def
";

impl EpsCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        EpsCanvas {
            width,
            height,
            precision: 2,
            body: String::new(),
            fonts: BTreeSet::new(),
        }
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn n(&self, value: f64) -> String {
        fmt_num(value, self.precision)
    }

    fn pt(&self, x: f64, y: f64) -> String {
        format!("{} {}", self.n(x), self.n(self.height - y))
    }

    fn rgb(color: &Color, opacity: f64) -> String {
        let (r, g, b) = color.over_white(opacity);
        format!("{} {} {} setrgbcolor", fmt_num(r, 3), fmt_num(g, 3), fmt_num(b, 3))
    }

    fn path(&self, points: &[(f64, f64)]) -> String {
        let mut out = String::from("newpath");
        for (i, (x, y)) in points.iter().enumerate() {
            let op = if i == 0 { "moveto" } else { "lineto" };
            let _ = write!(out, " {} {}", self.pt(*x, *y), op);
        }
        out
    }

    /// Fill and/or stroke the current path held in `path`.
    fn paint(&mut self, path: &str, style: &FillStyle) {
        let fill = style.color.as_ref().filter(|_| style.fill_alpha() > 0.0);
        let stroke = style
            .stroke
            .as_ref()
            .filter(|_| style.stroke_alpha() > 0.0 && style.stroke_width > 0.0);
        if fill.is_none() && stroke.is_none() {
            return;
        }
        let mut ops = String::from("gsave ");
        ops.push_str(path);
        if let Some(color) = fill {
            let paint = if stroke.is_some() { "gsave fill grestore" } else { "fill" };
            let _ = write!(ops, " {} {}", Self::rgb(color, style.opacity), paint);
        }
        if let Some(color) = stroke {
            let _ = write!(
                ops,
                " {} {} setlinewidth stroke",
                Self::rgb(color, style.opacity),
                self.n(style.stroke_width)
            );
        }
        ops.push_str(" grestore\n");
        self.body.push_str(&ops);
    }

    /// Render the final document bytes.
    pub fn finish(self) -> Vec<u8> {
        let mut out = String::new();
        out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
        let _ = writeln!(
            out,
            "%%BoundingBox: 0 0 {} {}",
            self.width.ceil() as i64,
            self.height.ceil() as i64
        );
        let _ = writeln!(
            out,
            "%%HiResBoundingBox: 0 0 {} {}",
            fmt_num(self.width, 3),
            fmt_num(self.height, 3)
        );
        out.push_str("%%Creator: wackyplot\n%%LanguageLevel: 2\n%%Pages: 1\n%%EndComments\n");
        if !self.fonts.is_empty() {
            out.push_str("%%BeginProlog\n");
            out.push_str(REENCODE_PROC);
            for font in &self.fonts {
                let _ = writeln!(out, "/{}{} /{} ReEncode", font, LATIN1_SUFFIX, font);
            }
            out.push_str("%%EndProlog\n");
        }
        out.push_str("%%Page: 1 1\n");
        out.push_str(&self.body);
        out.push_str("showpage\n%%Trailer\n%%EOF\n");
        out.into_bytes()
    }
}

impl Canvas for EpsCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), style: &LineStyle) {
        self.polyline(&[from, to], style);
    }

    fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if points.len() < 2 || style.effective_alpha() <= 0.0 {
            return;
        }
        let dashes: Vec<String> = style.dash.lengths(style.width).iter().map(|d| self.n(*d)).collect();
        let ops = format!(
            "gsave {} {} setlinewidth {} setlinecap {} setlinejoin [{}] 0 setdash {} stroke grestore\n",
            Self::rgb(&style.color, style.opacity),
            self.n(style.width),
            style.cap.code(),
            style.join.code(),
            dashes.join(" "),
            self.path(points)
        );
        self.body.push_str(&ops);
    }

    fn polygon(&mut self, points: &[(f64, f64)], style: &FillStyle) {
        if points.len() < 3 {
            return;
        }
        let path = format!("{} closepath", self.path(points));
        self.paint(&path, style);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle) {
        let path = self.path(&[(x, y), (x + width, y), (x + width, y + height), (x, y + height)]);
        self.paint(&format!("{} closepath", path), style);
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &FillStyle) {
        let path = format!("newpath {} {} 0 360 arc closepath", self.pt(cx, cy), self.n(r));
        self.paint(&path, style);
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = style.postscript_font();
        self.fonts.insert(font);
        // Anchor offsets are resolved by the interpreter with stringwidth.
        let ops = format!(
            "gsave {} /{}{} findfont {} scalefont setfont {} translate {} rotate ({}) dup stringwidth pop {} mul neg {} moveto show grestore\n",
            Self::rgb(&style.color, 1.0),
            font,
            LATIN1_SUFFIX,
            fmt_num(style.font_size, 2),
            self.pt(x, y),
            fmt_num(style.rotation, 3),
            ps_literal(text),
            fmt_num(style.anchor.shift_fraction(), 2),
            fmt_num(-style.align.baseline_drop() * style.font_size, 3)
        );
        self.body.push_str(&ops);
    }

    fn begin_clip(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let path = self.path(&[(x, y), (x + width, y), (x + width, y + height), (x, y + height)]);
        let ops = format!("gsave {} closepath clip newpath\n", path);
        self.body.push_str(&ops);
    }

    fn end_clip(&mut self) {
        self.body.push_str("grestore\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(canvas: EpsCanvas) -> String {
        String::from_utf8(canvas.finish()).unwrap()
    }

    #[test]
    fn test_header_and_bounding_box() {
        let eps = render(EpsCanvas::new(432.0, 360.5));
        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(eps.contains("%%BoundingBox: 0 0 432 361"));
        assert!(eps.contains("%%HiResBoundingBox: 0 0 432 360.5"));
        assert!(eps.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_translucent_fill_composited_over_white() {
        let mut canvas = EpsCanvas::new(100.0, 100.0);
        canvas.rect(0.0, 0.0, 10.0, 10.0, &FillStyle::new(Color::BLACK).opacity(0.5));
        let eps = render(canvas);
        assert!(eps.contains("0.5 0.5 0.5 setrgbcolor fill"));
    }

    #[test]
    fn test_rotated_text() {
        let mut canvas = EpsCanvas::new(100.0, 100.0);
        let style = TextStyle::new().rotation(90.0);
        canvas.text(20.0, 30.0, "y (m)", &style);
        let eps = render(canvas);
        assert!(eps.contains("20 70 translate 90 rotate (y \\(m\\))"));
        assert!(eps.contains("/Helvetica-Latin1 findfont"));
    }

    #[test]
    fn test_latin1_text_uses_reencoded_font() {
        let mut canvas = EpsCanvas::new(100.0, 100.0);
        canvas.text(10.0, 10.0, "T (\u{b0}C)", &TextStyle::new());
        canvas.text(10.0, 30.0, "caf\u{e9}", &TextStyle::new().bold());
        let eps = render(canvas);
        assert!(eps.contains("/Encoding ISOLatin1Encoding def"));
        assert!(eps.contains("/Helvetica-Latin1 /Helvetica ReEncode"));
        assert!(eps.contains("/Helvetica-Bold-Latin1 /Helvetica-Bold ReEncode"));
        assert!(eps.contains("/Helvetica-Latin1 findfont 10 scalefont setfont"));
        assert!(eps.contains("(T \\(\\260C\\))"));
        assert!(!eps.contains("/Helvetica findfont"));
        // The prolog comes before any drawing.
        let prolog = eps.find("%%EndProlog").unwrap();
        assert!(prolog < eps.find("%%Page: 1 1").unwrap());
    }

    #[test]
    fn test_no_prolog_without_text() {
        let eps = render(EpsCanvas::new(10.0, 10.0));
        assert!(!eps.contains("ReEncode"));
    }

    #[test]
    fn test_clip_balanced() {
        let mut canvas = EpsCanvas::new(100.0, 100.0);
        canvas.begin_clip(0.0, 0.0, 50.0, 50.0);
        canvas.line((0.0, 0.0), (60.0, 60.0), &LineStyle::new());
        canvas.end_clip();
        let eps = render(canvas);
        assert_eq!(eps.matches("gsave").count(), eps.matches("grestore").count());
        assert!(eps.contains("clip newpath"));
    }
}
