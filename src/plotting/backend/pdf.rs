//! PDF rendering backend.
//!
//! Writes a single-page, uncompressed PDF 1.4 document using the standard
//! Type1 fonts, so no font data has to be embedded. Opacity goes through
//! `ExtGState` dictionaries.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::{circle_beziers, fmt_num, ps_literal, Canvas};
use crate::plotting::element::approx_text_width;
use crate::plotting::style::{Color, FillStyle, LineStyle, TextStyle};

/// PDF rendering backend.
#[derive(Debug)]
pub struct PdfCanvas {
    width: f64,
    height: f64,
    precision: usize,
    ops: String,
    /// Base font names in resource order, referenced as /F1, /F2, ...
    fonts: Vec<&'static str>,
    /// Fill and stroke alpha (in thousandths) to /GS index.
    alphas: BTreeMap<(u16, u16), usize>,
}

impl PdfCanvas {
    /// Create a canvas for a page of the given size in points.
    pub fn new(width: f64, height: f64) -> Self {
        PdfCanvas {
            width,
            height,
            precision: 2,
            ops: String::new(),
            fonts: Vec::new(),
            alphas: BTreeMap::new(),
        }
    }

    /// Set the number of decimals written for coordinates.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn n(&self, value: f64) -> String {
        fmt_num(value, self.precision)
    }

    /// Point in PDF user space.
    fn pt(&self, x: f64, y: f64) -> String {
        format!("{} {}", self.n(x), self.n(self.height - y))
    }

    /// Resource number of a base-14 font, registering it on first use.
    fn font_resource(&mut self, name: &'static str) -> usize {
        match self.fonts.iter().position(|f| *f == name) {
            Some(i) => i + 1,
            None => {
                self.fonts.push(name);
                self.fonts.len()
            }
        }
    }

    /// Emit a `gs` operator when either alpha is below one.
    fn set_alpha(&mut self, fill: f64, stroke: f64) {
        if fill >= 1.0 && stroke >= 1.0 {
            return;
        }
        let key = (
            (fill.clamp(0.0, 1.0) * 1000.0).round() as u16,
            (stroke.clamp(0.0, 1.0) * 1000.0).round() as u16,
        );
        let next = self.alphas.len() + 1;
        let index = *self.alphas.entry(key).or_insert(next);
        let _ = writeln!(self.ops, "/GS{} gs", index);
    }

    /// Stroke color and line width.
    fn set_stroke(&mut self, color: &Color, width: f64) {
        let (r, g, b) = color.to_unit_rgb();
        let width = self.n(width);
        let _ = writeln!(
            self.ops,
            "{} {} {} RG {} w",
            fmt_num(r, 3),
            fmt_num(g, 3),
            fmt_num(b, 3),
            width
        );
    }

    fn set_fill(&mut self, color: &Color) {
        let (r, g, b) = color.to_unit_rgb();
        let _ = writeln!(self.ops, "{} {} {} rg", fmt_num(r, 3), fmt_num(g, 3), fmt_num(b, 3));
    }

    /// Full stroke state: alpha, color, width, cap, join and dash.
    fn apply_line_style(&mut self, style: &LineStyle) {
        self.set_alpha(1.0, style.effective_alpha());
        self.set_stroke(&style.color, style.width);
        let dashes: Vec<String> = style.dash.lengths(style.width).iter().map(|d| self.n(*d)).collect();
        let _ = writeln!(
            self.ops,
            "{} J {} j [{}] 0 d",
            style.cap.code(),
            style.join.code(),
            dashes.join(" ")
        );
    }

    /// Set up fill/stroke state and return the painting operator.
    fn apply_fill_style(&mut self, style: &FillStyle) -> Option<&'static str> {
        let fill = style.color.as_ref().filter(|_| style.fill_alpha() > 0.0);
        let stroke = style
            .stroke
            .as_ref()
            .filter(|_| style.stroke_alpha() > 0.0 && style.stroke_width > 0.0);
        // Unpainted channels stay opaque.
        self.set_alpha(
            if fill.is_some() { style.fill_alpha() } else { 1.0 },
            if stroke.is_some() { style.stroke_alpha() } else { 1.0 },
        );
        if let Some(color) = fill {
            self.set_fill(color);
        }
        if let Some(color) = stroke {
            self.set_stroke(color, style.stroke_width);
        }
        match (fill.is_some(), stroke.is_some()) {
            (true, true) => Some("B"),
            (true, false) => Some("f"),
            (false, true) => Some("S"),
            (false, false) => None,
        }
    }

    /// Append an open path through `points`.
    fn path(&mut self, points: &[(f64, f64)]) {
        for (i, (x, y)) in points.iter().enumerate() {
            let op = if i == 0 { "m" } else { "l" };
            let p = self.pt(*x, *y);
            let _ = writeln!(self.ops, "{} {}", p, op);
        }
    }

    /// Render the final document bytes.
    pub fn finish(self) -> Vec<u8> {
        let mut objects: Vec<String> = Vec::new();
        let font_base = 5;
        let gs_base = font_base + self.fonts.len();

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        objects.push("<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string());

        let font_dict: String = (0..self.fonts.len())
            .map(|i| format!("/F{} {} 0 R", i + 1, font_base + i))
            .collect::<Vec<_>>()
            .join(" ");
        let mut gs_entries: Vec<(usize, (u16, u16))> =
            self.alphas.iter().map(|(key, index)| (*index, *key)).collect();
        gs_entries.sort();
        let gs_dict: String = gs_entries
            .iter()
            .enumerate()
            .map(|(i, (index, _))| format!("/GS{} {} 0 R", index, gs_base + i))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << {} >> /ExtGState << {} >> >> /Contents 4 0 R >>",
            fmt_num(self.width, 2),
            fmt_num(self.height, 2),
            font_dict,
            gs_dict
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            self.ops.len(),
            self.ops
        ));
        for font in &self.fonts {
            objects.push(format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font
            ));
        }
        for (_, (fill, stroke)) in &gs_entries {
            objects.push(format!(
                "<< /Type /ExtGState /ca {} /CA {} >>",
                fmt_num(*fill as f64 / 1000.0, 3),
                fmt_num(*stroke as f64 / 1000.0, 3)
            ));
        }

        let mut out: Vec<u8> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = writeln!(xref, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

impl Canvas for PdfCanvas {
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
        self.ops.push_str("q\n");
        self.apply_line_style(style);
        self.path(points);
        self.ops.push_str("S\nQ\n");
    }

    fn polygon(&mut self, points: &[(f64, f64)], style: &FillStyle) {
        if points.len() < 3 {
            return;
        }
        self.ops.push_str("q\n");
        if let Some(op) = self.apply_fill_style(style) {
            self.path(points);
            let _ = writeln!(self.ops, "h {}", op);
        }
        self.ops.push_str("Q\n");
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle) {
        self.ops.push_str("q\n");
        if let Some(op) = self.apply_fill_style(style) {
            let rect = format!("{} {} {}", self.pt(x, y + height), self.n(width), self.n(height));
            let _ = writeln!(self.ops, "{} re {}", rect, op);
        }
        self.ops.push_str("Q\n");
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &FillStyle) {
        self.ops.push_str("q\n");
        if let Some(op) = self.apply_fill_style(style) {
            let start = self.pt(cx + r, cy);
            let _ = writeln!(self.ops, "{} m", start);
            for arc in circle_beziers(cx, cy, r) {
                let [c1, c2, end] = arc;
                let line = format!(
                    "{} {} {} c",
                    self.pt(c1.0, c1.1),
                    self.pt(c2.0, c2.1),
                    self.pt(end.0, end.1)
                );
                self.ops.push_str(&line);
                self.ops.push('\n');
            }
            let _ = writeln!(self.ops, "h {}", op);
        }
        self.ops.push_str("Q\n");
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = self.font_resource(style.postscript_font());
        let size = style.font_size;
        let advance = approx_text_width(text, size);
        let theta = style.rotation.to_radians();
        let (sin, cos) = theta.sin_cos();

        // Shift along the baseline for the anchor, then down to the baseline.
        let along = -style.anchor.shift_fraction() * advance;
        let down = style.align.baseline_drop() * size;
        let ox = x + along * cos + down * sin;
        let oy = (self.height - y) + along * sin - down * cos;

        let origin = format!("{} {}", self.n(ox), self.n(oy));
        self.ops.push_str("q\n");
        self.set_alpha(style.color.alpha(), 1.0);
        self.set_fill(&style.color);
        let _ = writeln!(
            self.ops,
            "BT /F{} {} Tf {} {} {} {} {} Tm ({}) Tj ET",
            font,
            fmt_num(size, 2),
            fmt_num(cos, 4),
            fmt_num(sin, 4),
            fmt_num(-sin, 4),
            fmt_num(cos, 4),
            origin,
            ps_literal(text)
        );
        self.ops.push_str("Q\n");
    }

    fn begin_clip(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = format!("{} {} {}", self.pt(x, y + height), self.n(width), self.n(height));
        let _ = writeln!(self.ops, "q\n{} re W n", rect);
    }

    fn end_clip(&mut self) {
        self.ops.push_str("Q\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_document_structure() {
        let mut canvas = PdfCanvas::new(432.0, 360.0);
        canvas.text(10.0, 10.0, "Title", &TextStyle::new());
        let pdf = as_text(&canvas.finish());
        assert!(pdf.starts_with("%PDF-1.4"));
        assert!(pdf.contains("/MediaBox [0 0 432 360]"));
        assert!(pdf.contains("/BaseFont /Helvetica"));
        assert!(pdf.contains("(Title) Tj"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.rect(0.0, 0.0, 50.0, 50.0, &FillStyle::new(Color::RED));
        let bytes = canvas.finish();
        let xref_start = bytes.windows(5).position(|w| w == b"xref\n").unwrap();
        let tail = std::str::from_utf8(&bytes[xref_start..]).unwrap();
        let entries: Vec<usize> = tail
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 4);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_opaque_fill_without_stroke_needs_no_graphics_state() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.rect(0.0, 0.0, 50.0, 50.0, &FillStyle::new(Color::RED));
        canvas.circle(20.0, 20.0, 5.0, &FillStyle::new(Color::BLUE));
        let pdf = as_text(&canvas.finish());
        assert!(!pdf.contains(" gs"));
        assert!(!pdf.contains("/Type /ExtGState"));
    }

    #[test]
    fn test_translucent_fill_keeps_stroke_opaque() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.rect(0.0, 0.0, 50.0, 50.0, &FillStyle::new(Color::rgba(255, 0, 0, 0.5)));
        let pdf = as_text(&canvas.finish());
        assert!(pdf.contains("/ca 0.5 /CA 1"));
    }

    #[test]
    fn test_y_axis_flipped() {
        let mut canvas = PdfCanvas::new(100.0, 200.0);
        canvas.line((0.0, 0.0), (10.0, 50.0), &LineStyle::new());
        let pdf = as_text(&canvas.finish());
        assert!(pdf.contains("0 200 m"));
        assert!(pdf.contains("10 150 l"));
    }

    #[test]
    fn test_alpha_uses_ext_gstate() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.rect(0.0, 0.0, 10.0, 10.0, &FillStyle::new(Color::BLUE).opacity(0.5));
        canvas.rect(20.0, 0.0, 10.0, 10.0, &FillStyle::new(Color::RED).opacity(0.5));
        let pdf = as_text(&canvas.finish());
        assert!(pdf.contains("/GS1 gs"));
        assert!(pdf.contains("/ca 0.5 /CA 1"));
        assert_eq!(pdf.matches("/Type /ExtGState").count(), 1);
    }

    #[test]
    fn test_clip_balanced() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.begin_clip(10.0, 10.0, 20.0, 20.0);
        canvas.circle(15.0, 15.0, 3.0, &FillStyle::default());
        canvas.end_clip();
        let pdf = as_text(&canvas.finish());
        assert!(pdf.contains("10 70 20 20 re W n"));
        let saves = pdf.lines().filter(|l| *l == "q").count();
        let restores = pdf.lines().filter(|l| *l == "Q").count();
        assert_eq!(saves, restores);
    }
}
