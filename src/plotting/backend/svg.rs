//! SVG rendering backend.

use super::{fmt_num, Canvas};
use crate::plotting::element::text::escape_xml;
use crate::plotting::style::{FillStyle, LineStyle, TextStyle};

/// SVG rendering backend.
#[derive(Debug)]
pub struct SvgCanvas {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    precision: usize,
    /// SVG content accumulated during rendering
    content: Vec<String>,
    /// SVG defs section (clip paths)
    defs: Vec<String>,
    clip_count: usize,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        SvgCanvas {
            width,
            height,
            precision: 2,
            content: Vec::new(),
            defs: Vec::new(),
            clip_count: 0,
        }
    }

    /// Number of decimals written for coordinates.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn n(&self, value: f64) -> String {
        fmt_num(value, self.precision)
    }

    fn stroke_attrs(&self, style: &LineStyle) -> String {
        let mut attrs = format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-linejoin=\"{}\"",
            style.color.to_svg_string(),
            self.n(style.width),
            style.cap.to_svg_string(),
            style.join.to_svg_string()
        );
        let dashes = style.dash.lengths(style.width);
        if !dashes.is_empty() {
            let dash_str: Vec<String> = dashes.iter().map(|d| self.n(*d)).collect();
            attrs.push_str(&format!(" stroke-dasharray=\"{}\"", dash_str.join(",")));
        }
        let alpha = style.effective_alpha();
        if alpha < 1.0 {
            attrs.push_str(&format!(" stroke-opacity=\"{}\"", fmt_num(alpha, 3)));
        }
        attrs
    }

    fn fill_attrs(&self, style: &FillStyle) -> String {
        let mut attrs = match style.color {
            Some(ref color) => {
                let mut s = format!("fill=\"{}\"", color.to_svg_string());
                let alpha = style.fill_alpha();
                if alpha < 1.0 {
                    s.push_str(&format!(" fill-opacity=\"{}\"", fmt_num(alpha, 3)));
                }
                s
            }
            None => "fill=\"none\"".to_string(),
        };
        if let Some(ref stroke) = style.stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                stroke.to_svg_string(),
                self.n(style.stroke_width)
            ));
            let alpha = style.stroke_alpha();
            if alpha < 1.0 {
                attrs.push_str(&format!(" stroke-opacity=\"{}\"", fmt_num(alpha, 3)));
            }
        }
        attrs
    }

    fn points_attr(&self, points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|(x, y)| format!("{},{}", self.n(*x), self.n(*y)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the final SVG document.
    pub fn finish(self) -> String {
        let defs_section = if self.defs.is_empty() {
            String::new()
        } else {
            format!("  <defs>\n    {}\n  </defs>\n", self.defs.join("\n    "))
        };

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}pt\" height=\"{h}pt\" viewBox=\"0 0 {w} {h}\">\n\
             {}  {}\n</svg>\n",
            defs_section,
            self.content.join("\n  "),
            w = fmt_num(self.width, 2),
            h = fmt_num(self.height, 2),
        )
    }
}

impl Canvas for SvgCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), style: &LineStyle) {
        let element = format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>",
            self.n(from.0),
            self.n(from.1),
            self.n(to.0),
            self.n(to.1),
            self.stroke_attrs(style)
        );
        self.content.push(element);
    }

    fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        let element = format!(
            "<polyline points=\"{}\" {}/>",
            self.points_attr(points),
            self.stroke_attrs(style)
        );
        self.content.push(element);
    }

    fn polygon(&mut self, points: &[(f64, f64)], style: &FillStyle) {
        if points.len() < 3 || !style.is_visible() {
            return;
        }
        let element = format!(
            "<polygon points=\"{}\" {}/>",
            self.points_attr(points),
            self.fill_attrs(style)
        );
        self.content.push(element);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &FillStyle) {
        if !style.is_visible() {
            return;
        }
        let element = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            self.n(x),
            self.n(y),
            self.n(width),
            self.n(height),
            self.fill_attrs(style)
        );
        self.content.push(element);
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &FillStyle) {
        if !style.is_visible() {
            return;
        }
        let element = format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
            self.n(cx),
            self.n(cy),
            self.n(r),
            self.fill_attrs(style)
        );
        self.content.push(element);
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        // SVG rotates clockwise for positive angles.
        let transform = if style.rotation != 0.0 {
            format!(
                " transform=\"rotate({},{},{})\"",
                fmt_num(-style.rotation, 3),
                self.n(x),
                self.n(y)
            )
        } else {
            String::new()
        };
        let element = format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\"{}>{}</text>",
            self.n(x),
            self.n(y),
            escape_xml(&style.font_family),
            fmt_num(style.font_size, 2),
            style.weight.to_svg_string(),
            style.color.to_svg_string(),
            style.anchor.to_svg_string(),
            style.align.to_svg_string(),
            transform,
            escape_xml(text)
        );
        self.content.push(element);
    }

    fn begin_clip(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.clip_count += 1;
        let id = format!("clip{}", self.clip_count);
        let def = format!(
            "<clipPath id=\"{}\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath>",
            id,
            self.n(x),
            self.n(y),
            self.n(width),
            self.n(height)
        );
        self.defs.push(def);
        self.content.push(format!("<g clip-path=\"url(#{})\">", id));
    }

    fn end_clip(&mut self) {
        self.content.push("</g>".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::style::Color;

    #[test]
    fn test_document_has_point_size() {
        let svg = SvgCanvas::new(432.0, 360.0).finish();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"432pt\""));
        assert!(svg.contains("viewBox=\"0 0 432 360\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_escaped_and_rotated() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        let style = TextStyle::new().rotation(90.0);
        canvas.text(10.0, 20.0, "a < b", &style);
        let svg = canvas.finish();
        assert!(svg.contains("a &lt; b"));
        assert!(svg.contains("rotate(-90,10,20)"));
    }

    #[test]
    fn test_clip_group_balanced() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.begin_clip(0.0, 0.0, 50.0, 50.0);
        canvas.line((0.0, 0.0), (10.0, 10.0), &LineStyle::new().color(Color::RED));
        canvas.end_clip();
        let svg = canvas.finish();
        assert!(svg.contains("<clipPath id=\"clip1\">"));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.contains("stroke=\"rgb(255,0,0)\""));
    }

    #[test]
    fn test_invisible_fill_skipped() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.rect(0.0, 0.0, 10.0, 10.0, &FillStyle::new(Color::TRANSPARENT));
        assert!(!canvas.finish().contains("<rect"));
    }
}
