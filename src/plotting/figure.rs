//! Figure (canvas) implementation.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::plotting::axes::Axes;
use crate::plotting::backend::{coord_precision, Canvas, EpsCanvas, PdfCanvas, SvgCanvas};
use crate::plotting::element::{Bounds, Text};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::style::{FillStyle, TextAnchor, TextStyle, Theme, ThemeConfig, VerticalAlign};

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;

static NEXT_FIGURE_ID: AtomicU64 = AtomicU64::new(1);

/// Subplot grid parameters as figure fractions.
#[derive(Debug, Clone, Copy)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    /// Horizontal gap as a fraction of the average axes width
    pub wspace: f64,
    /// Vertical gap as a fraction of the average axes height
    pub hspace: f64,
}

impl Default for SubplotParams {
    fn default() -> Self {
        SubplotParams {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

impl SubplotParams {
    /// Position of the cell at (row, col), rows counted from the top.
    fn cell(&self, rows: usize, cols: usize, row: usize, col: usize) -> Bounds {
        let cell_h = (self.top - self.bottom) / (rows as f64 + self.hspace * (rows as f64 - 1.0));
        let cell_w = (self.right - self.left) / (cols as f64 + self.wspace * (cols as f64 - 1.0));
        let top = self.top - row as f64 * cell_h * (1.0 + self.hspace);
        let left = self.left + col as f64 * cell_w * (1.0 + self.wspace);
        Bounds::new(left, left + cell_w, top - cell_h, top)
    }
}

/// Handle to an axes inside a particular figure.
///
/// Handles remember the figure that issued them, so a handle from one figure
/// is never mistaken for an axes of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId {
    figure: u64,
    index: usize,
}

impl AxesId {
    /// Position of the axes in creation order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn figure(&self) -> u64 {
        self.figure
    }
}

impl fmt::Display for AxesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "figure {} axes {}", self.figure, self.index)
    }
}

/// A figure containing one or more axes.
#[derive(Debug)]
pub struct Figure {
    id: u64,
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
    pub theme: ThemeConfig,
    pub subplot_params: SubplotParams,
    axes: Vec<Axes>,
    suptitle: Option<Text>,
    supxlabel: Option<Text>,
    supylabel: Option<Text>,
}

impl Figure {
    /// Create a figure of the given size in inches.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_theme(width, height, Theme::Default)
    }

    pub fn with_theme(width: f64, height: f64, theme: Theme) -> Self {
        Figure {
            id: NEXT_FIGURE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            theme: theme.config(),
            subplot_params: SubplotParams::default(),
            axes: Vec::new(),
            suptitle: None,
            supxlabel: None,
            supylabel: None,
        }
    }

    /// Unique id of this figure within the process.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Page size in points.
    pub fn size_points(&self) -> (f64, f64) {
        (self.width * POINTS_PER_INCH, self.height * POINTS_PER_INCH)
    }

    fn push_axes(&mut self, position: Bounds) -> AxesId {
        self.axes.push(Axes::new(position, self.theme.clone()));
        AxesId {
            figure: self.id,
            index: self.axes.len() - 1,
        }
    }

    /// Create a grid of axes; handles are returned row by row from the top left.
    pub fn subplots(&mut self, rows: usize, cols: usize) -> PlotResult<Vec<AxesId>> {
        if rows == 0 || cols == 0 {
            return Err(PlotError::InvalidConfig(format!(
                "subplot grid needs at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        let params = self.subplot_params;
        let mut ids = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                ids.push(self.push_axes(params.cell(rows, cols, row, col)));
            }
        }
        Ok(ids)
    }

    /// Add an axes at `[left, bottom, width, height]` in figure fractions.
    pub fn add_axes(&mut self, rect: [f64; 4]) -> PlotResult<AxesId> {
        let [_, _, width, height] = rect;
        if rect.iter().any(|v| !v.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(PlotError::InvalidConfig(format!(
                "axes rectangle {:?} needs finite values and a positive size",
                rect
            )));
        }
        Ok(self.push_axes(Bounds::from_rect(rect)))
    }

    fn check(&self, id: AxesId) -> PlotResult<usize> {
        if id.figure == self.id && id.index < self.axes.len() {
            Ok(id.index)
        } else {
            Err(PlotError::UnknownAxes(id))
        }
    }

    pub fn contains(&self, id: AxesId) -> bool {
        self.check(id).is_ok()
    }

    pub fn axes(&self, id: AxesId) -> PlotResult<&Axes> {
        let index = self.check(id)?;
        Ok(&self.axes[index])
    }

    pub fn axes_mut(&mut self, id: AxesId) -> PlotResult<&mut Axes> {
        let index = self.check(id)?;
        Ok(&mut self.axes[index])
    }

    /// Handles of all axes in creation order.
    pub fn axes_ids(&self) -> Vec<AxesId> {
        (0..self.axes.len())
            .map(|index| AxesId { figure: self.id, index })
            .collect()
    }

    fn figure_text(&self, text: impl Into<String>, font_size: f64) -> Text {
        let style = TextStyle::new()
            .font_family(self.theme.font_family.clone())
            .font_size(font_size)
            .color(self.theme.text_color.clone());
        Text::new(text, style)
    }

    /// Title centered above all axes.
    pub fn set_suptitle(&mut self, text: impl Into<String>, font_size: f64) -> &mut Self {
        self.suptitle = Some(self.figure_text(text, font_size));
        self
    }

    /// X label centered below all axes.
    pub fn set_supxlabel(&mut self, text: impl Into<String>, font_size: f64) -> &mut Self {
        self.supxlabel = Some(self.figure_text(text, font_size));
        self
    }

    /// Y label centered left of all axes.
    pub fn set_supylabel(&mut self, text: impl Into<String>, font_size: f64) -> &mut Self {
        self.supylabel = Some(self.figure_text(text, font_size));
        self
    }

    pub fn suptitle(&self) -> Option<&Text> {
        self.suptitle.as_ref()
    }

    pub fn supxlabel(&self) -> Option<&Text> {
        self.supxlabel.as_ref()
    }

    pub fn supylabel(&self) -> Option<&Text> {
        self.supylabel.as_ref()
    }

    /// Draw the whole figure onto a canvas sized to the figure.
    pub fn render(&self, canvas: &mut dyn Canvas) -> PlotResult<()> {
        let (width, height) = canvas.size();
        if !(width > 0.0 && height > 0.0) {
            return Err(PlotError::RenderError(format!(
                "canvas size {}x{} is not drawable",
                width, height
            )));
        }

        canvas.rect(0.0, 0.0, width, height, &FillStyle::new(self.theme.background.clone()));

        for axes in &self.axes {
            axes.draw(canvas)?;
        }

        if let Some(ref title) = self.suptitle {
            let mut title = title.clone();
            title.style = title.style.anchor(TextAnchor::Middle).align(VerticalAlign::Top);
            title.draw_at(canvas, 0.5 * width, (1.0 - 0.98) * height);
        }
        if let Some(ref label) = self.supxlabel {
            let mut label = label.clone();
            label.style = label.style.anchor(TextAnchor::Middle).align(VerticalAlign::Baseline);
            label.draw_at(canvas, 0.5 * width, (1.0 - 0.01) * height);
        }
        if let Some(ref label) = self.supylabel {
            let mut label = label.clone();
            label.style = label
                .style
                .anchor(TextAnchor::Middle)
                .align(VerticalAlign::Top)
                .rotation(90.0);
            label.draw_at(canvas, 0.02 * width, 0.5 * height);
        }
        Ok(())
    }

    pub fn to_svg(&self, dpi: u32) -> PlotResult<String> {
        let (width, height) = self.size_points();
        let mut canvas = SvgCanvas::new(width, height).precision(coord_precision(dpi));
        self.render(&mut canvas)?;
        Ok(canvas.finish())
    }

    pub fn to_pdf(&self, dpi: u32) -> PlotResult<Vec<u8>> {
        let (width, height) = self.size_points();
        let mut canvas = PdfCanvas::new(width, height).precision(coord_precision(dpi));
        self.render(&mut canvas)?;
        Ok(canvas.finish())
    }

    pub fn to_eps(&self, dpi: u32) -> PlotResult<Vec<u8>> {
        let (width, height) = self.size_points();
        let mut canvas = EpsCanvas::new(width, height).precision(coord_precision(dpi));
        self.render(&mut canvas)?;
        Ok(canvas.finish())
    }

    pub fn save_svg(&self, path: impl AsRef<Path>, dpi: u32) -> PlotResult<()> {
        let svg = self.to_svg(dpi)?;
        write_output(path.as_ref(), svg.as_bytes())
    }

    pub fn save_pdf(&self, path: impl AsRef<Path>, dpi: u32) -> PlotResult<()> {
        let pdf = self.to_pdf(dpi)?;
        write_output(path.as_ref(), &pdf)
    }

    pub fn save_eps(&self, path: impl AsRef<Path>, dpi: u32) -> PlotResult<()> {
        let eps = self.to_eps(dpi)?;
        write_output(path.as_ref(), &eps)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> PlotResult<()> {
    fs::write(path, bytes)?;
    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subplots_row_major() {
        let mut fig = Figure::new(6.0, 5.0);
        let ids = fig.subplots(2, 2).unwrap();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids.iter().map(|id| id.index()).collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        let top_left = fig.axes(ids[0]).unwrap().position;
        let top_right = fig.axes(ids[1]).unwrap().position;
        let bottom_left = fig.axes(ids[2]).unwrap().position;
        assert!((top_left.x_min - 0.125).abs() < 1e-12);
        assert!((top_left.y_max - 0.88).abs() < 1e-12);
        assert!(top_right.x_min > top_left.x_max);
        assert!(bottom_left.y_max < top_left.y_min);
        assert!((bottom_left.y_min - 0.11).abs() < 1e-12);
        assert!((top_right.x_max - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_subplots_gap_matches_wspace() {
        let mut fig = Figure::new(8.0, 4.0);
        let ids = fig.subplots(1, 2).unwrap();
        let left = fig.axes(ids[0]).unwrap().position;
        let right = fig.axes(ids[1]).unwrap().position;
        let gap = right.x_min - left.x_max;
        assert!((gap - 0.2 * left.width()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut fig = Figure::new(6.0, 5.0);
        assert!(matches!(fig.subplots(0, 2), Err(PlotError::InvalidConfig(_))));
    }

    #[test]
    fn test_handles_are_figure_scoped() {
        let mut a = Figure::new(6.0, 5.0);
        let mut b = Figure::new(6.0, 5.0);
        let a_ids = a.subplots(1, 1).unwrap();
        let b_ids = b.subplots(1, 1).unwrap();
        assert_ne!(a_ids[0], b_ids[0]);
        assert!(a.contains(a_ids[0]));
        assert!(!a.contains(b_ids[0]));
        assert!(matches!(a.axes_mut(b_ids[0]), Err(PlotError::UnknownAxes(_))));
    }

    #[test]
    fn test_add_axes_rect() {
        let mut fig = Figure::new(6.0, 5.0);
        fig.subplots(1, 1).unwrap();
        let inset = fig.add_axes([0.6, 0.3, 0.3, 0.3]).unwrap();
        assert_eq!(inset.index(), 1);
        let pos = fig.axes(inset).unwrap().position;
        assert!((pos.x_max - 0.9).abs() < 1e-12);
        assert!((pos.y_max - 0.6).abs() < 1e-12);
        assert!(fig.add_axes([0.1, 0.1, 0.0, 0.5]).is_err());
        assert_eq!(fig.axes_ids().len(), 2);
    }

    #[test]
    fn test_figure_texts_rendered() {
        let mut fig = Figure::new(6.0, 5.0);
        fig.subplots(1, 1).unwrap();
        fig.set_suptitle("Overview", 22.0)
            .set_supxlabel("Time", 22.0)
            .set_supylabel("Signal", 22.0);
        let svg = fig.to_svg(600).unwrap();
        assert!(svg.contains("width=\"432pt\""));
        assert!(svg.contains(">Overview</text>"));
        assert!(svg.contains(">Time</text>"));
        assert!(svg.contains(">Signal</text>"));
        assert_eq!(fig.suptitle().map(|t| t.font_size()), Some(22.0));
    }

    #[test]
    fn test_save_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut fig = Figure::with_theme(6.0, 5.0, Theme::Science);
        let ids = fig.subplots(1, 1).unwrap();
        fig.axes_mut(ids[0])
            .unwrap()
            .plot(vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 1.0])
            .build()
            .unwrap();

        let svg = dir.path().join("fig.svg");
        let pdf = dir.path().join("fig.pdf");
        let eps = dir.path().join("fig.eps");
        fig.save_svg(&svg, 600).unwrap();
        fig.save_pdf(&pdf, 600).unwrap();
        fig.save_eps(&eps, 600).unwrap();

        assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF-"));
        assert!(fs::read(&eps).unwrap().starts_with(b"%!PS-Adobe-3.0 EPSF-3.0"));
        assert!(fs::read_to_string(&svg).unwrap().contains("<polyline"));
    }

    #[test]
    fn test_save_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let fig = Figure::new(6.0, 5.0);
        let err = fig.save_pdf(dir.path().join("missing").join("fig.pdf"), 600).unwrap_err();
        assert!(matches!(err, PlotError::Io(_)));
    }
}
