//! Layout, labeling and export conventions for consistent figures.
//!
//! Create one `PlotHelper` per figure. `get_fig_axes` builds the layout for
//! the chosen style; every other operation needs that layout and fails with
//! [`PlotError::NoFigure`] before it exists.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{ExportOptions, HelperConfig};
use crate::convert::{pdf_to_eps, ConversionStatus};
use crate::font_size::{axes_label_size, axes_title_size, common_label_size, tick_inset_size, tick_size};
use crate::plot_style::PlotStyle;
use crate::plotting::element::{AxisSelect, TickParams, TickWhich};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::{Axes, AxesId, Figure, Theme};

/// Inset position as `[left, bottom, width, height]` figure fractions.
pub const INSET_RECT: [f64; 4] = [0.6, 0.3, 0.3, 0.3];

/// Figure helper for one of the fixed layout styles.
#[derive(Debug)]
pub struct PlotHelper {
    style: PlotStyle,
    theme: Theme,
    options: ExportOptions,
    figure: Option<Figure>,
    axes: Vec<AxesId>,
    inset: Option<AxesId>,
}

impl PlotHelper {
    pub fn new(style: PlotStyle, use_science: bool) -> Self {
        Self::with_options(style, use_science, ExportOptions::default())
    }

    pub fn with_options(style: PlotStyle, use_science: bool, options: ExportOptions) -> Self {
        PlotHelper {
            style,
            theme: Theme::from_science_flag(use_science),
            options,
            figure: None,
            axes: Vec::new(),
            inset: None,
        }
    }

    /// Helper configured from a loaded config file.
    pub fn from_config(style: PlotStyle, config: &HelperConfig) -> Self {
        Self::with_options(style, config.science, config.export.clone())
    }

    pub fn style(&self) -> PlotStyle {
        self.style
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    pub fn figure_mut(&mut self) -> Option<&mut Figure> {
        self.figure.as_mut()
    }

    /// Handles of the layout axes in row-major order; empty before layout.
    pub fn axes(&self) -> &[AxesId] {
        &self.axes
    }

    pub fn inset(&self) -> Option<AxesId> {
        self.inset
    }

    fn check_fig(&self) -> PlotResult<&Figure> {
        self.figure.as_ref().ok_or(PlotError::NoFigure)
    }

    fn fig_mut(&mut self) -> PlotResult<&mut Figure> {
        self.figure.as_mut().ok_or(PlotError::NoFigure)
    }

    /// Any axes of the figure, layout or inset, for plotting data.
    pub fn ax_mut(&mut self, ax: AxesId) -> PlotResult<&mut Axes> {
        self.fig_mut()?.axes_mut(ax)
    }

    /// Layout axes for the per-axes setters; the inset is not accepted.
    fn member_mut(&mut self, ax: AxesId) -> PlotResult<&mut Axes> {
        self.check_fig()?;
        if !self.axes.contains(&ax) {
            return Err(PlotError::ForeignAxes(ax));
        }
        self.fig_mut()?.axes_mut(ax)
    }

    /// Build the figure and axes for the style and apply tick label sizes.
    ///
    /// Calling this again replaces the figure and drops the inset.
    pub fn get_fig_axes(&mut self) -> PlotResult<Vec<AxesId>> {
        if self.figure.is_some() {
            warn!("Rebuilding the {} layout; the previous figure is discarded", self.style);
        }
        let (rows, cols) = self.style.grid();
        let (width, height) = self.style.figsize();

        let mut figure = Figure::with_theme(width, height, self.theme);
        let axes = figure.subplots(rows, cols)?;
        debug!(
            "Created {} layout: {}x{} axes on a {}x{} in figure",
            self.style, rows, cols, width, height
        );

        self.figure = Some(figure);
        self.axes = axes;
        self.inset = None;
        self.set_tick_size()?;
        Ok(self.axes.clone())
    }

    /// Figure-level x label in the common label size.
    pub fn add_common_xlabel(&mut self, xlabel: &str) -> PlotResult<()> {
        let size = common_label_size(self.style) as f64;
        self.fig_mut()?.set_supxlabel(xlabel, size);
        Ok(())
    }

    /// Figure-level y label in the common label size.
    pub fn add_common_ylabel(&mut self, ylabel: &str) -> PlotResult<()> {
        let size = common_label_size(self.style) as f64;
        self.fig_mut()?.set_supylabel(ylabel, size);
        Ok(())
    }

    /// Figure title in the common label size.
    pub fn add_fig_title(&mut self, title: &str) -> PlotResult<()> {
        let size = common_label_size(self.style) as f64;
        self.fig_mut()?.set_suptitle(title, size);
        Ok(())
    }

    pub fn set_ax_title(&mut self, ax: AxesId, title: &str) -> PlotResult<()> {
        let size = axes_title_size(self.style) as f64;
        self.member_mut(ax)?.set_title(title, size);
        Ok(())
    }

    pub fn set_ax_xlabel(&mut self, ax: AxesId, xlabel: &str) -> PlotResult<()> {
        let size = axes_label_size(self.style) as f64;
        self.member_mut(ax)?.set_xlabel(xlabel, size);
        Ok(())
    }

    pub fn set_ax_ylabel(&mut self, ax: AxesId, ylabel: &str) -> PlotResult<()> {
        let size = axes_label_size(self.style) as f64;
        self.member_mut(ax)?.set_ylabel(ylabel, size);
        Ok(())
    }

    /// Apply the style's tick label size to every layout axes, and the inset
    /// tick size to the inset if there is one. Major and minor labels alike.
    pub fn set_tick_size(&mut self) -> PlotResult<()> {
        let label_size = tick_size(self.style) as f64;
        let axes = self.axes.clone();
        let inset = self.inset;
        let figure = self.fig_mut()?;

        let params = TickParams::new()
            .axis(AxisSelect::Both)
            .which(TickWhich::Both)
            .label_size(label_size);
        for ax in axes {
            figure.axes_mut(ax)?.tick_params(&params);
        }

        if let Some(inset) = inset {
            let params = params.label_size(tick_inset_size() as f64);
            figure.axes_mut(inset)?.tick_params(&params);
        }
        Ok(())
    }

    /// Hide tick labels between panels so shared axes are labeled once.
    ///
    /// 2x2 keeps x labels on the bottom row and y labels on the left column;
    /// 2x1 hides the right panel's y labels; 1x1 is left untouched.
    pub fn set_tick_middle_invisible(&mut self) -> PlotResult<()> {
        let style = self.style;
        let axes = self.axes.clone();
        let figure = self.fig_mut()?;

        let hide_x = TickParams::new()
            .axis(AxisSelect::X)
            .which(TickWhich::Both)
            .labels_visible(false);
        let hide_y = TickParams::new()
            .axis(AxisSelect::Y)
            .which(TickWhich::Both)
            .labels_visible(false);

        let (x_hidden, y_hidden): (Vec<usize>, Vec<usize>) = match style {
            PlotStyle::OneByOne => (vec![], vec![]),
            PlotStyle::TwoByOne => (vec![], vec![1]),
            PlotStyle::TwoByTwo => (vec![0, 1], vec![1, 3]),
        };
        for i in x_hidden {
            figure.axes_mut(axes[i])?.tick_params(&hide_x);
        }
        for i in y_hidden {
            figure.axes_mut(axes[i])?.tick_params(&hide_y);
        }
        Ok(())
    }

    /// Add an inset axes at [`INSET_RECT`] and remember it as the inset.
    ///
    /// A later call replaces the stored handle; the earlier inset stays in
    /// the figure.
    pub fn add_inset(&mut self) -> PlotResult<AxesId> {
        let inset = self.fig_mut()?.add_axes(INSET_RECT)?;
        if let Some(previous) = self.inset.replace(inset) {
            debug!("Inset {} replaced by {}", previous, inset);
        }
        Ok(inset)
    }

    /// Write `<name>.pdf` and `<name>.eps`.
    pub fn save_pdf_eps(&self, name: impl AsRef<Path>) -> PlotResult<()> {
        let figure = self.check_fig()?;
        let pdf = output_path(name.as_ref(), "pdf");
        let eps = output_path(name.as_ref(), "eps");
        figure.save_pdf(&pdf, self.options.dpi)?;
        figure.save_eps(&eps, self.options.dpi)?;
        info!("Saved {} and {}", pdf.display(), eps.display());
        Ok(())
    }

    /// Write `<name>.pdf`, then have the external converter produce a
    /// transparency-preserving `<name>.eps` from it.
    ///
    /// A converter failure is reported in the returned status and logged;
    /// the PDF stays on disk either way.
    pub fn save_pdf_trans(&self, name: impl AsRef<Path>) -> PlotResult<ConversionStatus> {
        let figure = self.check_fig()?;
        let pdf = output_path(name.as_ref(), "pdf");
        let eps = output_path(name.as_ref(), "eps");
        figure.save_pdf(&pdf, self.options.dpi)?;
        info!("Saved {}", pdf.display());

        let status = pdf_to_eps(&self.options, &pdf, &eps);
        if status.is_converted() {
            info!("Saved {}", eps.display());
        }
        Ok(status)
    }

    /// Write `<name>.svg`.
    pub fn save_svg(&self, name: impl AsRef<Path>) -> PlotResult<()> {
        let figure = self.check_fig()?;
        let svg = output_path(name.as_ref(), "svg");
        figure.save_svg(&svg, self.options.dpi)?;
        info!("Saved {}", svg.display());
        Ok(())
    }
}

/// `<name>.<ext>`, appended so that dots already in `name` are kept.
fn output_path(name: &Path, ext: &str) -> PathBuf {
    let mut path = OsString::from(name.as_os_str());
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_dots() {
        assert_eq!(output_path(Path::new("fig.v2"), "pdf"), PathBuf::from("fig.v2.pdf"));
        assert_eq!(output_path(Path::new("out/plot"), "eps"), PathBuf::from("out/plot.eps"));
    }

    #[test]
    fn test_theme_follows_science_flag() {
        assert_eq!(PlotHelper::new(PlotStyle::OneByOne, true).theme(), Theme::Science);
        assert_eq!(PlotHelper::new(PlotStyle::OneByOne, false).theme(), Theme::Default);
    }

    #[test]
    fn test_from_config() {
        let config = HelperConfig {
            export: ExportOptions {
                dpi: 300,
                ..ExportOptions::default()
            },
            science: true,
        };
        let helper = PlotHelper::from_config(PlotStyle::TwoByOne, &config);
        assert_eq!(helper.options().dpi, 300);
        assert_eq!(helper.theme(), Theme::Science);
    }

    #[test]
    fn test_rebuild_replaces_figure_and_clears_inset() {
        let mut helper = PlotHelper::new(PlotStyle::TwoByOne, false);
        let first = helper.get_fig_axes().unwrap();
        helper.add_inset().unwrap();
        let second = helper.get_fig_axes().unwrap();
        assert_eq!(second.len(), 2);
        assert_ne!(first, second);
        assert!(helper.inset().is_none());
        assert_eq!(helper.figure().map(|f| f.axes_ids().len()), Some(2));
    }

    #[test]
    fn test_second_inset_replaces_handle() {
        let mut helper = PlotHelper::new(PlotStyle::OneByOne, false);
        helper.get_fig_axes().unwrap();
        let first = helper.add_inset().unwrap();
        let second = helper.add_inset().unwrap();
        assert_ne!(first, second);
        assert_eq!(helper.inset(), Some(second));
        assert_eq!(helper.figure().map(|f| f.axes_ids().len()), Some(3));
    }

    #[test]
    fn test_inset_rejected_by_per_axes_setters() {
        let mut helper = PlotHelper::new(PlotStyle::OneByOne, false);
        helper.get_fig_axes().unwrap();
        let inset = helper.add_inset().unwrap();
        assert!(matches!(helper.set_ax_title(inset, "inset"), Err(PlotError::ForeignAxes(_))));
        // Plotting into the inset is still possible.
        assert!(helper.ax_mut(inset).is_ok());
    }

    #[test]
    fn test_tick_middle_invisible_two_by_one() {
        let mut helper = PlotHelper::new(PlotStyle::TwoByOne, false);
        let axes = helper.get_fig_axes().unwrap();
        helper.set_tick_middle_invisible().unwrap();
        let fig = helper.figure().unwrap();
        let left = fig.axes(axes[0]).unwrap();
        let right = fig.axes(axes[1]).unwrap();
        assert!(left.y_axis.major.label_visible);
        assert!(!right.y_axis.major.label_visible);
        assert!(!right.y_axis.minor.label_visible);
        assert!(right.x_axis.major.label_visible);
    }

    #[test]
    fn test_tick_middle_invisible_one_by_one_is_noop() {
        let mut helper = PlotHelper::new(PlotStyle::OneByOne, false);
        let axes = helper.get_fig_axes().unwrap();
        helper.set_tick_middle_invisible().unwrap();
        let ax = helper.figure().unwrap().axes(axes[0]).unwrap();
        assert!(ax.x_axis.major.label_visible);
        assert!(ax.y_axis.major.label_visible);
    }
}
