//! Axes (subplot) implementation.

use crate::plotting::backend::Canvas;
use crate::plotting::data::IntoPlotData;
use crate::plotting::element::{
    approx_text_width, AxisConfig, AxisSelect, Bounds, DataTransform, GridConfig, Legend,
    LegendPosition, Text, TickConfig, TickDirection, TickParams,
};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::plot::{check_series, LinePlot, Plot, ScatterPlot};
use crate::plotting::scale::{LinearScale, Scale};
use crate::plotting::style::{
    Color, DashPattern, FillStyle, Marker, TextAnchor, TextStyle, ThemeConfig, VerticalAlign,
};

/// Fraction of the data range added on each side when limits are automatic.
const AUTO_MARGIN: f64 = 0.05;

/// Gap between the axes frame and the title baseline.
const TITLE_PAD: f64 = 6.0;

/// Gap between tick labels and the axis label.
const LABEL_PAD: f64 = 4.0;

/// An axes object representing a single plot area.
#[derive(Debug)]
pub struct Axes {
    /// Position within figure as fractions, y measured from the bottom
    pub position: Bounds,
    x_scale: Box<dyn Scale>,
    y_scale: Box<dyn Scale>,
    plots: Vec<Box<dyn Plot>>,
    pub title: Option<Text>,
    pub x_label: Option<Text>,
    pub y_label: Option<Text>,
    pub legend: Option<Legend>,
    pub grid: GridConfig,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    /// Union of the plot bounds
    data_bounds: Option<Bounds>,
    x_lim: Option<(f64, f64)>,
    y_lim: Option<(f64, f64)>,
    color_index: usize,
    pub theme: ThemeConfig,
}

impl Axes {
    /// Create an axes at a figure-fraction position, styled by a theme.
    pub fn new(position: Bounds, theme: ThemeConfig) -> Self {
        Axes {
            position,
            x_scale: Box::new(LinearScale::auto()),
            y_scale: Box::new(LinearScale::auto()),
            plots: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: None,
            grid: GridConfig::default()
                .visible(theme.show_grid)
                .color(theme.grid_color.clone()),
            x_axis: AxisConfig::themed(&theme),
            y_axis: AxisConfig::themed(&theme),
            data_bounds: None,
            x_lim: None,
            y_lim: None,
            color_index: 0,
            theme,
        }
    }

    /// Add a line plot.
    pub fn plot(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LinePlotBuilder<'_> {
        LinePlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            color: None,
            linewidth: None,
            linestyle: None,
            marker: None,
            markersize: None,
            label: None,
            format: None,
        }
    }

    /// Add a scatter plot.
    pub fn scatter(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> ScatterPlotBuilder<'_> {
        ScatterPlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            color: None,
            size: None,
            marker: None,
            alpha: None,
            label: None,
        }
    }

    fn text_style(&self, font_size: f64) -> TextStyle {
        TextStyle::new()
            .font_family(self.theme.font_family.clone())
            .font_size(font_size)
            .color(self.theme.text_color.clone())
    }

    pub fn set_title(&mut self, title: impl Into<String>, font_size: f64) -> &mut Self {
        let style = self.text_style(font_size);
        self.title = Some(Text::new(title, style));
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>, font_size: f64) -> &mut Self {
        let style = self.text_style(font_size);
        self.x_label = Some(Text::new(label, style));
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>, font_size: f64) -> &mut Self {
        let style = self.text_style(font_size);
        self.y_label = Some(Text::new(label, style));
        self
    }

    /// Set the x-axis limits.
    pub fn set_xlim(&mut self, min: f64, max: f64) -> PlotResult<&mut Self> {
        self.x_lim = Some(checked_limits(min, max)?);
        Ok(self)
    }

    /// Set the y-axis limits.
    pub fn set_ylim(&mut self, min: f64, max: f64) -> PlotResult<&mut Self> {
        self.y_lim = Some(checked_limits(min, max)?);
        Ok(self)
    }

    pub fn grid(&mut self, visible: bool) -> &mut Self {
        self.grid.visible = visible;
        self
    }

    /// Show the legend at a corner of the axes.
    pub fn legend(&mut self, position: LegendPosition) -> &mut Self {
        let legend = self.legend.get_or_insert_with(Legend::new);
        legend.visible = true;
        legend.position = position;
        legend.text_style.font_family = self.theme.font_family.clone();
        self
    }

    /// Update tick marks and tick labels of one or both axes.
    pub fn tick_params(&mut self, params: &TickParams) -> &mut Self {
        if matches!(params.axis, AxisSelect::X | AxisSelect::Both) {
            self.x_axis.apply(params);
        }
        if matches!(params.axis, AxisSelect::Y | AxisSelect::Both) {
            self.y_axis.apply(params);
        }
        self
    }

    pub fn plots(&self) -> &[Box<dyn Plot>] {
        &self.plots
    }

    /// Add a plot to this axes.
    pub(crate) fn add_plot(&mut self, plot: Box<dyn Plot>) {
        if let Some(plot_bounds) = plot.bounds() {
            match self.data_bounds {
                Some(ref mut bounds) => bounds.include_bounds(&plot_bounds),
                None => self.data_bounds = Some(plot_bounds),
            }
        }

        if let Some(entry) = plot.legend_entry() {
            self.legend
                .get_or_insert_with(|| Legend::new().visible(false))
                .add_entry(entry);
        }

        self.plots.push(plot);
    }

    /// Next color of the theme cycle.
    pub(crate) fn next_color(&mut self) -> Color {
        let color = self.theme.cycle_color(self.color_index);
        self.color_index += 1;
        color
    }

    /// The data range shown, after limits and automatic margins.
    pub fn view_bounds(&self) -> Bounds {
        let data = self.data_bounds;
        let (x_min, x_max) = self
            .x_lim
            .or_else(|| data.map(|b| with_margin(b.x_min, b.x_max)))
            .unwrap_or((0.0, 1.0));
        let (y_min, y_max) = self
            .y_lim
            .or_else(|| data.map(|b| with_margin(b.y_min, b.y_max)))
            .unwrap_or((0.0, 1.0));
        Bounds::new(x_min, x_max, y_min, y_max)
    }

    /// Canvas rectangle of the axes area for a page of the given size.
    pub fn area(&self, page_width: f64, page_height: f64) -> Bounds {
        Bounds::new(
            self.position.x_min * page_width,
            self.position.x_max * page_width,
            (1.0 - self.position.y_max) * page_height,
            (1.0 - self.position.y_min) * page_height,
        )
    }

    /// Draw the axes, its plots and its decorations.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> PlotResult<()> {
        let (page_width, page_height) = canvas.size();
        let area = self.area(page_width, page_height);

        let view = self.view_bounds();
        let mut x_scale = self.x_scale.clone();
        let mut y_scale = self.y_scale.clone();
        x_scale.set_range(view.x_min, view.x_max)?;
        y_scale.set_range(view.y_min, view.y_max)?;
        let (x_min, x_max) = x_scale.range();
        let (y_min, y_max) = y_scale.range();
        let transform = DataTransform::new(Bounds::new(x_min, x_max, y_min, y_max), area);

        canvas.rect(
            area.x_min,
            area.y_min,
            area.width(),
            area.height(),
            &FillStyle::new(self.theme.plot_background.clone()),
        );

        let x_major = self.major_ticks(&self.x_axis, x_scale.as_ref());
        let y_major = self.major_ticks(&self.y_axis, y_scale.as_ref());
        let to_x = |v: f64| area.x_min + x_scale.transform(v) * area.width();
        let to_y = |v: f64| area.y_max - y_scale.transform(v) * area.height();

        if self.grid.visible {
            if self.grid.show_x {
                for &(v, _) in &x_major {
                    canvas.line((to_x(v), area.y_min), (to_x(v), area.y_max), &self.grid.style);
                }
            }
            if self.grid.show_y {
                for &(v, _) in &y_major {
                    canvas.line((area.x_min, to_y(v)), (area.x_max, to_y(v)), &self.grid.style);
                }
            }
        }

        canvas.begin_clip(area.x_min, area.y_min, area.width(), area.height());
        for plot in &self.plots {
            plot.draw(canvas, &transform);
        }
        canvas.end_clip();

        self.draw_spines(canvas, &area);

        // Minor ticks first so major marks sit on top.
        let x_minor: Vec<(f64, String)> = if self.x_axis.minor.visible && self.x_axis.tick_positions.is_none() {
            x_scale
                .minor_ticks(self.x_axis.num_ticks, self.x_axis.minor_divisions)
                .into_iter()
                .map(|v| (v, self.x_axis.format_tick(v)))
                .collect()
        } else {
            Vec::new()
        };
        let y_minor: Vec<(f64, String)> = if self.y_axis.minor.visible && self.y_axis.tick_positions.is_none() {
            y_scale
                .minor_ticks(self.y_axis.num_ticks, self.y_axis.minor_divisions)
                .into_iter()
                .map(|v| (v, self.y_axis.format_tick(v)))
                .collect()
        } else {
            Vec::new()
        };

        let mut x_label_depth: f64 = 0.0;
        let mut y_label_width: f64 = 0.0;
        if self.x_axis.visible {
            for (ticks, config) in [(&x_minor, &self.x_axis.minor), (&x_major, &self.x_axis.major)] {
                let positions: Vec<(f64, &str)> = ticks.iter().map(|(v, l)| (to_x(*v), l.as_str())).collect();
                let depth = self.draw_x_ticks(canvas, &area, &positions, config);
                x_label_depth = x_label_depth.max(depth);
            }
        }
        if self.y_axis.visible {
            for (ticks, config) in [(&y_minor, &self.y_axis.minor), (&y_major, &self.y_axis.major)] {
                let positions: Vec<(f64, &str)> = ticks.iter().map(|(v, l)| (to_y(*v), l.as_str())).collect();
                let width = self.draw_y_ticks(canvas, &area, &positions, config);
                y_label_width = y_label_width.max(width);
            }
        }

        self.draw_labels(canvas, &area, x_label_depth, y_label_width);

        if let Some(ref legend) = self.legend {
            legend.draw(canvas, &area);
        }
        Ok(())
    }

    /// Major tick values inside the view with their labels.
    fn major_ticks(&self, axis: &AxisConfig, scale: &dyn Scale) -> Vec<(f64, String)> {
        let (min, max) = scale.range();
        match axis.tick_positions {
            Some(ref positions) => positions
                .iter()
                .enumerate()
                .filter(|(_, v)| **v >= min && **v <= max)
                .map(|(i, v)| {
                    let label = axis
                        .tick_labels
                        .as_ref()
                        .and_then(|labels| labels.get(i).cloned())
                        .unwrap_or_else(|| axis.format_tick(*v));
                    (*v, label)
                })
                .collect(),
            None => scale
                .ticks(axis.num_ticks)
                .into_iter()
                .map(|v| (v, axis.format_tick(v)))
                .collect(),
        }
    }

    fn draw_spines(&self, canvas: &mut dyn Canvas, area: &Bounds) {
        let top_left = (area.x_min, area.y_min);
        let top_right = (area.x_max, area.y_min);
        let bottom_left = (area.x_min, area.y_max);
        let bottom_right = (area.x_max, area.y_max);
        if self.x_axis.visible {
            canvas.line(bottom_left, bottom_right, &self.x_axis.line_style);
            canvas.line(top_left, top_right, &self.x_axis.line_style);
        }
        if self.y_axis.visible {
            canvas.line(bottom_left, top_left, &self.y_axis.line_style);
            canvas.line(bottom_right, top_right, &self.y_axis.line_style);
        }
    }

    /// Draw x ticks at canvas x positions; returns how far labels reach below the frame.
    fn draw_x_ticks(
        &self,
        canvas: &mut dyn Canvas,
        area: &Bounds,
        ticks: &[(f64, &str)],
        config: &TickConfig,
    ) -> f64 {
        let mut style = self.x_axis.line_style.clone();
        style.width = style.width.max(0.5);
        let sign = tick_sign(config.direction);
        if config.visible {
            for &(x, _) in ticks {
                canvas.line((x, area.y_max), (x, area.y_max + sign * config.length), &style);
                if self.x_axis.mirror {
                    canvas.line((x, area.y_min), (x, area.y_min - sign * config.length), &style);
                }
            }
        }
        if !config.label_visible || ticks.is_empty() {
            return 0.0;
        }
        let label_style = config
            .label_style
            .clone()
            .anchor(TextAnchor::Middle)
            .align(VerticalAlign::Top);
        let y = area.y_max + config.outward_extent() + self.x_axis.tick_padding;
        for &(x, label) in ticks {
            canvas.text(x, y, label, &label_style);
        }
        config.outward_extent() + self.x_axis.tick_padding + label_style.font_size
    }

    /// Draw y ticks at canvas y positions; returns how far labels reach left of the frame.
    fn draw_y_ticks(
        &self,
        canvas: &mut dyn Canvas,
        area: &Bounds,
        ticks: &[(f64, &str)],
        config: &TickConfig,
    ) -> f64 {
        let mut style = self.y_axis.line_style.clone();
        style.width = style.width.max(0.5);
        let sign = tick_sign(config.direction);
        if config.visible {
            for &(y, _) in ticks {
                canvas.line((area.x_min, y), (area.x_min - sign * config.length, y), &style);
                if self.y_axis.mirror {
                    canvas.line((area.x_max, y), (area.x_max + sign * config.length, y), &style);
                }
            }
        }
        if !config.label_visible || ticks.is_empty() {
            return 0.0;
        }
        let label_style = config
            .label_style
            .clone()
            .anchor(TextAnchor::End)
            .align(VerticalAlign::Middle);
        let x = area.x_min - config.outward_extent() - self.y_axis.tick_padding;
        let widest = ticks
            .iter()
            .map(|(_, label)| approx_text_width(label, label_style.font_size))
            .fold(0.0, f64::max);
        for &(y, label) in ticks {
            canvas.text(x, y, label, &label_style);
        }
        config.outward_extent() + self.y_axis.tick_padding + widest
    }

    fn draw_labels(&self, canvas: &mut dyn Canvas, area: &Bounds, x_label_depth: f64, y_label_width: f64) {
        let center_x = (area.x_min + area.x_max) / 2.0;
        let center_y = (area.y_min + area.y_max) / 2.0;

        if let Some(ref title) = self.title {
            let mut title = title.clone();
            title.style = title.style.anchor(TextAnchor::Middle).align(VerticalAlign::Baseline);
            let mirrored = if self.x_axis.mirror {
                self.x_axis.major.outward_extent()
            } else {
                0.0
            };
            title.draw_at(canvas, center_x, area.y_min - mirrored - TITLE_PAD);
        }

        if let Some(ref label) = self.x_label {
            let mut label = label.clone();
            label.style = label.style.anchor(TextAnchor::Middle).align(VerticalAlign::Top);
            let depth = x_label_depth.max(self.x_axis.major.outward_extent());
            label.draw_at(canvas, center_x, area.y_max + depth + LABEL_PAD);
        }

        if let Some(ref label) = self.y_label {
            let mut label = label.clone();
            label.style = label
                .style
                .anchor(TextAnchor::Middle)
                .align(VerticalAlign::Baseline)
                .rotation(90.0);
            let width = y_label_width.max(self.y_axis.major.outward_extent());
            label.draw_at(canvas, area.x_min - width - LABEL_PAD, center_y);
        }
    }
}

impl Default for Axes {
    fn default() -> Self {
        Axes::new(Bounds::new(0.125, 0.9, 0.11, 0.88), ThemeConfig::default())
    }
}

fn checked_limits(min: f64, max: f64) -> PlotResult<(f64, f64)> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(PlotError::InvalidConfig(format!(
            "axis limits must be finite and increasing, got [{}, {}]",
            min, max
        )));
    }
    Ok((min, max))
}

fn with_margin(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        let pad = (max - min) * AUTO_MARGIN;
        (min - pad, max + pad)
    } else {
        (min - 0.5, max + 0.5)
    }
}

/// +1 when ticks point away from the axes area, -1 when they point into it.
fn tick_sign(direction: TickDirection) -> f64 {
    match direction {
        TickDirection::Out => 1.0,
        TickDirection::In => -1.0,
    }
}

/// Builder for line plots.
pub struct LinePlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    linewidth: Option<f64>,
    linestyle: Option<DashPattern>,
    marker: Option<Marker>,
    markersize: Option<f64>,
    label: Option<String>,
    format: Option<String>,
}

impl<'a> LinePlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = Some(style);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn markersize(mut self, size: f64) -> Self {
        self.markersize = Some(size);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Matplotlib-style format string, applied before the other settings.
    pub fn format(mut self, fmt: impl Into<String>) -> Self {
        self.format = Some(fmt.into());
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        check_series(&self.x, &self.y)?;
        let color = match self.color {
            Some(color) => color,
            None => self.axes.next_color(),
        };

        let mut plot = LinePlot::new(self.x, self.y)
            .linewidth(self.axes.theme.line_width)
            .color(color);
        if let Some(fmt) = self.format {
            plot = plot.format(&fmt);
        }
        if let Some(width) = self.linewidth {
            plot = plot.linewidth(width);
        }
        if let Some(style) = self.linestyle {
            plot = plot.linestyle(style);
        }
        if let Some(marker) = self.marker {
            plot = plot.marker(marker);
        }
        if plot.marker_style.is_some() {
            plot = plot.markersize(self.markersize.unwrap_or(self.axes.theme.marker_size));
        }
        if let Some(label) = self.label {
            plot = plot.label(label);
        }

        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

/// Builder for scatter plots.
pub struct ScatterPlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    size: Option<f64>,
    marker: Option<Marker>,
    alpha: Option<f64>,
    label: Option<String>,
}

impl<'a> ScatterPlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        check_series(&self.x, &self.y)?;
        let color = match self.color {
            Some(color) => color,
            None => self.axes.next_color(),
        };

        let mut plot = ScatterPlot::new(self.x, self.y)
            .color(color)
            .size(self.size.unwrap_or(self.axes.theme.marker_size));
        if let Some(marker) = self.marker {
            plot = plot.marker(marker);
        }
        if let Some(alpha) = self.alpha {
            plot = plot.alpha(alpha);
        }
        if let Some(label) = self.label {
            plot = plot.label(label);
        }

        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::backend::SvgCanvas;
    use crate::plotting::element::TickWhich;
    use crate::plotting::style::Theme;

    fn axes() -> Axes {
        Axes::default()
    }

    #[test]
    fn test_plot_builder_uses_color_cycle() {
        let mut ax = axes();
        ax.plot(vec![0.0, 1.0], vec![0.0, 1.0]).build().unwrap();
        ax.plot(vec![0.0, 1.0], vec![1.0, 0.0]).build().unwrap();
        let first = ax.plots()[0].line_style().unwrap().color;
        let second = ax.plots()[1].line_style().unwrap().color;
        assert_eq!(first, ax.theme.cycle_color(0));
        assert_eq!(second, ax.theme.cycle_color(1));
    }

    #[test]
    fn test_mismatched_series_rejected() {
        let mut ax = axes();
        let err = ax.plot(vec![0.0, 1.0], vec![0.0]).build().unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert!(ax.plots().is_empty());
    }

    #[test]
    fn test_view_bounds_margin_and_limits() {
        let mut ax = axes();
        ax.plot(vec![0.0, 10.0], vec![0.0, 1.0]).build().unwrap();
        let view = ax.view_bounds();
        assert!((view.x_min + 0.5).abs() < 1e-12);
        assert!((view.x_max - 10.5).abs() < 1e-12);

        ax.set_xlim(2.0, 4.0).unwrap();
        assert_eq!(ax.view_bounds().x_min, 2.0);
        assert!(ax.set_ylim(1.0, 1.0).is_err());
    }

    #[test]
    fn test_tick_params_selects_axis_and_level() {
        let mut ax = axes();
        ax.tick_params(
            &TickParams::new()
                .axis(AxisSelect::X)
                .which(TickWhich::Both)
                .labels_visible(false),
        );
        assert!(!ax.x_axis.major.label_visible);
        assert!(!ax.x_axis.minor.label_visible);
        assert!(ax.y_axis.major.label_visible);

        ax.tick_params(&TickParams::new().label_size(14.0));
        assert_eq!(ax.x_axis.major.label_style.font_size, 14.0);
        assert_eq!(ax.y_axis.major.label_style.font_size, 14.0);
        assert_ne!(ax.y_axis.minor.label_style.font_size, 14.0);
    }

    #[test]
    fn test_hidden_tick_labels_not_drawn() {
        let mut ax = axes();
        ax.plot(vec![0.0, 1.0], vec![0.0, 1.0]).build().unwrap();
        let mut canvas = SvgCanvas::new(400.0, 300.0);
        ax.draw(&mut canvas).unwrap();
        let with_labels = canvas.finish().matches("<text").count();

        ax.tick_params(&TickParams::new().axis(AxisSelect::Y).labels_visible(false));
        let mut canvas = SvgCanvas::new(400.0, 300.0);
        ax.draw(&mut canvas).unwrap();
        let without = canvas.finish().matches("<text").count();
        assert!(without < with_labels);
        assert!(without > 0);
    }

    #[test]
    fn test_draw_labels_and_title() {
        let mut ax = Axes::new(Bounds::new(0.125, 0.9, 0.11, 0.88), Theme::Science.config());
        ax.set_title("Panel", 18.0).set_xlabel("x", 20.0).set_ylabel("y", 20.0);
        ax.scatter(vec![1.0, 2.0], vec![3.0, 4.0]).label("pts").build().unwrap();
        ax.legend(LegendPosition::TopLeft);
        let mut canvas = SvgCanvas::new(432.0, 360.0);
        ax.draw(&mut canvas).unwrap();
        let svg = canvas.finish();
        assert!(svg.contains(">Panel</text>"));
        assert!(svg.contains("font-size=\"18\""));
        assert!(svg.contains("rotate(-90"));
        assert!(svg.contains(">pts</text>"));
    }
}
