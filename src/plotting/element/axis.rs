//! Axis and tick configuration.

use crate::plotting::style::{LineStyle, TextStyle, ThemeConfig};

/// Which side of the spine tick marks point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickDirection {
    #[default]
    Out,
    In,
}

/// Major ticks, minor ticks, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickWhich {
    #[default]
    Major,
    Minor,
    Both,
}

/// The x axis, the y axis, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisSelect {
    X,
    Y,
    #[default]
    Both,
}

/// Settings for one tick level (major or minor) of one axis.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Whether tick marks are drawn
    pub visible: bool,
    /// Length of tick marks in points
    pub length: f64,
    pub direction: TickDirection,
    /// Whether tick labels are drawn
    pub label_visible: bool,
    pub label_style: TextStyle,
}

impl TickConfig {
    fn major(label_style: TextStyle, direction: TickDirection) -> Self {
        TickConfig {
            visible: true,
            length: 3.5,
            direction,
            label_visible: true,
            label_style,
        }
    }

    fn minor(label_style: TextStyle, direction: TickDirection, visible: bool) -> Self {
        TickConfig {
            visible,
            length: 2.0,
            direction,
            label_visible: false,
            label_style,
        }
    }

    /// How far the tick protrudes outside the axes area.
    pub fn outward_extent(&self) -> f64 {
        match (self.visible, self.direction) {
            (true, TickDirection::Out) => self.length,
            _ => 0.0,
        }
    }
}

/// Tick parameter update, applied with `Axes::tick_params`.
///
/// Unset fields leave the current value untouched.
#[derive(Debug, Clone, Default)]
pub struct TickParams {
    pub axis: AxisSelect,
    pub which: TickWhich,
    pub label_size: Option<f64>,
    pub labels_visible: Option<bool>,
    pub direction: Option<TickDirection>,
    pub length: Option<f64>,
}

impl TickParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, axis: AxisSelect) -> Self {
        self.axis = axis;
        self
    }

    pub fn which(mut self, which: TickWhich) -> Self {
        self.which = which;
        self
    }

    pub fn label_size(mut self, size: f64) -> Self {
        self.label_size = Some(size);
        self
    }

    pub fn labels_visible(mut self, visible: bool) -> Self {
        self.labels_visible = Some(visible);
        self
    }

    pub fn direction(mut self, direction: TickDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    fn apply_to(&self, tick: &mut TickConfig) {
        if let Some(size) = self.label_size {
            tick.label_style.font_size = size;
        }
        if let Some(visible) = self.labels_visible {
            tick.label_visible = visible;
        }
        if let Some(direction) = self.direction {
            tick.direction = direction;
        }
        if let Some(length) = self.length {
            tick.length = length;
        }
    }
}

/// Configuration for an axis.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    /// Whether the axis spine and ticks are drawn
    pub visible: bool,
    pub line_style: LineStyle,
    pub major: TickConfig,
    pub minor: TickConfig,
    /// Approximate number of major ticks to generate
    pub num_ticks: usize,
    /// Minor intervals per major interval
    pub minor_divisions: usize,
    /// Padding between tick marks and labels
    pub tick_padding: f64,
    /// Also draw ticks on the opposite spine
    pub mirror: bool,
    /// Custom major tick positions (overrides automatic generation)
    pub tick_positions: Option<Vec<f64>>,
    /// Custom tick labels (must match tick_positions length)
    pub tick_labels: Option<Vec<String>>,
}

impl AxisConfig {
    /// Axis defaults derived from a theme.
    pub fn themed(theme: &ThemeConfig) -> Self {
        let label_style = TextStyle::new()
            .font_family(theme.font_family.clone())
            .font_size(theme.tick_label_size)
            .color(theme.text_color.clone());
        AxisConfig {
            visible: true,
            line_style: LineStyle::new().color(theme.axis_color.clone()).width(theme.axis_width),
            major: TickConfig::major(label_style.clone(), theme.tick_direction),
            minor: TickConfig::minor(label_style, theme.tick_direction, theme.minor_ticks),
            num_ticks: 6,
            minor_divisions: 5,
            tick_padding: 3.5,
            mirror: theme.mirror_ticks,
            tick_positions: None,
            tick_labels: None,
        }
    }

    /// Apply a tick parameter update to the selected tick levels.
    pub fn apply(&mut self, params: &TickParams) {
        if matches!(params.which, TickWhich::Major | TickWhich::Both) {
            params.apply_to(&mut self.major);
        }
        if matches!(params.which, TickWhich::Minor | TickWhich::Both) {
            params.apply_to(&mut self.minor);
        }
    }

    /// Whether any tick label of this axis would be drawn.
    pub fn any_labels_visible(&self) -> bool {
        self.visible && (self.major.label_visible || (self.minor.visible && self.minor.label_visible))
    }

    /// Format a tick value as a label.
    pub fn format_tick(&self, value: f64) -> String {
        if value == 0.0 {
            "0".to_string()
        } else if value.abs() >= 1e5 || value.abs() < 1e-3 {
            format!("{:.1e}", value)
        } else if value.fract().abs() < 1e-9 {
            format!("{:.0}", value)
        } else {
            let text = format!("{:.3}", value);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig::themed(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_both_levels() {
        let mut axis = AxisConfig::default();
        axis.apply(&TickParams::new().which(TickWhich::Both).label_size(14.0));
        assert_eq!(axis.major.label_style.font_size, 14.0);
        assert_eq!(axis.minor.label_style.font_size, 14.0);
    }

    #[test]
    fn test_apply_major_only() {
        let mut axis = AxisConfig::default();
        axis.apply(&TickParams::new().labels_visible(false));
        assert!(!axis.major.label_visible);
        assert_eq!(axis.minor.label_style.font_size, 10.0);
    }

    #[test]
    fn test_format_tick() {
        let axis = AxisConfig::default();
        assert_eq!(axis.format_tick(0.0), "0");
        assert_eq!(axis.format_tick(2.0), "2");
        assert_eq!(axis.format_tick(0.25), "0.25");
        assert_eq!(axis.format_tick(-1.5), "-1.5");
        assert_eq!(axis.format_tick(250000.0), "2.5e5");
    }
}
