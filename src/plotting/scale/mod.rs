//! Axis scaling and tick placement.

mod linear;

pub use linear::LinearScale;

use crate::plotting::error::PlotResult;

/// Trait for axis scale transformations.
pub trait Scale: std::fmt::Debug {
    /// Transform a data value to normalized coordinates (0.0 - 1.0).
    fn transform(&self, value: f64) -> f64;

    /// Set the data range for this scale.
    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()>;

    fn range(&self) -> (f64, f64);

    /// Major tick values inside the range.
    fn ticks(&self, num_ticks: usize) -> Vec<f64>;

    /// Minor tick values: `divisions - 1` ticks between neighbouring majors,
    /// extended one major interval past each end and clipped to the range.
    fn minor_ticks(&self, num_ticks: usize, divisions: usize) -> Vec<f64> {
        let majors = self.ticks(num_ticks);
        if majors.len() < 2 || divisions < 2 {
            return Vec::new();
        }
        let (min, max) = self.range();
        let step = majors[1] - majors[0];
        let minor_step = step / divisions as f64;
        if !(step.is_finite() && step > 0.0 && minor_step > 0.0) {
            return Vec::new();
        }
        let start = majors[0] - step;
        let count = ((max - start) / minor_step).ceil();
        if !count.is_finite() || count > MAX_TICKS as f64 {
            return Vec::new();
        }

        (0..=count as usize)
            .filter(|i| i % divisions != 0)
            .map(|i| start + i as f64 * minor_step)
            .filter(|v| *v >= min && *v <= max)
            .collect()
    }

    /// Clone the scale into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Scale>;
}

impl Clone for Box<dyn Scale> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Round a range to a "nice" number (1, 2, 5 times a power of ten).
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let steps: [(f64, f64); 3] = if round {
        [(1.5, 1.0), (3.0, 2.0), (7.0, 5.0)]
    } else {
        [(1.0, 1.0), (2.0, 2.0), (5.0, 5.0)]
    };
    let nice_fraction = steps
        .iter()
        .find(|(limit, _)| if round { fraction < *limit } else { fraction <= *limit })
        .map_or(10.0, |(_, nice)| *nice);

    nice_fraction * 10_f64.powf(exponent)
}

/// Upper bound on the number of ticks generated for one axis.
const MAX_TICKS: usize = 10_000;

/// Round `value` to a few digits below the decimal position of `spacing`,
/// so that accumulated error such as 0.30000000000000004 disappears at any
/// magnitude.
fn snap_to_spacing(value: f64, spacing: f64) -> f64 {
    let decimals = 3 - spacing.log10().floor() as i32;
    let scale = 10_f64.powi(decimals);
    let snapped = (value * scale).round() / scale;
    if snapped.is_finite() && scale.is_finite() && scale > 0.0 {
        snapped
    } else {
        value
    }
}

/// Generate nice tick positions within [min, max].
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    let midpoint = vec![min / 2.0 + max / 2.0];
    if num_ticks < 2 || !(max > min) {
        return midpoint;
    }

    let range = nice_number(max - min, false);
    let spacing = nice_number(range / (num_ticks - 1) as f64, true);
    if !(spacing.is_finite() && spacing > 0.0) {
        return midpoint;
    }
    let first = (min / spacing).ceil();
    let last = (max / spacing).floor();
    if !(first.is_finite() && last.is_finite()) || last < first || last - first > MAX_TICKS as f64 {
        return midpoint;
    }

    let mut ticks: Vec<f64> = Vec::new();
    for i in 0..=(last - first) as usize {
        let tick = snap_to_spacing((first + i as f64) * spacing, spacing);
        let tick = if tick == 0.0 { 0.0 } else { tick };
        if tick >= min && tick <= max && ticks.last() != Some(&tick) {
            ticks.push(tick);
        }
    }
    if ticks.is_empty() {
        return midpoint;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks_unit_range() {
        let ticks = nice_ticks(0.0, 1.0, 6);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_nice_ticks_inside_range() {
        let ticks = nice_ticks(-0.35, 6.6, 6);
        assert!(ticks.iter().all(|t| *t >= -0.35 && *t <= 6.6));
        assert_eq!(ticks.first().copied(), Some(0.0));
    }

    #[test]
    fn test_nice_ticks_tiny_range() {
        let ticks = nice_ticks(0.0, 5e-13, 6);
        assert_eq!(ticks.len(), 6);
        assert!(ticks.iter().all(|t| *t >= 0.0 && *t <= 5e-13));
        assert!(ticks.windows(2).all(|w| w[1] > w[0]));
        assert!((ticks[5] - 5e-13).abs() < 1e-25);
    }

    #[test]
    fn test_nice_ticks_extreme_magnitudes() {
        let tiny = nice_ticks(1e-300, 2e-300, 6);
        assert!(tiny.len() >= 2);
        assert!(tiny.iter().all(|t| *t >= 1e-300 && *t <= 2e-300));

        let huge = nice_ticks(1e300, 5e300, 6);
        assert!(huge.len() >= 2);
        assert!(huge.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_nice_ticks_range_below_float_resolution() {
        // Spacing far below the ulp of the bounds must not loop or panic.
        let ticks = nice_ticks(1e17, 1e17 + 64.0, 6);
        assert!(!ticks.is_empty());
    }

    #[test]
    fn test_minor_ticks_tiny_range() {
        let mut scale = LinearScale::auto();
        scale.set_range(0.0, 5e-13).unwrap();
        let minors = scale.minor_ticks(6, 5);
        assert!(!minors.is_empty());
        assert!(minors.iter().all(|m| *m > 0.0 && *m < 5e-13));
    }

    #[test]
    fn test_minor_ticks_between_majors() {
        let mut scale = LinearScale::auto();
        scale.set_range(0.0, 1.0).unwrap();
        let minors = scale.minor_ticks(6, 5);
        // Four minors between each of five major intervals.
        assert_eq!(minors.len(), 20);
        assert!(minors.iter().all(|m| (m * 25.0).round() % 5.0 != 0.0));
    }
}
