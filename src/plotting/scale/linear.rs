//! Linear axis scale.

use super::{nice_ticks, Scale};
use crate::plotting::error::{PlotError, PlotResult};

/// Widen a degenerate range so that it can still be drawn.
fn expand_singular(value: f64) -> (f64, f64) {
    let pad = if value == 0.0 { 1.0 } else { value.abs() * 0.1 };
    (value - pad, value + pad)
}

/// Maps `[min, max]` onto `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
}

impl LinearScale {
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(PlotError::InvalidConfig(format!(
                "linear scale needs finite min < max, got [{}, {}]",
                min, max
            )));
        }
        Ok(LinearScale { min, max })
    }

    /// Placeholder range until data arrives.
    pub fn auto() -> Self {
        LinearScale { min: 0.0, max: 1.0 }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale::auto()
    }
}

impl Scale for LinearScale {
    fn transform(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Reversed bounds are swapped and equal bounds are widened.
    fn set_range(&mut self, min: f64, max: f64) -> PlotResult<()> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "non-finite scale range [{}, {}]",
                min, max
            )));
        }
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        (self.min, self.max) = if lo == hi { expand_singular(lo) } else { (lo, hi) };
        Ok(())
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn ticks(&self, num_ticks: usize) -> Vec<f64> {
        nice_ticks(self.min, self.max, num_ticks)
    }

    fn clone_box(&self) -> Box<dyn Scale> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_endpoints() {
        let scale = LinearScale::new(-2.0, 6.0).unwrap();
        assert_eq!(scale.transform(-2.0), 0.0);
        assert_eq!(scale.transform(6.0), 1.0);
        assert_eq!(scale.transform(2.0), 0.5);
    }

    #[test]
    fn test_new_rejects_bad_ranges() {
        assert!(LinearScale::new(1.0, 1.0).is_err());
        assert!(LinearScale::new(2.0, 1.0).is_err());
        assert!(LinearScale::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_set_range_widens_and_swaps() {
        let mut scale = LinearScale::auto();
        scale.set_range(0.0, 0.0).unwrap();
        assert_eq!(scale.range(), (-1.0, 1.0));
        scale.set_range(5.0, 5.0).unwrap();
        assert_eq!(scale.range(), (4.5, 5.5));
        scale.set_range(3.0, -1.0).unwrap();
        assert_eq!(scale.range(), (-1.0, 3.0));
        assert!(matches!(scale.set_range(f64::NAN, 1.0), Err(PlotError::InvalidData(_))));
    }
}
