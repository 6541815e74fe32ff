//! Figure layout styles.
//!
//! A style fixes the panel grid and the physical size of a figure. It is
//! chosen once per figure and drives every font size lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plotting::error::{PlotError, PlotResult};

/// The three supported panel arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotStyle {
    /// A single panel.
    #[serde(rename = "1x1")]
    OneByOne,
    /// Two panels side by side.
    #[serde(rename = "2x1")]
    TwoByOne,
    /// A two-by-two grid of panels.
    #[serde(rename = "2x2")]
    TwoByTwo,
}

impl PlotStyle {
    pub const ALL: [PlotStyle; 3] = [PlotStyle::OneByOne, PlotStyle::TwoByOne, PlotStyle::TwoByTwo];

    /// Numeric code of the style (1, 2 or 3).
    pub fn code(&self) -> u8 {
        match self {
            PlotStyle::OneByOne => 1,
            PlotStyle::TwoByOne => 2,
            PlotStyle::TwoByTwo => 3,
        }
    }

    /// Resolve a numeric style code.
    pub fn from_code(code: i64) -> PlotResult<Self> {
        match code {
            1 => Ok(PlotStyle::OneByOne),
            2 => Ok(PlotStyle::TwoByOne),
            3 => Ok(PlotStyle::TwoByTwo),
            other => Err(PlotError::InvalidStyle(other.to_string())),
        }
    }

    /// Subplot grid as (rows, cols).
    pub fn grid(&self) -> (usize, usize) {
        match self {
            PlotStyle::OneByOne => (1, 1),
            PlotStyle::TwoByOne => (1, 2),
            PlotStyle::TwoByTwo => (2, 2),
        }
    }

    /// Figure size in inches as (width, height).
    pub fn figsize(&self) -> (f64, f64) {
        match self {
            PlotStyle::OneByOne => (6.0, 5.0),
            PlotStyle::TwoByOne => (8.0, 4.0),
            PlotStyle::TwoByTwo => (6.0, 5.0),
        }
    }

    /// Number of panels in the layout.
    pub fn panel_count(&self) -> usize {
        let (rows, cols) = self.grid();
        rows * cols
    }

    pub(crate) fn index(&self) -> usize {
        self.code() as usize - 1
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlotStyle::OneByOne => "1x1",
            PlotStyle::TwoByOne => "2x1",
            PlotStyle::TwoByTwo => "2x2",
        };
        f.write_str(name)
    }
}

impl FromStr for PlotStyle {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "1" | "1x1" | "one-by-one" => Ok(PlotStyle::OneByOne),
            "2" | "2x1" | "two-by-one" => Ok(PlotStyle::TwoByOne),
            "3" | "2x2" | "two-by-two" => Ok(PlotStyle::TwoByTwo),
            _ => Err(PlotError::InvalidStyle(s.to_string())),
        }
    }
}

impl TryFrom<i64> for PlotStyle {
    type Error = PlotError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        PlotStyle::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for style in PlotStyle::ALL {
            assert_eq!(PlotStyle::from_code(style.code() as i64).unwrap(), style);
        }
    }

    #[test]
    fn test_invalid_codes_rejected() {
        for code in [0, 4, -1, 100] {
            match PlotStyle::try_from(code) {
                Err(PlotError::InvalidStyle(v)) => assert_eq!(v, code.to_string()),
                other => panic!("expected InvalidStyle, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("1x1".parse::<PlotStyle>().unwrap(), PlotStyle::OneByOne);
        assert_eq!("TWO_BY_ONE".parse::<PlotStyle>().unwrap(), PlotStyle::TwoByOne);
        assert_eq!(" two-by-two ".parse::<PlotStyle>().unwrap(), PlotStyle::TwoByTwo);
        assert!("3x3".parse::<PlotStyle>().is_err());
    }

    #[test]
    fn test_layout_dimensions() {
        assert_eq!(PlotStyle::OneByOne.grid(), (1, 1));
        assert_eq!(PlotStyle::TwoByOne.grid(), (1, 2));
        assert_eq!(PlotStyle::TwoByTwo.panel_count(), 4);
        assert_eq!(PlotStyle::TwoByOne.figsize(), (8.0, 4.0));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PlotStyle::TwoByTwo).unwrap();
        assert_eq!(json, "\"2x2\"");
        let parsed: PlotStyle = serde_json::from_str("\"2x1\"").unwrap();
        assert_eq!(parsed, PlotStyle::TwoByOne);
    }
}
