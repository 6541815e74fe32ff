//! Font sizes per layout style.
//!
//! Sizes are in points and keyed by (style, role). Larger layouts shrink
//! the text so that every panel keeps a readable label-to-data ratio.

use serde::Serialize;

use crate::plot_style::PlotStyle;
use crate::plotting::error::PlotResult;

/// Tick label size for inset axes, independent of the style.
pub const TICK_INSET_SIZE: u32 = 10;

/// The semantic role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Figure-wide labels and the figure title.
    CommonLabel,
    /// Per-axes x and y labels.
    AxesLabel,
    /// Per-axes titles.
    AxesTitle,
    /// Tick labels.
    Tick,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::CommonLabel,
        FontRole::AxesLabel,
        FontRole::AxesTitle,
        FontRole::Tick,
    ];

    fn index(&self) -> usize {
        match self {
            FontRole::CommonLabel => 0,
            FontRole::AxesLabel => 1,
            FontRole::AxesTitle => 2,
            FontRole::Tick => 3,
        }
    }
}

// Rows follow style code order (1x1, 2x1, 2x2), columns follow FontRole.
const FONT_SIZE_TABLE: [[u32; 4]; 3] = [
    [22, 22, 18, 14],
    [20, 20, 18, 14],
    [18, 18, 18, 12],
];

/// Look up the font size for a role in a style.
pub fn font_size(style: PlotStyle, role: FontRole) -> u32 {
    FONT_SIZE_TABLE[style.index()][role.index()]
}

/// Look up a font size from a raw style code.
pub fn font_size_for_code(code: i64, role: FontRole) -> PlotResult<u32> {
    let style = PlotStyle::from_code(code)?;
    Ok(font_size(style, role))
}

pub fn common_label_size(style: PlotStyle) -> u32 {
    font_size(style, FontRole::CommonLabel)
}

pub fn axes_label_size(style: PlotStyle) -> u32 {
    font_size(style, FontRole::AxesLabel)
}

pub fn axes_title_size(style: PlotStyle) -> u32 {
    font_size(style, FontRole::AxesTitle)
}

pub fn tick_size(style: PlotStyle) -> u32 {
    font_size(style, FontRole::Tick)
}

pub fn tick_inset_size() -> u32 {
    TICK_INSET_SIZE
}

/// All sizes of one style, as printed by the `sizes` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontTable {
    pub style: PlotStyle,
    pub common_label: u32,
    pub axes_label: u32,
    pub axes_title: u32,
    pub tick: u32,
    pub tick_inset: u32,
}

impl FontTable {
    pub fn for_style(style: PlotStyle) -> Self {
        FontTable {
            style,
            common_label: common_label_size(style),
            axes_label: axes_label_size(style),
            axes_title: axes_title_size(style),
            tick: tick_size(style),
            tick_inset: tick_inset_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::error::PlotError;

    #[test]
    fn test_common_label_sizes() {
        assert_eq!(common_label_size(PlotStyle::OneByOne), 22);
        assert_eq!(common_label_size(PlotStyle::TwoByOne), 20);
        assert_eq!(common_label_size(PlotStyle::TwoByTwo), 18);
    }

    #[test]
    fn test_axes_label_sizes_match_common() {
        for style in PlotStyle::ALL {
            assert_eq!(axes_label_size(style), common_label_size(style));
        }
    }

    #[test]
    fn test_axes_title_is_constant() {
        for style in PlotStyle::ALL {
            assert_eq!(axes_title_size(style), 18);
        }
    }

    #[test]
    fn test_tick_sizes() {
        assert_eq!(tick_size(PlotStyle::OneByOne), 14);
        assert_eq!(tick_size(PlotStyle::TwoByOne), 14);
        assert_eq!(tick_size(PlotStyle::TwoByTwo), 12);
        assert_eq!(tick_inset_size(), 10);
    }

    #[test]
    fn test_raw_code_lookup() {
        assert_eq!(font_size_for_code(3, FontRole::Tick).unwrap(), 12);
        for role in FontRole::ALL {
            assert!(matches!(
                font_size_for_code(0, role),
                Err(PlotError::InvalidStyle(_))
            ));
            assert!(matches!(
                font_size_for_code(4, role),
                Err(PlotError::InvalidStyle(_))
            ));
        }
    }

    #[test]
    fn test_font_table_json() {
        let table = FontTable::for_style(PlotStyle::TwoByOne);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["style"], "2x1");
        assert_eq!(json["common_label"], 20);
        assert_eq!(json["tick_inset"], 10);
    }
}
