//! Consistent scientific figures in three fixed layouts.
//!
//! [`PlotHelper`] builds a 1x1, 2x1 or 2x2 figure, sizes every title, label
//! and tick label from a per-style font table, places an optional inset and
//! writes PDF and EPS files. Drawing is done by the bundled [`plotting`]
//! engine.

pub mod config;
pub mod convert;
pub mod font_size;
pub mod helper;
pub mod plot_style;
pub mod plotting;

pub use config::{ExportOptions, HelperConfig};
pub use convert::ConversionStatus;
pub use font_size::{FontRole, FontTable};
pub use helper::PlotHelper;
pub use plot_style::PlotStyle;
pub use plotting::{AxesId, PlotError, PlotResult};
