//! Minimal plotting engine
//! Provides a matplotlib-like figure/axes API with SVG, PDF and EPS output.

pub mod axes;
pub mod backend;
pub mod data;
pub mod element;
pub mod error;
pub mod figure;
pub mod plot;
pub mod scale;
pub mod style;

pub use axes::Axes;
pub use backend::{Canvas, EpsCanvas, PdfCanvas, SvgCanvas};
pub use data::IntoPlotData;
pub use element::{AxisSelect, Bounds, TickDirection, TickParams, TickWhich};
pub use error::{PlotError, PlotResult};
pub use figure::{AxesId, Figure};
pub use plot::{LinePlot, Plot, ScatterPlot};
pub use scale::{LinearScale, Scale};
pub use style::{Color, DashPattern, FillStyle, LineStyle, Marker, MarkerStyle, TextStyle, Theme, ThemeConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::plotting::axes::Axes;
    pub use crate::plotting::data::IntoPlotData;
    pub use crate::plotting::element::{AxisSelect, Bounds, LegendPosition, TickParams, TickWhich};
    pub use crate::plotting::error::{PlotError, PlotResult};
    pub use crate::plotting::figure::{AxesId, Figure};
    pub use crate::plotting::style::{Color, DashPattern, LineStyle, Marker, TextStyle, Theme};
}
