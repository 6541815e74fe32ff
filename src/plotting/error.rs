//! Error types for figure construction, labeling and export.

use std::fmt;
use std::io;

use crate::plotting::figure::AxesId;

/// The main error type for wackyplot operations.
#[derive(Debug)]
pub enum PlotError {
    /// Error during IO operations (file writing, etc.)
    Io(io::Error),
    /// A value that does not name one of the layout styles
    InvalidStyle(String),
    /// An operation that needs a figure ran before the layout was created
    NoFigure,
    /// An axes handle that is not part of the helper's layout
    ForeignAxes(AxesId),
    /// An axes handle that the figure does not own
    UnknownAxes(AxesId),
    /// Invalid data provided for plotting
    InvalidData(String),
    /// Invalid configuration or parameters
    InvalidConfig(String),
    /// Rendering error
    RenderError(String),
    /// Empty data provided where non-empty data is required
    EmptyData,
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::Io(err) => write!(f, "IO error: {}", err),
            PlotError::InvalidStyle(style) => write!(f, "Invalid style: {}", style),
            PlotError::NoFigure => write!(f, "No figure to save. Run get_fig_axes() first."),
            PlotError::ForeignAxes(id) => write!(f, "Invalid axes: {}", id),
            PlotError::UnknownAxes(id) => write!(f, "Axes {} does not belong to this figure", id),
            PlotError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            PlotError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PlotError::RenderError(msg) => write!(f, "Render error: {}", msg),
            PlotError::EmptyData => write!(f, "Empty data provided"),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        PlotError::Io(err)
    }
}

/// Result type alias for wackyplot operations.
pub type PlotResult<T> = Result<T, PlotError>;
