//! Error types for axis layout and graph setup.

use thiserror::Error;

/// Convenience alias for results carrying a [`GraphError`].
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while laying out axes or preparing a graph.
///
/// The layout engine never retries. A returned error means an upstream
/// precondition was broken and the graph cannot be drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Axis preparation was handed an unsorted range.
    #[error("axis lower limit {min} exceeds upper limit {max}")]
    MinExceedsMax { min: f64, max: f64 },

    /// The tick-spacing selector computed a trial spacing that is not positive.
    #[error("bad trial inter-tick spacing {0}")]
    BadTrialSpacing(f64),

    /// A logarithmic axis was given a limit that has no logarithm.
    #[error("{axis} limit {value} is not positive and cannot be placed on a log axis")]
    NonPositiveLogBound { axis: char, value: f64 },

    /// A user-supplied tick spacing of zero.
    #[error("the {0} axis tick spacing must not be zero")]
    ZeroSpacing(char),

    /// A limit or spacing was NaN or infinite.
    #[error("{what} for the {axis} axis is not a finite number")]
    NonFinite { axis: char, what: &'static str },

    /// Tick counts do not fit an integer; the spacing is far too fine for the range.
    #[error("tick count {0} is out of range for the chosen spacing")]
    TickCountOverflow(f64),

    /// One `n=color` entry of a pen string could not be applied.
    #[error("invalid pen specification `{0}`")]
    InvalidPenEntry(String),

    /// A legend position letter other than `l`, `c` or `r`.
    #[error("unknown legend position `{0}`")]
    InvalidLegendPosition(char),
}
