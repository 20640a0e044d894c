//! Tick spacing selection and tick enumeration.
//!
//! Everything in this module works in *input space*: the coordinate an axis
//! stores after any logarithm has been taken. On a log axis a tick at `2.0`
//! therefore stands for the true value `100`.
//!
//! - [`spacing`] picks a "nice" inter-tick distance from a range, or
//!   classifies one the user supplied.
//! - [`linear`] turns a spacing into integer tick-count bounds and walks them.
//! - [`log`] enumerates the within-decade subsubticks of a log axis.

pub mod linear;
pub mod log;
pub mod spacing;
pub mod tick_iter;
pub mod util;

pub use linear::{LinearTickIter, TickRange};
pub use log::{NormalSubsubtickIter, UserSubsubtickIter};
pub use spacing::{SpacingKind, scale1, spacing_type};
pub use tick_iter::TickIter;

/// Maximum number of linear subticks an axis may carry before they are dropped.
pub const MAX_NUM_SUBTICKS: i64 = 29;

/// Number of intervals the spacing selector aims to divide a range into.
pub const TRIAL_NUMBER_OF_TICK_INTERVALS: f64 = 5.0;

/// A log axis spanning more decades than this gets no 1..9 subsubticks.
pub const MAX_DECADES_WITH_LOG_SUBSUBTICKS: f64 = 5.0;

/// A single graduation on an axis.
///
/// `value` is in input space. `level` follows the usual convention: `0` for
/// labelled ticks, `1` for linear subticks and `2` for log subsubticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<D> {
    pub value: D,
    pub level: u8,
}

impl<D> Tick<D> {
    pub const MAJOR: u8 = 0;
    pub const SUB: u8 = 1;
    pub const SUBSUB: u8 = 2;

    pub const fn major(value: D) -> Self {
        Self {
            value,
            level: Self::MAJOR,
        }
    }

    pub const fn sub(value: D) -> Self {
        Self {
            value,
            level: Self::SUB,
        }
    }

    pub const fn subsub(value: D) -> Self {
        Self {
            value,
            level: Self::SUBSUB,
        }
    }
}
