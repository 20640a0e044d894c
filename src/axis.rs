//! Axis layout: tick spacing, limit rounding and subtick selection.
//!
//! [`prepare_axis`] turns a finished set of per-axis parameters into an
//! immutable [`Axis`] descriptor and the [`Transform`] that goes with it.
//! All limits handed to it are in input space, i.e. already logarithms on a
//! log axis; [`AxisKind::to_input`] performs that conversion.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FontSpec;
use crate::error::{GraphError, GraphResult};
use crate::scale::{
    self, LinearTickIter, NormalSubsubtickIter, SpacingKind, Tick, TickIter, TickRange,
    UserSubsubtickIter,
};
use crate::transform::Transform;

/// Linear or base-10 logarithmic axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    #[default]
    Linear,
    Log10,
}

impl AxisKind {
    pub fn is_log(self) -> bool {
        self == AxisKind::Log10
    }

    /// Convert a true-space value to input space, or `None` if it has no
    /// place on this axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::AxisKind;
    ///
    /// assert_eq!(AxisKind::Log10.try_to_input(1000.0), Some(3.0));
    /// assert_eq!(AxisKind::Log10.try_to_input(0.0), None);
    /// assert_eq!(AxisKind::Linear.try_to_input(-2.0), Some(-2.0));
    /// ```
    pub fn try_to_input(self, value: f64) -> Option<f64> {
        match self {
            AxisKind::Linear => Some(value),
            AxisKind::Log10 if value > 0.0 => Some(value.log10()),
            AxisKind::Log10 => None,
        }
    }

    /// Like [`try_to_input`](Self::try_to_input), for an axis limit.
    ///
    /// # Errors
    ///
    /// [`GraphError::NonPositiveLogBound`] for a limit at or below zero on a
    /// log axis.
    pub fn to_input(self, axis: char, value: f64) -> GraphResult<f64> {
        self.try_to_input(value)
            .ok_or(GraphError::NonPositiveLogBound { axis, value })
    }

    /// Convert an input-space value back to true space.
    pub fn to_true(self, value: f64) -> f64 {
        match self {
            AxisKind::Linear => value,
            AxisKind::Log10 => 10f64.powf(value),
        }
    }
}

/// Unlabelled ticks between the labelled ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subticks {
    pub spacing: f64,
    pub range: TickRange,
}

/// Within-decade graduations of a log axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Subsubticks {
    #[default]
    None,
    /// `1..9 × 10^k` in every decade.
    Normal,
    /// Every multiple of a true-space spacing. Replaces the labelled ticks
    /// of the axis and is labelled itself.
    UserSpecified { spacing: f64 },
}

/// Everything [`prepare_axis`] needs to know about one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisParams {
    /// Lower limit in input space.
    pub min: f64,
    /// Upper limit in input space.
    pub max: f64,
    /// Inter-tick spacing fixed by the user. Ignored on a log axis.
    pub spacing: Option<f64>,
    /// True-space subsubtick spacing fixed by the user. Log axes only.
    pub subsubtick_spacing: Option<f64>,
    pub kind: AxisKind,
    pub round_to_next_tick: bool,
    pub reverse: bool,
    pub switch_axis_end: bool,
    pub omit_ticks: bool,
    pub label: Option<String>,
    pub font: FontSpec,
}

/// Layout of one axis of a graph.
///
/// Built once by [`prepare_axis`]. Only `labelled_ticks` and
/// `max_label_width` change afterwards, while the frame is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub kind: AxisKind,
    pub label: Option<String>,
    pub font: FontSpec,
    pub tick_spacing: f64,
    pub spacing_kind: SpacingKind,
    /// Labelled ticks sit at `count * tick_spacing`. Empty when the axis
    /// carries user-specified subsubticks instead.
    pub ticks: TickRange,
    pub subticks: Option<Subticks>,
    pub subsubticks: Subsubticks,
    pub switch_axis_end: bool,
    pub omit_ticks: bool,
    /// Where the other axis crosses this one, in this axis' input space.
    pub other_axis_loc: f64,
    /// The crossing used when the other axis is drawn at the far end.
    pub alt_other_axis_loc: f64,
    pub labelled_ticks: usize,
    pub max_label_width: f64,
}

impl Axis {
    pub fn is_log(&self) -> bool {
        self.kind.is_log()
    }

    /// The true-space subsubtick spacing, if the user fixed one.
    pub fn user_subsubtick_spacing(&self) -> Option<f64> {
        match self.subsubticks {
            Subsubticks::UserSpecified { spacing } => Some(spacing),
            _ => None,
        }
    }

    /// Labelled tick positions that fall on the axis.
    pub fn major_ticks(&self, transform: &Transform) -> TickIter<f64> {
        LinearTickIter::new(
            self.ticks,
            self.tick_spacing,
            transform.input_min,
            transform.input_max,
            Tick::<f64>::MAJOR,
        )
        .into()
    }

    /// Linear subtick positions that fall on the axis, if the axis has any.
    pub fn subtick_positions(&self, transform: &Transform) -> TickIter<f64> {
        match self.subticks {
            Some(Subticks { spacing, range }) => LinearTickIter::new(
                range,
                spacing,
                transform.input_min,
                transform.input_max,
                Tick::<f64>::SUB,
            )
            .into(),
            None => TickIter::empty(),
        }
    }

    /// Log subsubtick positions on the axis, normal or user-specified.
    pub fn subsubtick_positions(&self, transform: &Transform) -> GraphResult<TickIter<f64>> {
        Ok(match self.subsubticks {
            Subsubticks::None => TickIter::empty(),
            Subsubticks::Normal => {
                NormalSubsubtickIter::new(transform.input_min, transform.input_max).into()
            }
            Subsubticks::UserSpecified { spacing } => {
                UserSubsubtickIter::new(transform.input_min, transform.input_max, spacing)?.into()
            }
        })
    }
}

/// Lay out one axis.
///
/// Chooses the tick spacing (always automatic on a log axis), optionally
/// rounds the limits outward to the next tick, picks subtick and log
/// subsubtick spacing, and returns the axis together with its transform.
/// Identical limits are widened to the integers around them.
///
/// The transform's squeeze and output ranges are left at the unit interval
/// for the caller to fill in.
///
/// # Errors
///
/// - [`GraphError::MinExceedsMax`] when `min > max`.
/// - [`GraphError::BadTrialSpacing`] when a limit is NaN.
/// - [`GraphError::TickCountOverflow`] when the spacing is too fine for the range.
///
/// # Examples
///
/// ```
/// use grafaksel::{AxisKind, AxisParams, Subsubticks, prepare_axis};
///
/// let params = AxisParams {
///     min: 1f64.log10(),
///     max: 1000f64.log10(),
///     kind: AxisKind::Log10,
///     ..Default::default()
/// };
/// let (axis, transform) = prepare_axis(&params).unwrap();
/// assert_eq!((transform.input_min, transform.input_max), (0.0, 3.0));
/// assert_eq!(axis.tick_spacing, 1.0);
/// assert_eq!(axis.subsubticks, Subsubticks::Normal);
/// ```
pub fn prepare_axis(params: &AxisParams) -> GraphResult<(Axis, Transform)> {
    let (mut min, mut max) = (params.min, params.max);
    if min > max {
        return Err(GraphError::MinExceedsMax { min, max });
    }
    if min == max {
        max = (max + 1.0).floor();
        min = (min - 1.0).ceil();
    }

    let log_axis = params.kind.is_log();
    let user_subsubticks = if log_axis {
        params.subsubtick_spacing
    } else {
        None
    };

    let (tick_spacing, spacing_kind) = if log_axis {
        match scale::scale1(min, max)? {
            (spacing, _) if spacing <= 1.0 => (1.0, SpacingKind::One),
            chosen => chosen,
        }
    } else {
        match params.spacing.filter(|&s| s != 0.0) {
            Some(spacing) => (spacing, scale::spacing_type(spacing)),
            None => scale::scale1(min, max)?,
        }
    };

    let ticks = if params.round_to_next_tick {
        match user_subsubticks {
            Some(sss) => {
                (min, max) = scale::log::round_to_subsubticks(min, max, sss)?;
                TickRange::EMPTY
            }
            None => {
                let rounded = TickRange::rounded(min, max, tick_spacing)?;
                min = tick_spacing * rounded.min_count as f64;
                max = tick_spacing * rounded.max_count as f64;
                rounded
            }
        }
    } else if user_subsubticks.is_some() {
        TickRange::EMPTY
    } else {
        TickRange::inclusive(min, max, tick_spacing)?
    };

    let subtick_spacing =
        scale::linear::subtick_spacing(spacing_kind, tick_spacing, min, max, log_axis)?;
    let subtick_range = TickRange::inclusive(min, max, subtick_spacing)?;
    let subticks = (spacing_kind != SpacingKind::Unknown
        && subtick_range.span() <= scale::MAX_NUM_SUBTICKS)
        .then_some(Subticks {
            spacing: subtick_spacing,
            range: subtick_range,
        });

    let subsubticks = match user_subsubticks {
        Some(spacing) => Subsubticks::UserSpecified { spacing },
        None if log_axis && scale::log::has_normal_subsubticks(min, max) => Subsubticks::Normal,
        None => Subsubticks::None,
    };

    debug!(
        min,
        max,
        tick_spacing,
        ?spacing_kind,
        ?subticks,
        ?subsubticks,
        "prepared axis"
    );

    let transform = Transform::new(min, max, params.reverse);
    let axis = Axis {
        kind: params.kind,
        label: params.label.clone(),
        font: params.font.clone(),
        tick_spacing,
        spacing_kind,
        ticks,
        subticks,
        subsubticks,
        switch_axis_end: params.switch_axis_end,
        omit_ticks: params.omit_ticks,
        other_axis_loc: min,
        alt_other_axis_loc: max,
        labelled_ticks: 0,
        max_label_width: 0.0,
    };
    Ok((axis, transform))
}
