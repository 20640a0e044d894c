use num_traits::Float;
use serde::{Deserialize, Serialize};

use super::{TRIAL_NUMBER_OF_TICK_INTERVALS, util};
use crate::error::{GraphError, GraphResult};

/// Which "nice" family a tick spacing belongs to.
///
/// The family decides how a tick interval is split into subticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpacingKind {
    /// 1 × 10ⁿ
    One,
    /// 2 × 10ⁿ
    Two,
    /// 5 × 10ⁿ
    Five,
    /// 2.5 × 10ⁿ (only reachable from a user-supplied spacing)
    TwoFive,
    /// Anything else. Disables linear subticks.
    Unknown,
}

/// Nice inter-tick intervals, as multiples of a power of ten.
const INTERVALS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Mantissa breakpoints between consecutive entries of [`INTERVALS`].
///
/// These sit slightly below the geometric means so that a range of 1.5
/// gets ticks every 0.5, not every 0.2.
const BREAKPOINTS: [f64; 3] = [std::f64::consts::SQRT_2, 3.16228, 7.07107];

/// Choose a tick spacing for the range `[min, max]` (ACM Algorithm 463, SCALE1).
///
/// The range is split into five trial intervals, and the trial width is
/// rounded to 1, 2, 5 or 10 times a power of ten. The result carries the
/// sign of `max - min`. On a log axis the arguments are already logarithms,
/// so the result is an inter-tick *factor* in decades.
///
/// # Errors
///
/// Returns [`GraphError::BadTrialSpacing`] when the trial spacing is not
/// positive, i.e. when `min == max` or either bound is not finite.
///
/// # Examples
///
/// ```
/// use grafaksel::scale::{SpacingKind, scale1};
///
/// let (spacing, kind) = scale1(0.0, 47.0).unwrap();
/// assert_eq!(spacing, 10.0);
/// assert_eq!(kind, SpacingKind::One);
///
/// let (spacing, kind) = scale1(0.0f32, 1.0).unwrap();
/// assert!((spacing - 0.2).abs() < 1e-6);
/// assert_eq!(kind, SpacingKind::Two);
/// ```
pub fn scale1<D: Float>(min: D, max: D) -> GraphResult<(D, SpacingKind)> {
    let sign = if max > min { D::one() } else { -D::one() };
    let trial = (max - min) / util::lit(TRIAL_NUMBER_OF_TICK_INTERVALS) * sign;

    // NaN lands here too, since it compares false against zero.
    if !(trial > D::zero()) {
        return Err(GraphError::BadTrialSpacing(trial.to_f64().unwrap_or(f64::NAN)));
    }

    let exponent = trial.log10().floor();
    let ten = util::lit::<D>(10.0);
    let mantissa = trial * ten.powf(-exponent);

    let k = BREAKPOINTS
        .iter()
        .position(|&bp| mantissa < util::lit(bp))
        .unwrap_or(BREAKPOINTS.len());

    let spacing = sign * util::lit::<D>(INTERVALS[k]) * ten.powf(exponent);
    let kind = match k {
        1 => SpacingKind::Two,
        2 => SpacingKind::Five,
        _ => SpacingKind::One,
    };
    Ok((spacing, kind))
}

/// Classify a user-supplied spacing as 1, 2, 2.5 or 5 times a power of ten.
///
/// The comparison is tolerant to `FUZZ` relative to the power of ten, so
/// `0.30000000000000004`-style noise does not matter. Non-positive or
/// non-finite spacings are [`SpacingKind::Unknown`].
///
/// # Examples
///
/// ```
/// use grafaksel::scale::{SpacingKind, spacing_type};
///
/// assert_eq!(spacing_type(0.25), SpacingKind::TwoFive);
/// assert_eq!(spacing_type(500.0), SpacingKind::Five);
/// assert_eq!(spacing_type(3.0), SpacingKind::Unknown);
/// ```
pub fn spacing_type<D: Float>(incr: D) -> SpacingKind {
    if !(incr > D::zero()) || !incr.is_finite() {
        return SpacingKind::Unknown;
    }

    let power = incr.log10().floor();
    let ten = util::lit::<D>(10.0);
    let steps = power.abs().to_u32().unwrap_or(0);
    let mut tenpower = D::one();
    for _ in 0..steps {
        tenpower = tenpower * ten;
    }
    if power < D::zero() {
        tenpower = D::one() / tenpower;
    }

    let candidates = [
        (1.0, SpacingKind::One),
        (2.0, SpacingKind::Two),
        (2.5, SpacingKind::TwoFive),
        (5.0, SpacingKind::Five),
    ];
    candidates
        .into_iter()
        .find(|&(factor, _)| util::near_equality(incr, util::lit::<D>(factor) * tenpower, tenpower))
        .map_or(SpacingKind::Unknown, |(_, kind)| kind)
}
