use num_traits::Float;

use crate::error::{GraphError, GraphResult};

/// Relative tolerance used for every boundary comparison on an axis.
pub const FUZZ: f64 = 0.000001;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Lift an `f64` constant into the float type `D`.
pub(crate) fn lit<D: Float>(value: f64) -> D {
    D::from(value).unwrap_or_else(D::nan)
}

/// `FUZZ` scaled by `scale`, in the float type `D`.
pub fn fuzz<D: Float>(scale: D) -> D {
    lit::<D>(FUZZ) * scale.abs()
}

/// True when `a` and `b` agree to within `FUZZ` relative to `scale`.
///
/// # Examples
///
/// ```
/// use grafaksel::scale::util::near_equality;
///
/// assert!(near_equality(2.5, 2.5000001, 1.0));
/// assert!(!near_equality(2.5, 2.51, 1.0));
/// ```
pub fn near_equality<D: Float>(a: D, b: D, scale: D) -> bool {
    (a - b).abs() < fuzz(scale)
}

/// Convert a floored or ceiled tick quotient to an integer count.
pub(crate) fn to_count<D: Float>(value: D) -> GraphResult<i64> {
    value
        .to_i64()
        .ok_or_else(|| GraphError::TickCountOverflow(value.to_f64().unwrap_or(f64::NAN)))
}

/// An integer count as the float type `D`.
pub(crate) fn from_count<D: Float>(count: i64) -> D {
    D::from(count).unwrap_or_else(D::nan)
}
