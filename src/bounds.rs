//! Axis limits from user settings and the data.

use tracing::debug;

use crate::axis::AxisKind;
use crate::config::{AxisConfig, GraphConfig};
use crate::per_axis::PerAxis;
use crate::point::{ErrorBar, Point};
use crate::scale::util::sorted_pair;

/// Smallest interval holding every value seen so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn include(self, other: Extent) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Final true-space limits of one axis, before any logarithm is taken.
///
/// `min > max` is allowed and requests a reversed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
    pub round_to_next_tick: bool,
}

/// Values of a point along one axis: the coordinate, widened by its error
/// bar, dropped if it cannot be placed on an axis of `kind`.
fn point_extent(value: f64, errorbar: Option<ErrorBar>, kind: AxisKind) -> Option<Extent> {
    let extent = match errorbar {
        Some(bar) => {
            let (lo, hi) = sorted_pair(bar.min, bar.max);
            Extent::new(lo.min(value), hi.max(value))
        }
        None => Extent::new(value, value),
    };
    let usable = |v: f64| v.is_finite() && kind.try_to_input(v).is_some();
    (usable(extent.min) && usable(extent.max)).then_some(extent)
}

/// The user's window on one axis, for filtering points along the other.
fn window(axis: &AxisConfig) -> (f64, f64) {
    let (lo, hi) = (axis.min.unwrap_or(f64::NEG_INFINITY), axis.max.unwrap_or(f64::INFINITY));
    match (axis.min, axis.max) {
        (Some(_), Some(_)) => sorted_pair(lo, hi),
        _ => (lo, hi),
    }
}

/// Extent of the data along each user axis.
///
/// The x extent covers only points whose y lies within the user's y limits,
/// and the other way around. Error bars count. On a log axis, points with a
/// non-positive coordinate are ignored. `None` when no point qualifies.
///
/// # Examples
///
/// ```
/// use grafaksel::{GraphConfig, Point, data_extent};
///
/// let points = [Point::new(1.0, 5.0), Point::new(3.0, -2.0).with_y_errorbar(-4.0, 0.0)];
/// let extent = data_extent(&points, &GraphConfig::default());
/// let y = extent.y.unwrap();
/// assert_eq!((y.min, y.max), (-4.0, 5.0));
/// ```
pub fn data_extent(points: &[Point], config: &GraphConfig) -> PerAxis<Option<Extent>> {
    let kind = |axis: &AxisConfig| if axis.log { AxisKind::Log10 } else { AxisKind::Linear };
    let kinds = PerAxis::new(kind(&config.x), kind(&config.y));
    let (x_lo, x_hi) = window(&config.x);
    let (y_lo, y_hi) = window(&config.y);

    let mut extent: PerAxis<Option<Extent>> = PerAxis::default();
    for p in points {
        if p.y >= y_lo && p.y <= y_hi {
            if let Some(e) = point_extent(p.x, p.x_errorbar, kinds.x) {
                extent.x = Some(extent.x.map_or(e, |acc| acc.include(e)));
            }
        }
        if p.x >= x_lo && p.x <= x_hi {
            if let Some(e) = point_extent(p.y, p.y_errorbar, kinds.y) {
                extent.y = Some(extent.y.map_or(e, |acc| acc.include(e)));
            }
        }
    }
    extent
}

/// Fill in the limits the user left unset.
///
/// Unset limits come from [`data_extent`]. Without usable data they are `0`,
/// or `1` on a log axis; layout then widens the empty range.
/// An axis with neither limit set always rounds to the next tick.
///
/// # Examples
///
/// ```
/// use grafaksel::{AxisConfig, GraphConfig, Point, resolve_limits};
///
/// let config = GraphConfig {
///     y: AxisConfig { min: Some(0.0), ..Default::default() },
///     ..Default::default()
/// };
/// let points = [Point::new(0.5, 2.0), Point::new(9.5, 7.0)];
/// let limits = resolve_limits(&points, &config);
///
/// assert_eq!((limits.x.min, limits.x.max), (0.5, 9.5));
/// assert!(limits.x.round_to_next_tick);
/// assert_eq!((limits.y.min, limits.y.max), (0.0, 7.0));
/// assert!(!limits.y.round_to_next_tick);
/// ```
pub fn resolve_limits(points: &[Point], config: &GraphConfig) -> PerAxis<AxisLimits> {
    let extent = data_extent(points, config);
    let resolve = |axis: &AxisConfig, extent: Option<Extent>| {
        // 10^0 on a log axis, so it lands on 0 in input space either way
        let fallback = if axis.log { 1.0 } else { 0.0 };
        AxisLimits {
            min: axis.min.or(extent.map(|e| e.min)).unwrap_or(fallback),
            max: axis.max.or(extent.map(|e| e.max)).unwrap_or(fallback),
            round_to_next_tick: axis.round_to_next_tick || (axis.min.is_none() && axis.max.is_none()),
        }
    };
    let limits = PerAxis::new(resolve(&config.x, extent.x), resolve(&config.y, extent.y));
    debug!(?limits, points = points.len(), "resolved axis limits");
    limits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_y() -> GraphConfig {
        GraphConfig {
            y: AxisConfig {
                log: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_extent_includes_errorbars() {
        let points = [
            Point::new(2.0, 1.0).with_x_errorbar(3.0, -1.0),
            Point::new(4.0, 2.0),
        ];
        let extent = data_extent(&points, &GraphConfig::default());
        assert_eq!(extent.x, Some(Extent::new(-1.0, 4.0)));
        assert_eq!(extent.y, Some(Extent::new(1.0, 2.0)));
    }

    #[test]
    fn test_log_axis_skips_non_positive() {
        let points = [Point::new(0.0, -1.0), Point::new(1.0, 10.0), Point::new(2.0, 1000.0)];
        let extent = data_extent(&points, &log_y());
        assert_eq!(extent.y, Some(Extent::new(10.0, 1000.0)));
        // the x axis is linear and keeps every point
        assert_eq!(extent.x, Some(Extent::new(0.0, 2.0)));
    }

    #[test]
    fn test_user_window_filters_other_axis() {
        let config = GraphConfig {
            x: AxisConfig {
                min: Some(0.0),
                max: Some(10.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let points = [Point::new(5.0, 1.0), Point::new(50.0, 100.0), Point::new(7.0, 3.0)];
        let limits = resolve_limits(&points, &config);
        assert_eq!((limits.y.min, limits.y.max), (1.0, 3.0));
        assert!(limits.y.round_to_next_tick);
        assert_eq!((limits.x.min, limits.x.max), (0.0, 10.0));
        assert!(!limits.x.round_to_next_tick);
    }

    #[test]
    fn test_reversed_user_window_still_filters() {
        let config = GraphConfig {
            x: AxisConfig {
                min: Some(10.0),
                max: Some(0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let points = [Point::new(5.0, 1.0), Point::new(-5.0, 9.0)];
        let extent = data_extent(&points, &config);
        assert_eq!(extent.y, Some(Extent::new(1.0, 1.0)));
    }

    #[test]
    fn test_no_data_falls_back_to_zero() {
        let limits = resolve_limits(&[], &GraphConfig::default());
        assert_eq!((limits.x.min, limits.x.max), (0.0, 0.0));
        assert!(limits.x.round_to_next_tick);
    }

    #[test]
    fn test_log_axis_without_data_falls_back_to_one() {
        let points = [Point::new(1.0, -3.0), Point::new(2.0, 0.0)];
        for points in [&points[..], &[]] {
            let limits = resolve_limits(points, &log_y());
            assert_eq!((limits.y.min, limits.y.max), (1.0, 1.0));
        }
    }

    #[test]
    fn test_non_finite_points_ignored() {
        let points = [Point::new(f64::NAN, 1.0), Point::new(1.0, f64::INFINITY), Point::new(2.0, 2.0)];
        let extent = data_extent(&points, &GraphConfig::default());
        assert_eq!(extent.x, Some(Extent::new(1.0, 2.0)));
        // a NaN x also keeps the point out of the y extent
        assert_eq!(extent.y, Some(Extent::new(2.0, 2.0)));
    }
}
