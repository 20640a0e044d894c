//! Cohen-Sutherland clipping against the plot box, in input space.

use bitflags::bitflags;

use crate::per_axis::PerAxis;
use crate::scale::util;
use crate::transform::{PlotPoint, Transform};

bitflags! {
    /// Position of a point relative to the plot box.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Outcode: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const RIGHT = 1 << 2;
        const LEFT = 1 << 3;
    }
}

/// Classify `(x, y)` against the input ranges of both axes.
///
/// The box edge is blurred by `FUZZ` times each axis range. A tolerant test
/// counts points in that band as inside; an intolerant one counts them as
/// outside.
///
/// # Examples
///
/// ```
/// use grafaksel::{Outcode, PerAxis, PlotPoint, Transform, compute_outcode};
///
/// let bounds = PerAxis::new(Transform::new(0.0, 1.0, false), Transform::new(0.0, 1.0, false));
/// assert_eq!(compute_outcode(&bounds, PlotPoint::new(0.5, 0.5), true), Outcode::empty());
/// assert_eq!(compute_outcode(&bounds, PlotPoint::new(2.0, -1.0), true), Outcode::RIGHT | Outcode::BOTTOM);
///
/// // On the edge: inside when tolerant, outside when not
/// let edge = PlotPoint::new(1.0, 0.5);
/// assert!(compute_outcode(&bounds, edge, true).is_empty());
/// assert_eq!(compute_outcode(&bounds, edge, false), Outcode::RIGHT);
/// ```
pub fn compute_outcode(bounds: &PerAxis<Transform>, p: PlotPoint, tolerant: bool) -> Outcode {
    let sign = if tolerant { 1.0 } else { -1.0 };
    let xfuzz = sign * util::FUZZ * bounds.x.input_range;
    let yfuzz = sign * util::FUZZ * bounds.y.input_range;

    let mut code = Outcode::empty();
    if p.x > bounds.x.input_max + xfuzz {
        code |= Outcode::RIGHT;
    } else if p.x < bounds.x.input_min - xfuzz {
        code |= Outcode::LEFT;
    }
    if p.y > bounds.y.input_max + yfuzz {
        code |= Outcode::TOP;
    } else if p.y < bounds.y.input_min - yfuzz {
        code |= Outcode::BOTTOM;
    }
    code
}

/// Result of clipping one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    /// No part of the segment is inside the box.
    Rejected,
    /// The visible part, and whether each end had to be moved to get it.
    Accepted {
        start: PlotPoint,
        end: PlotPoint,
        clipped_start: bool,
        clipped_end: bool,
    },
}

impl Clip {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Clip::Accepted { .. })
    }
}

/// Clip the segment `start → end` to the plot box.
///
/// Outside endpoints are moved onto the box edge one at a time, testing
/// right, left, top and bottom in that order, until both are inside or
/// both share an outside half-plane. Points within the fuzz band of an edge
/// count as inside.
///
/// # Examples
///
/// ```
/// use grafaksel::{Clip, PerAxis, PlotPoint, Transform, clip_line};
///
/// let bounds = PerAxis::new(Transform::new(0.0, 10.0, false), Transform::new(0.0, 10.0, false));
///
/// let clip = clip_line(&bounds, PlotPoint::new(5.0, 5.0), PlotPoint::new(15.0, 5.0));
/// assert_eq!(
///     clip,
///     Clip::Accepted {
///         start: PlotPoint::new(5.0, 5.0),
///         end: PlotPoint::new(10.0, 5.0),
///         clipped_start: false,
///         clipped_end: true,
///     }
/// );
///
/// let gone = clip_line(&bounds, PlotPoint::new(-5.0, 1.0), PlotPoint::new(-1.0, 9.0));
/// assert_eq!(gone, Clip::Rejected);
/// ```
pub fn clip_line(bounds: &PerAxis<Transform>, start: PlotPoint, end: PlotPoint) -> Clip {
    let (mut p0, mut p1) = (start, end);
    let mut code0 = compute_outcode(bounds, p0, true);
    let mut code1 = compute_outcode(bounds, p1, true);

    loop {
        if (code0 | code1).is_empty() {
            break;
        }
        if code0.intersects(code1) {
            return Clip::Rejected;
        }

        let outside = if code0.is_empty() { code1 } else { code0 };
        let crossing = edge_crossing(bounds, outside, p0, p1);

        if code0.is_empty() {
            p1 = crossing;
            code1 = compute_outcode(bounds, p1, true);
        } else {
            p0 = crossing;
            code0 = compute_outcode(bounds, p0, true);
        }
    }

    Clip::Accepted {
        start: p0,
        end: p1,
        clipped_start: p0 != start,
        clipped_end: p1 != end,
    }
}

/// Where the line through `p0`, `p1` meets the first edge named in `code`.
fn edge_crossing(bounds: &PerAxis<Transform>, code: Outcode, p0: PlotPoint, p1: PlotPoint) -> PlotPoint {
    let along_x = |x: f64| PlotPoint::new(x, p0.y + (p1.y - p0.y) * (x - p0.x) / (p1.x - p0.x));
    let along_y = |y: f64| PlotPoint::new(p0.x + (p1.x - p0.x) * (y - p0.y) / (p1.y - p0.y), y);

    if code.contains(Outcode::RIGHT) {
        along_x(bounds.x.input_max)
    } else if code.contains(Outcode::LEFT) {
        along_x(bounds.x.input_min)
    } else if code.contains(Outcode::TOP) {
        along_y(bounds.y.input_max)
    } else {
        along_y(bounds.y.input_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> PerAxis<Transform> {
        PerAxis::new(Transform::new(0.0, 1.0, false), Transform::new(0.0, 1.0, false))
    }

    #[test]
    fn inside_segment_is_untouched() {
        let start = PlotPoint::new(0.1, 0.2);
        let end = PlotPoint::new(0.9, 0.7);
        assert_eq!(
            clip_line(&unit_box(), start, end),
            Clip::Accepted {
                start,
                end,
                clipped_start: false,
                clipped_end: false
            }
        );
    }

    #[test]
    fn zero_length_segment_inside() {
        let p = PlotPoint::new(0.5, 0.5);
        assert!(matches!(
            clip_line(&unit_box(), p, p),
            Clip::Accepted {
                clipped_start: false,
                clipped_end: false,
                ..
            }
        ));
    }

    #[test]
    fn same_side_is_rejected() {
        let b = unit_box();
        assert_eq!(clip_line(&b, PlotPoint::new(-1.0, 0.0), PlotPoint::new(-0.5, 1.0)), Clip::Rejected);
        assert_eq!(clip_line(&b, PlotPoint::new(0.2, 1.5), PlotPoint::new(0.8, 3.0)), Clip::Rejected);
        let p = PlotPoint::new(2.0, 2.0);
        assert_eq!(clip_line(&b, p, p), Clip::Rejected);
    }

    #[test]
    fn crossing_both_edges_clips_both_ends() {
        let clip = clip_line(&unit_box(), PlotPoint::new(-1.0, 0.5), PlotPoint::new(2.0, 0.5));
        let Clip::Accepted {
            start,
            end,
            clipped_start,
            clipped_end,
        } = clip
        else {
            panic!("expected the segment to be accepted");
        };
        assert!(clipped_start && clipped_end);
        assert_eq!(start, PlotPoint::new(0.0, 0.5));
        assert_eq!(end, PlotPoint::new(1.0, 0.5));
    }

    #[test]
    fn diagonal_missing_the_corner_is_rejected() {
        // Passes outside the top-left corner; no common outcode bit at first
        let clip = clip_line(&unit_box(), PlotPoint::new(-0.5, 0.8), PlotPoint::new(0.2, 1.5));
        assert_eq!(clip, Clip::Rejected);
    }

    #[test]
    fn fuzz_band_counts_as_inside() {
        let start = PlotPoint::new(0.5, 0.5);
        let end = PlotPoint::new(1.0 + 5e-7, 0.5);
        assert!(matches!(
            clip_line(&unit_box(), start, end),
            Clip::Accepted { clipped_end: false, .. }
        ));
    }
}
