//! Mapping from axis input space to device coordinates.
//!
//! Each axis owns a [`Transform`] that takes a value through four affine
//! stages:
//!
//! 1. **normalize**: `[input_min, input_max]` onto `[0, 1]`
//! 2. **reflect**: `n` becomes `1 - n` on a reversed axis
//! 3. **squeeze**: `[0, 1]` onto the plot box `[squeezed_min, squeezed_max]`
//! 4. **to_device**: the unit square onto `[output_min, output_max]`
//!
//! Data points use all four stages ([`Transform::value`]). Frame geometry
//! such as axis positions and label anchors skips the reflection
//! ([`Transform::frame`]), so decorations stay put when an axis is reversed.
//!
//! Input space is the coordinate the axis stores: the data value on a
//! linear axis, its base-10 logarithm on a log axis.
//!
//! # Examples
//!
//! ```rust
//! use grafaksel::{PerAxis, PlotPoint, Transform};
//!
//! // x in [0, 100], y in [-1, 1], plot box in the middle 60% of a 4096 square
//! let x = Transform::new(0.0_f64, 100.0, false).squeezed(0.2, 0.6).output(0.0, 4096.0);
//! let y = Transform::new(-1.0_f64, 1.0, false).squeezed(0.2, 0.6).output(0.0, 4096.0);
//! let both = PerAxis::new(x, y);
//!
//! let p = both.value(PlotPoint::new(50.0, 0.0));
//! assert!((p.x - 2048.0).abs() < 1e-9);
//! assert!((p.y - 2048.0).abs() < 1e-9);
//!
//! // The lower-left corner of the plot box
//! let corner = both.value(PlotPoint::new(0.0, -1.0));
//! assert!((corner.x - 0.2 * 4096.0).abs() < 1e-9);
//! ```
//!
//! ## Reversed Axes
//!
//! ```rust
//! use grafaksel::Transform;
//!
//! let x = Transform::new(0.0, 10.0, true);
//!
//! // Data values flip...
//! assert_eq!(x.value(0.0), 1.0);
//! // ...frame positions do not.
//! assert_eq!(x.frame(0.0), 0.0);
//! ```

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::per_axis::PerAxis;

/// A point in axis input space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint<D = f64> {
    pub x: D,
    pub y: D,
}

impl<D> PlotPoint<D> {
    /// Creates a new plot point at the given data coordinates.
    pub const fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

/// A point in device coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicePoint<D = f64> {
    pub x: D,
    pub y: D,
}

impl<D> DevicePoint<D> {
    pub const fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

/// The input-to-device mapping of one axis.
///
/// `input_min < input_max` is expected; axis preparation widens a
/// degenerate range before building the transform. The `*_range` fields are
/// kept in sync by the constructors and are stored rather than recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform<D = f64> {
    pub input_min: D,
    pub input_max: D,
    pub input_range: D,
    pub reverse: bool,
    pub squeezed_min: D,
    pub squeezed_max: D,
    pub squeezed_range: D,
    pub output_min: D,
    pub output_max: D,
    pub output_range: D,
}

impl<D: Float> Transform<D> {
    /// A transform onto the full unit interval, with no squeeze.
    pub fn new(input_min: D, input_max: D, reverse: bool) -> Self {
        Self {
            input_min,
            input_max,
            input_range: input_max - input_min,
            reverse,
            squeezed_min: D::zero(),
            squeezed_max: D::one(),
            squeezed_range: D::one(),
            output_min: D::zero(),
            output_max: D::one(),
            output_range: D::one(),
        }
    }

    /// Confine the plot to `[min, min + range]` of the unit interval.
    pub fn squeezed(self, min: D, range: D) -> Self {
        Self {
            squeezed_min: min,
            squeezed_max: min + range,
            squeezed_range: range,
            ..self
        }
    }

    /// Map the unit interval onto `[min, max]` in device units.
    pub fn output(self, min: D, max: D) -> Self {
        Self {
            output_min: min,
            output_max: max,
            output_range: max - min,
            ..self
        }
    }

    pub fn normalize(&self, v: D) -> D {
        (v - self.input_min) / self.input_range
    }

    pub fn reflect(&self, n: D) -> D {
        if self.reverse { D::one() - n } else { n }
    }

    pub fn squeeze(&self, n: D) -> D {
        self.squeezed_min + n * self.squeezed_range
    }

    pub fn to_device(&self, s: D) -> D {
        self.output_min + s * self.output_range
    }

    /// Device coordinate of a data value, honouring axis reversal.
    pub fn value(&self, v: D) -> D {
        self.to_device(self.squeeze(self.reflect(self.normalize(v))))
    }

    /// Device coordinate of a frame position, ignoring axis reversal.
    pub fn frame(&self, v: D) -> D {
        self.to_device(self.squeeze(self.normalize(v)))
    }

    /// Device coordinate of a fraction of the plot box (`0` and `1` are its edges).
    pub fn box_fraction(&self, fraction: D) -> D {
        self.to_device(self.squeeze(fraction))
    }

    /// Device length of one plot-box width along this axis.
    pub fn box_extent(&self) -> D {
        self.output_range * self.squeezed_range
    }
}

impl<D: Float> PerAxis<Transform<D>> {
    /// Device position of a data point.
    pub fn value(&self, p: PlotPoint<D>) -> DevicePoint<D> {
        DevicePoint::new(self.x.value(p.x), self.y.value(p.y))
    }

    /// Device position of a frame point.
    pub fn frame(&self, p: PlotPoint<D>) -> DevicePoint<D> {
        DevicePoint::new(self.x.frame(p.x), self.y.frame(p.y))
    }

    /// Device position of a fractional location within the plot box.
    pub fn box_fraction(&self, fx: D, fy: D) -> DevicePoint<D> {
        DevicePoint::new(self.x.box_fraction(fx), self.y.box_fraction(fy))
    }

    /// Convert a size given as a fraction of the plot box into device units.
    ///
    /// The shorter side of the box sets the scale, so sizes stay isotropic
    /// on a non-square plot.
    pub fn size_scale(&self, size: D) -> D {
        self.x.box_extent().min(self.y.box_extent()) * size
    }
}
