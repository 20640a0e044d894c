//! Axis layout and coordinate transforms for scientific x-y plots.
//!
//! `grafaksel` turns a set of data points and a [`GraphConfig`] into the
//! calls that draw a framed, ticked and labelled graph on a
//! [`DrawingDevice`]. The pieces can also be used on their own:
//!
//! - [`scale`] picks "nice" tick spacings and enumerates ticks, subticks and
//!   log subsubticks.
//! - [`prepare_axis`] lays out one axis: spacing, limit rounding and
//!   subtick selection.
//! - [`Transform`] maps axis values to device coordinates, honouring axis
//!   reversal for data and ignoring it for the frame.
//! - [`clip_line`] clips a data segment to the plot box.
//! - [`format_tick_label`] renders tick label text.
//! - [`Multigrapher`] draws whole graphs, several of them on one device if
//!   asked.
//!
//! # Coordinate Spaces
//!
//! Values pass through three spaces. *True* values are what the user
//! supplies. *Input* values are what an axis stores: the same number on a
//! linear axis, its base-10 logarithm on a log axis. *Device* coordinates
//! span a `4096 × 4096` square that the [`Multigrapher`] sets up on the
//! device.
//!
//! # Examples
//!
//! ## Laying Out an Axis
//!
//! ```rust
//! use grafaksel::{AxisParams, prepare_axis};
//!
//! let params = AxisParams {
//!     min: 0.3,
//!     max: 9.2,
//!     round_to_next_tick: true,
//!     ..Default::default()
//! };
//! let (axis, transform) = prepare_axis(&params).unwrap();
//!
//! assert_eq!(axis.tick_spacing, 2.0);
//! assert_eq!((transform.input_min, transform.input_max), (0.0, 10.0));
//! ```
//!
//! ## Drawing a Graph
//!
//! ```rust
//! use grafaksel::{
//!     AxisConfig, DrawCommand, GraphConfig, Multigrapher, Point, RecordingDevice, SessionConfig,
//! };
//!
//! let config = GraphConfig {
//!     title: Some("Decay".into()),
//!     y: AxisConfig { log: true, label: Some("counts".into()), ..Default::default() },
//!     ..Default::default()
//! };
//! let points: Vec<Point> = (0..20)
//!     .map(|t| Point::new(f64::from(t), 1e4 * (-0.3 * f64::from(t)).exp()))
//!     .collect();
//!
//! let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
//! mg.plot_graph(&config, &points).unwrap();
//!
//! let device = mg.into_device();
//! assert!(device.labels().any(|l| l == "Decay"));
//! assert!(device.commands().iter().any(|c| matches!(c, DrawCommand::LineTo(_))));
//! ```

mod axis;
mod bounds;
mod clip;
mod config;
mod device;
mod error;
pub mod label;
mod layout;
mod multigrapher;
mod per_axis;
mod point;
pub mod scale;
mod style;
mod transform;

pub use axis::{Axis, AxisKind, AxisParams, Subsubticks, Subticks, prepare_axis};
pub use bounds::{AxisLimits, Extent, data_extent, resolve_limits};
pub use clip::{Clip, Outcode, clip_line, compute_outcode};
pub use config::{
    AxisConfig, ClipMode, FontSpec, GraphConfig, GridStyle, LegendPosition, Reposition, SessionConfig,
};
pub use device::{
    Capabilities, DrawCommand, DrawingDevice, HAlign, LineMode, MARKER_DOT, RecordingDevice, VAlign,
};
pub use error::{GraphError, GraphResult};
pub use label::format_tick_label;
pub use layout::{GraphLayout, PLOT_SIZE, RELATIVE_SUBTICK_SIZE};
pub use multigrapher::{FrameTask, Graph, Multigrapher};
pub use num_traits::Float;
pub use per_axis::{AxisId, PerAxis};
pub use point::{ErrorBar, Point, PointStyle, Symbol};
pub use scale::{Tick, TickIter};
pub use style::{LineStyle, NUM_PENS, PenColors, line_style_for};
pub use transform::{DevicePoint, PlotPoint, Transform};
