//! Per-graph layout: both axes, their transforms and the frame geometry.
//!
//! [`GraphLayout::new`] is the single place where user settings turn into
//! the immutable description a graph is drawn from. Nothing here touches a
//! device beyond asking for its capabilities.

use tracing::{debug, warn};

use crate::axis::{Axis, AxisKind, AxisParams, prepare_axis};
use crate::bounds::AxisLimits;
use crate::config::{AxisConfig, ClipMode, FontSpec, GraphConfig, GridStyle};
use crate::device::Capabilities;
use crate::error::{GraphError, GraphResult};
use crate::per_axis::PerAxis;
use crate::transform::Transform;

/// Side of the square device space every graph is drawn in.
pub const PLOT_SIZE: f64 = 4096.0;

/// Length of a subtick relative to a tick.
pub const RELATIVE_SUBTICK_SIZE: f64 = 0.4;

/// Everything needed to draw one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    /// After any transposition: `axes.x` is drawn horizontally.
    pub axes: PerAxis<Axis>,
    pub transforms: PerAxis<Transform>,
    pub grid_style: GridStyle,
    pub tick_size: f64,
    pub subtick_size: f64,
    pub frame_color: String,
    /// In device units; negative for the device default.
    pub frame_line_width: f64,
    /// Offset that keeps ticks and labels clear of a wide frame line.
    pub half_line_width: f64,
    pub title: Option<String>,
    pub title_font: FontSpec,
    pub blankout_fraction: f64,
    pub clip_mode: ClipMode,
    pub no_rotate_y_label: bool,
    pub transpose_axes: bool,
    /// Horizontal center of the legend as a fraction of the plot box.
    pub legend_pos: Option<f64>,
}

fn check_finite(axis: char, what: &'static str, value: f64) -> GraphResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GraphError::NonFinite { axis, what })
    }
}

/// Turn one user axis into axis-preparation parameters, in input space.
fn axis_params(axis: char, config: &AxisConfig, limits: AxisLimits, font: &FontSpec) -> GraphResult<AxisParams> {
    let kind = if config.log { AxisKind::Log10 } else { AxisKind::Linear };
    let min = kind.to_input(axis, check_finite(axis, "lower limit", limits.min)?)?;
    let max = kind.to_input(axis, check_finite(axis, "upper limit", limits.max)?)?;

    let spacing = config
        .spacing
        .map(|s| check_finite(axis, "tick spacing", s))
        .transpose()?;
    if spacing == Some(0.0) {
        return Err(GraphError::ZeroSpacing(axis));
    }
    let spacing = spacing.map(f64::abs);
    // On a log axis a user spacing places labelled subsubticks instead
    let (spacing, subsubtick_spacing) = if kind.is_log() { (None, spacing) } else { (spacing, None) };

    let (reverse, (mut min, mut max)) = if max < min { (true, (max, min)) } else { (false, (min, max)) };
    if min == max {
        warn!(axis = %axis, limit = min, "identical upper and lower limits are separated");
        max += 1.0;
        min -= 1.0;
    }

    Ok(AxisParams {
        min,
        max,
        spacing,
        subsubtick_spacing,
        kind,
        round_to_next_tick: limits.round_to_next_tick,
        reverse,
        switch_axis_end: config.switch_axis_end,
        omit_ticks: config.omit_ticks,
        label: config.label.clone(),
        font: font.clone(),
    })
}

/// Crossing point of the other axis, for axes drawn through the origin:
/// zero when the range contains it, else the limit nearest to it.
fn origin_crossing(t: &Transform) -> f64 {
    if t.input_min * t.input_max <= 0.0 {
        0.0
    } else if t.input_min > 0.0 {
        t.input_min
    } else {
        t.input_max
    }
}

impl GraphLayout {
    /// Lay out a graph from its configuration and resolved limits.
    ///
    /// `limits` are the true-space limits of the user's x and y axes, as
    /// returned by [`resolve_limits`](crate::resolve_limits); with
    /// `transpose_axes` they are exchanged here along with every other
    /// per-axis setting.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NonFinite`] for a NaN or infinite limit or spacing.
    /// - [`GraphError::NonPositiveLogBound`] for a limit at or below zero on a log axis.
    /// - [`GraphError::ZeroSpacing`] for a tick spacing of zero.
    /// - Any error of [`prepare_axis`].
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::{Capabilities, GraphConfig, GraphLayout, Point, resolve_limits};
    ///
    /// let config = GraphConfig::default();
    /// let points = [Point::new(0.0, 3.0), Point::new(8.3, 47.0)];
    /// let limits = resolve_limits(&points, &config);
    /// let layout = GraphLayout::new(&config, limits, Capabilities::all()).unwrap();
    ///
    /// assert_eq!(layout.transforms.y.input_max, 50.0);
    /// assert_eq!(layout.axes.x.tick_spacing, 2.0);
    /// ```
    pub fn new(config: &GraphConfig, limits: PerAxis<AxisLimits>, capabilities: Capabilities) -> GraphResult<Self> {
        let mut params = PerAxis::new(&config.x, &config.y)
            .zip(limits)
            .try_map_named(|axis, (user, limits)| axis_params(axis, user, limits, &config.font))?;
        if config.transpose_axes {
            params.swap();
        }

        let squeeze = PerAxis::new(
            (config.margin_left, config.plot_width),
            (config.margin_below, config.plot_height),
        );
        let (mut axes, transforms) = params
            .try_map_named(|_, p| prepare_axis(&p))?
            .zip(squeeze)
            .map(|((axis, t), (min, range))| (axis, t.squeezed(min, range).output(0.0, PLOT_SIZE)))
            .unzip();

        if config.grid_style == GridStyle::AxesAtOrigin {
            for (axis, t) in [(&mut axes.x, &transforms.x), (&mut axes.y, &transforms.y)] {
                axis.other_axis_loc = origin_crossing(t);
                axis.alt_other_axis_loc = axis.other_axis_loc;
                axis.switch_axis_end = (t.input_max - axis.other_axis_loc) < (axis.other_axis_loc - t.input_min);
            }
        }

        let frame_line_width = config.frame_line_width.map_or(-1.0, |w| w * PLOT_SIZE);
        let half_line_width = match config.frame_line_width {
            Some(w) if w >= 0.0 && capabilities.contains(Capabilities::WIDE_LINES) => {
                0.5 * w * transforms.x.output_range
            }
            _ => 0.0,
        };

        let layout = Self {
            axes,
            transforms,
            grid_style: config.grid_style,
            tick_size: config.tick_size,
            subtick_size: RELATIVE_SUBTICK_SIZE * config.tick_size,
            frame_color: config.frame_color.clone(),
            frame_line_width,
            half_line_width,
            title: config.title.clone().filter(|t| !t.is_empty()),
            title_font: config.title_font(),
            blankout_fraction: config.blankout_fraction,
            clip_mode: config.clip_mode,
            no_rotate_y_label: config.no_rotate_y_label,
            transpose_axes: config.transpose_axes,
            legend_pos: config.legend.map(|p| p.fraction()),
        };
        debug!(
            x = ?(layout.transforms.x.input_min, layout.transforms.x.input_max),
            y = ?(layout.transforms.y.input_min, layout.transforms.y.input_max),
            grid = ?layout.grid_style,
            "graph layout"
        );
        Ok(layout)
    }

    /// Convert a size relative to the plot box into device units.
    pub fn size(&self, fraction: f64) -> f64 {
        self.transforms.size_scale(fraction)
    }

    /// Extra distance above the plot box for the title and legend header:
    /// outward ticks on a plain frame push them further up.
    pub(crate) fn header_clearance(&self) -> f64 {
        let factor = if self.grid_style.is_plain_frame() && self.tick_size <= 0.0 {
            1.0
        } else {
            0.5
        };
        factor * self.tick_size.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Subsubticks;
    use crate::config::LegendPosition;

    fn limits(x: (f64, f64), y: (f64, f64)) -> PerAxis<AxisLimits> {
        let l = |(min, max): (f64, f64)| AxisLimits {
            min,
            max,
            round_to_next_tick: false,
        };
        PerAxis::new(l(x), l(y))
    }

    fn layout(config: &GraphConfig, x: (f64, f64), y: (f64, f64)) -> GraphResult<GraphLayout> {
        GraphLayout::new(config, limits(x, y), Capabilities::all())
    }

    #[test]
    fn test_squeeze_and_output() {
        let l = layout(&GraphConfig::default(), (0.0, 1.0), (0.0, 1.0)).unwrap();
        assert_eq!(l.transforms.x.squeezed_min, 0.2);
        assert!((l.transforms.x.squeezed_max - 0.8).abs() < 1e-12);
        assert_eq!(l.transforms.y.output_range, PLOT_SIZE);
        assert!((l.subtick_size - 0.008).abs() < 1e-12);
        assert!((l.size(1.0) - 0.6 * PLOT_SIZE).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_limits_mark_axis_reversed() {
        let l = layout(&GraphConfig::default(), (10.0, 0.0), (0.0, 1.0)).unwrap();
        assert!(l.transforms.x.reverse);
        assert_eq!((l.transforms.x.input_min, l.transforms.x.input_max), (0.0, 10.0));
        assert!(!l.transforms.y.reverse);
    }

    #[test_log::test]
    fn test_identical_limits_separated() {
        let l = layout(&GraphConfig::default(), (5.0, 5.0), (0.0, 1.0)).unwrap();
        assert_eq!((l.transforms.x.input_min, l.transforms.x.input_max), (4.0, 6.0));
    }

    #[test_log::test]
    fn test_empty_data_gives_unit_ranges() {
        use crate::bounds::resolve_limits;

        let mut config = GraphConfig::default();
        let l = GraphLayout::new(&config, resolve_limits(&[], &config), Capabilities::all()).unwrap();
        assert_eq!((l.transforms.x.input_min, l.transforms.x.input_max), (-1.0, 1.0));
        assert_eq!((l.transforms.y.input_min, l.transforms.y.input_max), (-1.0, 1.0));

        // one decade either side of 1
        config.y.log = true;
        let l = GraphLayout::new(&config, resolve_limits(&[], &config), Capabilities::all()).unwrap();
        assert_eq!(l.axes.y.kind, AxisKind::Log10);
        assert_eq!((l.transforms.y.input_min, l.transforms.y.input_max), (-1.0, 1.0));
    }

    #[test]
    fn test_zero_spacing_is_an_error() {
        let mut config = GraphConfig::default();
        config.y.spacing = Some(0.0);
        assert_eq!(layout(&config, (0.0, 1.0), (0.0, 1.0)), Err(GraphError::ZeroSpacing('y')));
    }

    #[test]
    fn test_negative_spacing_taken_as_absolute() {
        let mut config = GraphConfig::default();
        config.x.spacing = Some(-0.25);
        let l = layout(&config, (0.0, 1.0), (0.0, 1.0)).unwrap();
        assert_eq!(l.axes.x.tick_spacing, 0.25);
    }

    #[test]
    fn test_non_finite_limits_rejected() {
        let err = layout(&GraphConfig::default(), (0.0, 1.0), (f64::NAN, 1.0)).unwrap_err();
        assert_eq!(
            err,
            GraphError::NonFinite {
                axis: 'y',
                what: "lower limit"
            }
        );
    }

    #[test]
    fn test_log_axis_converts_and_checks_limits() {
        let mut config = GraphConfig::default();
        config.x.log = true;
        let l = layout(&config, (1.0, 1000.0), (0.0, 1.0)).unwrap();
        assert_eq!((l.transforms.x.input_min, l.transforms.x.input_max), (0.0, 3.0));

        assert_eq!(
            layout(&config, (0.0, 1000.0), (0.0, 1.0)),
            Err(GraphError::NonPositiveLogBound { axis: 'x', value: 0.0 })
        );
    }

    #[test]
    fn test_log_spacing_becomes_subsubticks() {
        let mut config = GraphConfig::default();
        config.y.log = true;
        config.y.spacing = Some(20.0);
        let l = layout(&config, (0.0, 1.0), (10.0, 100.0)).unwrap();
        assert_eq!(l.axes.y.subsubticks, Subsubticks::UserSpecified { spacing: 20.0 });
    }

    #[test]
    fn test_transpose_swaps_everything() {
        let mut config = GraphConfig::default();
        config.transpose_axes = true;
        config.x.label = Some("time".into());
        config.x.log = true;
        config.y.omit_ticks = true;
        let l = layout(&config, (1.0, 100.0), (-5.0, 5.0)).unwrap();

        assert_eq!(l.axes.y.label.as_deref(), Some("time"));
        assert_eq!(l.axes.y.kind, AxisKind::Log10);
        assert!(l.axes.x.omit_ticks);
        assert_eq!((l.transforms.x.input_min, l.transforms.x.input_max), (-5.0, 5.0));
        // squeeze stays with the drawn direction
        assert_eq!(l.transforms.x.squeezed_min, config.margin_left);
    }

    #[test]
    fn test_axes_at_origin_crossing() {
        let config = GraphConfig {
            grid_style: GridStyle::AxesAtOrigin,
            ..Default::default()
        };
        let l = layout(&config, (-2.0, 8.0), (3.0, 9.0)).unwrap();
        assert_eq!(l.axes.x.other_axis_loc, 0.0);
        assert!(!l.axes.x.switch_axis_end);
        // y range excludes zero: crossing at the nearer limit
        assert_eq!(l.axes.y.other_axis_loc, 3.0);
        assert_eq!(l.axes.y.alt_other_axis_loc, 3.0);

        let l = layout(&config, (-8.0, 2.0), (-9.0, -3.0)).unwrap();
        assert!(l.axes.x.switch_axis_end);
        assert_eq!(l.axes.y.other_axis_loc, -3.0);
        assert!(l.axes.y.switch_axis_end);
    }

    #[test]
    fn test_half_line_width_needs_wide_lines() {
        let config = GraphConfig {
            frame_line_width: Some(0.002),
            ..Default::default()
        };
        let l = GraphLayout::new(&config, limits((0.0, 1.0), (0.0, 1.0)), Capabilities::all()).unwrap();
        assert!((l.half_line_width - 0.001 * PLOT_SIZE).abs() < 1e-9);

        let l = GraphLayout::new(&config, limits((0.0, 1.0), (0.0, 1.0)), Capabilities::empty()).unwrap();
        assert_eq!(l.half_line_width, 0.0);
    }

    #[test]
    fn test_legend_position() {
        let config = GraphConfig {
            legend: Some(LegendPosition::Center),
            ..Default::default()
        };
        let l = layout(&config, (0.0, 1.0), (0.0, 1.0)).unwrap();
        assert_eq!(l.legend_pos, Some(0.5));
    }

    #[test]
    fn test_header_clearance() {
        let mut config = GraphConfig::default();
        let l = layout(&config, (0.0, 1.0), (0.0, 1.0)).unwrap();
        assert!((l.header_clearance() - 0.01).abs() < 1e-12);

        config.tick_size = -0.02;
        let l = layout(&config, (0.0, 1.0), (0.0, 1.0)).unwrap();
        assert!((l.header_clearance() - 0.02).abs() < 1e-12);
    }
}
