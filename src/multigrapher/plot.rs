//! Data points: polylines clipped to the plot box, symbols and error bars.

use tracing::trace;

use super::Graph;
use crate::axis::AxisKind;
use crate::clip::{Clip, clip_line};
use crate::config::ClipMode;
use crate::device::{DrawingDevice, LineMode, MARKER_DOT};
use crate::layout::PLOT_SIZE;
use crate::point::{ErrorBar, Point, Symbol};
use crate::style::line_style_for;
use crate::transform::{DevicePoint, PlotPoint};

/// A data point converted to input space.
#[derive(Debug, Clone, Copy)]
struct InputPoint {
    at: PlotPoint,
    x_errorbar: Option<ErrorBar>,
    y_errorbar: Option<ErrorBar>,
}

impl<D: DrawingDevice> Graph<'_, D> {
    /// Convert `point` to input space, exchanging its coordinates first on
    /// a transposed graph. `None` if a coordinate or error bar end has no
    /// place on a log axis.
    fn to_input(&self, point: &Point) -> Option<InputPoint> {
        let p = if self.layout.transpose_axes {
            point.clone().transposed()
        } else {
            point.clone()
        };
        let kinds = self.layout.axes.each_ref().map(|axis| axis.kind);
        let bar = |bar: Option<ErrorBar>, kind: AxisKind| match bar {
            Some(b) => Some(Some(ErrorBar::new(kind.try_to_input(b.min)?, kind.try_to_input(b.max)?))),
            None => Some(None),
        };

        Some(InputPoint {
            at: PlotPoint::new(kinds.x.try_to_input(p.x)?, kinds.y.try_to_input(p.y)?),
            x_errorbar: bar(p.x_errorbar, kinds.x)?,
            y_errorbar: bar(p.y_errorbar, kinds.y)?,
        })
    }

    /// Plot a sequence of points.
    pub fn plot_points(&mut self, points: &[Point]) {
        for point in points {
            self.plot_point(point);
        }
    }

    /// Plot one data point.
    ///
    /// A point that is the first of the graph, or has its pen up, starts a
    /// new polyline and sets the polyline's style; otherwise the segment
    /// from the previous point is drawn, clipped to the plot box according
    /// to the clip mode. The point's symbol and error bars are drawn unless
    /// the point lies outside the box.
    ///
    /// Points with a non-positive coordinate on a log axis are skipped.
    pub fn plot_point(&mut self, point: &Point) {
        let Some(p) = self.to_input(point) else {
            trace!(x = point.x, y = point.y, "point cannot be placed on a log axis");
            return;
        };
        let style = &point.style;

        if !point.pendown || self.pen.first_point_of_polyline {
            let line = line_style_for(style.line_mode, style.use_color, &self.layout.frame_color, &self.mg.pens);
            let dev = &mut self.mg.device;
            if let Some(mode) = line.mode {
                dev.set_line_mode(mode);
            }
            dev.set_color(&line.color);
            dev.set_line_width(style.line_width * PLOT_SIZE);
            dev.set_fill_level(style.fill_level());
            if self.layout.legend_pos.is_some() {
                self.add_to_legend(style);
            }
        }

        let start = if self.pen.first_point_of_polyline { p.at } else { self.pen.old };
        self.pen.old = p.at;
        let first = self.pen.first_point_of_polyline;
        let t = &self.layout.transforms;
        let here = t.value(p.at);

        let Clip::Accepted {
            start: clipped_start_point,
            end: clipped_end_point,
            clipped_start,
            clipped_end,
        } = clip_line(t, start, p.at)
        else {
            self.mg.device.move_to(here);
            self.pen.first_point_of_polyline = false;
            return;
        };

        let dev = &mut self.mg.device;
        let from = t.value(clipped_start_point);
        let to = t.value(clipped_end_point);
        if point.pendown && style.draws_line() {
            match self.layout.clip_mode {
                ClipMode::BothInside => {
                    if clipped_start || clipped_end || first {
                        dev.move_to(here);
                    } else {
                        dev.line_to(here);
                    }
                }
                ClipMode::OneInside => {
                    if (clipped_start && clipped_end) || first {
                        dev.move_to(here);
                    } else if clipped_start {
                        dev.move_to(from);
                        dev.line_to(here);
                    } else {
                        dev.line_to(to);
                    }
                }
                ClipMode::Visible => {
                    if clipped_start || first {
                        dev.move_to(from);
                    }
                    dev.line_to(to);
                    if clipped_end {
                        dev.move_to(here);
                    }
                }
            }
        } else {
            dev.move_to(here);
        }
        self.pen.first_point_of_polyline = false;

        if clipped_end {
            return;
        }

        let size = self.layout.size(style.symbol_size);
        match style.symbol {
            Symbol::Glyph(c) => {
                self.mg.device.save_state();
                self.plot_errorbar(&p, size);
                self.mg.device.set_font_name(&style.symbol_font);
                self.mg.device.marker(here, u32::from(c), size);
                self.mg.device.restore_state();
            }
            Symbol::Marker(code) if style.draws_line() => {
                self.mg.device.save_state();
                self.plot_errorbar(&p, size);
                self.mg.device.marker(here, code, size);
                self.mg.device.restore_state();
            }
            Symbol::Marker(code) => {
                self.plot_errorbar(&p, size);
                self.mg.device.marker(here, code, size);
            }
            Symbol::Plain if style.line_mode == 0 => {
                self.plot_errorbar(&p, size);
                self.mg.device.marker(here, MARKER_DOT, size);
            }
            Symbol::Plain | Symbol::None => self.plot_errorbar(&p, size),
        }
    }

    /// Error bars of `p` with end caps `cap` device units long.
    fn plot_errorbar(&mut self, p: &InputPoint, cap: f64) {
        if p.x_errorbar.is_none() && p.y_errorbar.is_none() {
            return;
        }
        let t = &self.layout.transforms;
        let dev = &mut self.mg.device;
        let half = 0.5 * cap;
        let (x, y) = (t.x.value(p.at.x), t.y.value(p.at.y));

        dev.save_state();
        dev.set_line_mode(LineMode::Solid);
        if let Some(bar) = p.x_errorbar {
            let (lo, hi) = (t.x.value(bar.min), t.x.value(bar.max));
            dev.line(DevicePoint::new(lo, y - half), DevicePoint::new(lo, y + half));
            dev.line(DevicePoint::new(lo, y), DevicePoint::new(hi, y));
            dev.line(DevicePoint::new(hi, y - half), DevicePoint::new(hi, y + half));
        }
        if let Some(bar) = p.y_errorbar {
            let (lo, hi) = (t.y.value(bar.min), t.y.value(bar.max));
            dev.line(DevicePoint::new(x - half, lo), DevicePoint::new(x + half, lo));
            dev.line(DevicePoint::new(x, lo), DevicePoint::new(x, hi));
            dev.line(DevicePoint::new(x - half, hi), DevicePoint::new(x + half, hi));
        }
        dev.restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::AxisLimits;
    use crate::config::{GraphConfig, SessionConfig};
    use crate::device::{DrawCommand, RecordingDevice};
    use crate::multigrapher::Multigrapher;
    use crate::per_axis::PerAxis;
    use crate::point::PointStyle;

    fn unit_limits() -> PerAxis<AxisLimits> {
        PerAxis::splat(AxisLimits {
            min: 0.0,
            max: 1.0,
            round_to_next_tick: false,
        })
    }

    /// Commands made while plotting `points` with the given clip mode,
    /// starting after the polyline attributes are set.
    fn plot(clip_mode: ClipMode, points: &[Point]) -> Vec<DrawCommand> {
        let config = GraphConfig {
            clip_mode,
            ..Default::default()
        };
        let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
        {
            let mut graph = mg.begin_graph(&config, unit_limits()).unwrap();
            graph.plot_points(points);
        }
        let commands = mg.into_device().take_commands();
        let start = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillLevel(_)))
            .unwrap();
        commands[start + 1..commands.len() - 1].to_vec()
    }

    fn dp(x: f64, y: f64) -> DevicePoint {
        let f = |v: f64| (0.2 + v * 0.6) * 4096.0;
        DevicePoint::new(f(x), f(y))
    }

    fn path_kinds(commands: &[DrawCommand]) -> Vec<&'static str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::MoveTo(_) => Some("move"),
                DrawCommand::LineTo(_) => Some("line"),
                _ => None,
            })
            .collect()
    }

    fn close(a: DevicePoint, b: DevicePoint) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    fn line_only() -> PointStyle {
        PointStyle {
            symbol: Symbol::None,
            ..Default::default()
        }
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .map(|&(x, y)| Point::new(x, y).with_style(line_only()))
            .collect()
    }

    #[test]
    fn test_inside_polyline() {
        let commands = plot(ClipMode::OneInside, &pts(&[(0.1, 0.1), (0.5, 0.5), (0.9, 0.2)]));
        assert_eq!(path_kinds(&commands), ["move", "line", "line"]);
        assert_eq!(commands[0], DrawCommand::MoveTo(dp(0.1, 0.1)));
    }

    #[test]
    fn test_one_inside_reenters_from_the_edge() {
        let commands = plot(ClipMode::OneInside, &pts(&[(0.5, 0.5), (1.5, 0.5), (0.5, 0.25)]));
        assert_eq!(path_kinds(&commands), ["move", "line", "move", "line"]);
        // leaves through the right edge
        let DrawCommand::LineTo(exit) = commands[1] else {
            panic!("expected a line to the edge");
        };
        assert!(close(exit, dp(1.0, 0.5)));
        // comes back in from the right edge
        let DrawCommand::MoveTo(entry) = commands[2] else {
            panic!("expected a move to the edge");
        };
        assert!((entry.x - dp(1.0, 0.0).x).abs() < 1e-6);
    }

    #[test]
    fn test_both_inside_skips_crossing_segments() {
        let commands = plot(ClipMode::BothInside, &pts(&[(0.5, 0.5), (1.5, 0.5), (0.5, 0.25), (0.25, 0.25)]));
        assert_eq!(path_kinds(&commands), ["move", "move", "move", "line"]);
    }

    #[test]
    fn test_visible_mode_draws_segment_outside_both_ends() {
        let points = pts(&[(-0.5, 0.5), (0.5, 1.25)]);
        assert_eq!(path_kinds(&plot(ClipMode::OneInside, &points)), ["move", "move"]);

        let commands = plot(ClipMode::Visible, &points);
        // first point is outside: just a move; the crossing piece is drawn
        assert_eq!(path_kinds(&commands), ["move", "move", "line", "move"]);
        let DrawCommand::LineTo(end) = commands[2] else {
            panic!("expected the visible piece");
        };
        assert!(close(end, dp(1.0 / 6.0, 1.0)));
    }

    #[test]
    fn test_rejected_segment_moves() {
        let commands = plot(ClipMode::Visible, &pts(&[(1.5, 0.5), (1.5, 0.9)]));
        assert_eq!(commands, [DrawCommand::MoveTo(dp(1.5, 0.5)), DrawCommand::MoveTo(dp(1.5, 0.9))]);
    }

    #[test]
    fn test_pen_up_starts_new_polyline() {
        let mut points = pts(&[(0.1, 0.1), (0.2, 0.2), (0.3, 0.1), (0.4, 0.2)]);
        points[2] = points[2].clone().pen_up();
        let commands = plot(ClipMode::OneInside, &points);
        assert_eq!(path_kinds(&commands), ["move", "line", "move", "line"]);
        // style is set again for the second polyline
        assert_eq!(commands.iter().filter(|c| matches!(c, DrawCommand::FillLevel(_))).count(), 1);
    }

    #[test]
    fn test_plain_symbol_without_line_is_a_dot() {
        let style = PointStyle {
            line_mode: 0,
            ..Default::default()
        };
        let commands = plot(ClipMode::OneInside, &[Point::new(0.5, 0.5).with_style(style)]);
        assert!(commands.contains(&DrawCommand::Marker {
            at: dp(0.5, 0.5),
            code: MARKER_DOT,
            size: 4096.0 * 0.6 * 0.03,
        }));
    }

    #[test]
    fn test_no_symbol_outside_box() {
        let style = PointStyle {
            symbol: Symbol::Marker(4),
            ..Default::default()
        };
        let points = [
            Point::new(0.5, 0.5).with_style(style.clone()),
            Point::new(1.5, 0.5).with_style(style),
        ];
        let commands = plot(ClipMode::OneInside, &points);
        let markers = commands.iter().filter(|c| matches!(c, DrawCommand::Marker { .. })).count();
        assert_eq!(markers, 1);
        // a marker on a line is drawn in its own state
        assert!(commands.contains(&DrawCommand::SaveState));
    }

    #[test]
    fn test_glyph_uses_symbol_font() {
        let style = PointStyle {
            symbol: Symbol::Glyph('n'),
            ..Default::default()
        };
        let commands = plot(ClipMode::OneInside, &[Point::new(0.5, 0.5).with_style(style)]);
        let font = commands
            .iter()
            .position(|c| *c == DrawCommand::FontName("ZapfDingbats".into()))
            .unwrap();
        assert!(matches!(commands[font + 1], DrawCommand::Marker { code: 110, .. }));
        assert_eq!(commands[font + 2], DrawCommand::RestoreState);
    }

    #[test]
    fn test_errorbar_caps() {
        let points = [Point::new(0.5, 0.5).with_style(line_only()).with_y_errorbar(0.25, 0.75)];
        let commands = plot(ClipMode::OneInside, &points);
        let save = commands.iter().position(|c| *c == DrawCommand::SaveState).unwrap();
        assert_eq!(commands[save + 1], DrawCommand::LineMode(LineMode::Solid));
        // three lines: lower cap, bar, upper cap
        assert_eq!(path_kinds(&commands[save..]), ["move", "line", "move", "line", "move", "line"]);
        assert_eq!(commands[save + 4], DrawCommand::MoveTo(DevicePoint::new(dp(0.5, 0.0).x, dp(0.0, 0.25).y)));
    }

    #[test]
    fn test_log_axis_skips_non_positive_points() {
        let config = GraphConfig {
            x: crate::config::AxisConfig {
                log: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let limits = PerAxis::new(
            AxisLimits {
                min: 1.0,
                max: 100.0,
                round_to_next_tick: false,
            },
            unit_limits().y,
        );
        let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
        {
            let mut graph = mg.begin_graph(&config, limits).unwrap();
            graph.plot_points(&pts(&[(-1.0, 0.5), (10.0, 0.5)]));
        }
        let moves: Vec<DrawCommand> = mg
            .into_device()
            .take_commands()
            .into_iter()
            .filter(|c| matches!(c, DrawCommand::MoveTo(_)))
            .collect();
        assert_eq!(moves, [DrawCommand::MoveTo(dp(0.5, 0.5))]);
    }

    #[test]
    fn test_transposed_points() {
        let config = GraphConfig {
            transpose_axes: true,
            ..Default::default()
        };
        let limits = PerAxis::new(
            AxisLimits {
                min: 0.0,
                max: 10.0,
                round_to_next_tick: false,
            },
            unit_limits().y,
        );
        let mut mg = Multigrapher::new(RecordingDevice::new(), &SessionConfig::default());
        {
            let mut graph = mg.begin_graph(&config, limits).unwrap();
            graph.plot_point(&Point::new(5.0, 0.25).with_style(line_only()));
        }
        let commands = mg.into_device().take_commands();
        let here = commands.iter().find_map(|c| match c {
            DrawCommand::MoveTo(p) => Some(*p),
            _ => None,
        });
        // the user's y is drawn horizontally
        assert!(close(here.unwrap(), dp(0.25, 0.5)));
    }
}
