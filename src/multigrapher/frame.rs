//! The frame of a graph: canvas, title, axes or box, ticks, grid lines and
//! axis labels.
//!
//! Positions across an axis (where a tick mark starts, where a label sits)
//! use [`Transform::frame`] and stay put on a reversed axis. Positions along
//! it use [`Transform::value`], so ticks follow the data.

use tracing::{trace, warn};

use super::Graph;
use crate::config::GridStyle;
use crate::device::{Capabilities, DrawingDevice, HAlign, LineMode, VAlign};
use crate::label::format_tick_label;
use crate::layout::GraphLayout;
use crate::per_axis::AxisId;
use crate::scale::util::near_equality;
use crate::transform::{DevicePoint, PlotPoint, Transform};

/// One step of drawing a frame, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTask {
    /// Opaque background behind the graph. Optional.
    Canvas,
    Title,
    /// The box, or the axes without a box.
    AxesAndBox,
    /// Labelled ticks, linear subticks and grid lines along an axis.
    Ticks(AxisId),
    /// Within-decade graduations of a log axis.
    LogSubsubticks(AxisId),
    AxisLabel(AxisId),
}

impl FrameTask {
    pub const SEQUENCE: [FrameTask; 9] = [
        FrameTask::Canvas,
        FrameTask::Title,
        FrameTask::AxesAndBox,
        FrameTask::Ticks(AxisId::X),
        FrameTask::Ticks(AxisId::Y),
        FrameTask::LogSubsubticks(AxisId::X),
        FrameTask::LogSubsubticks(AxisId::Y),
        FrameTask::AxisLabel(AxisId::X),
        FrameTask::AxisLabel(AxisId::Y),
    ];
}

/// Device point at `along` on axis `id` and `across` on the other one.
fn at(id: AxisId, along: f64, across: f64) -> DevicePoint {
    match id {
        AxisId::X => DevicePoint::new(along, across),
        AxisId::Y => DevicePoint::new(across, along),
    }
}

/// Tick label anchors on the near and the far side of axis `id`.
fn label_anchor(id: AxisId, far: bool) -> (HAlign, VAlign) {
    match (id, far) {
        (AxisId::X, false) => (HAlign::Center, VAlign::Top),
        (AxisId::X, true) => (HAlign::Center, VAlign::Bottom),
        (AxisId::Y, false) => (HAlign::Right, VAlign::Center),
        (AxisId::Y, true) => (HAlign::Left, VAlign::Center),
    }
}

/// Distance from an axis to its tick labels, as a multiple of the tick
/// size: outward ticks push the labels further out.
fn label_clearance(tick_size: f64) -> f64 {
    (if tick_size >= 0.0 { 0.75 } else { 1.75 }) * tick_size.abs()
}

struct FramePainter<'a, D: DrawingDevice> {
    dev: &'a mut D,
    layout: &'a mut GraphLayout,
    bg_color: Option<&'a str>,
}

impl<D: DrawingDevice> Graph<'_, D> {
    /// Draw the frame: optionally the canvas, then title, axes, ticks,
    /// grid lines and axis labels.
    ///
    /// Counts the labelled ticks of each axis; the first frame of the
    /// session with too few of them logs a warning.
    pub fn draw_frame(&mut self, draw_canvas: bool) {
        let mut painter = FramePainter {
            dev: &mut self.mg.device,
            layout: &mut self.layout,
            bg_color: self.mg.bg_color.as_deref(),
        };
        painter.run(draw_canvas);
        self.check_labelled_ticks();
    }
}

impl<D: DrawingDevice> FramePainter<'_, D> {
    fn run(&mut self, draw_canvas: bool) {
        self.dev.save_state();
        self.dev.set_pen_color(&self.layout.frame_color);
        self.dev.set_line_width(self.layout.frame_line_width);
        self.dev.set_line_mode(LineMode::Solid);
        self.dev.set_fill_level(0);

        for task in FrameTask::SEQUENCE {
            if task == FrameTask::Canvas && !draw_canvas {
                continue;
            }
            trace!(?task, "frame task");
            match task {
                FrameTask::Canvas => self.canvas(),
                FrameTask::Title => self.title(),
                FrameTask::AxesAndBox => self.axes_and_box(),
                FrameTask::Ticks(id) => self.ticks(id),
                FrameTask::LogSubsubticks(id) => self.log_subsubticks(id),
                FrameTask::AxisLabel(AxisId::X) => self.x_label(),
                FrameTask::AxisLabel(AxisId::Y) => self.y_label(),
            }
        }

        self.dev.flush();
        self.dev.restore_state();
    }

    fn canvas(&mut self) {
        let half = 0.5 * self.layout.blankout_fraction;
        let t = &self.layout.transforms;
        let color = match self.bg_color {
            Some(bg) if self.dev.has_capability(Capabilities::SETTABLE_BACKGROUND) => bg,
            _ => "white",
        };

        self.dev.save_state();
        self.dev.set_color(color);
        self.dev.set_fill_level(1);
        self.dev
            .rect(t.box_fraction(0.5 - half, 0.5 - half), t.box_fraction(0.5 + half, 0.5 + half));
        self.dev.restore_state();
    }

    fn title(&mut self) {
        let l = &*self.layout;
        let Some(title) = l.title.as_deref() else {
            return;
        };
        if l.grid_style == GridStyle::NoAxes || l.axes.y.switch_axis_end {
            return;
        }

        self.dev.set_font_name(&l.title_font.name);
        let font_size = self.dev.set_font_size(l.size(l.title_font.size));
        let t = &l.transforms;
        self.dev.move_to(DevicePoint::new(
            t.x.box_fraction(0.5),
            t.y.box_fraction(1.0 + l.header_clearance()) + 0.65 * font_size + l.half_line_width,
        ));
        self.dev.label(HAlign::Center, VAlign::Bottom, title);
    }

    fn axes_and_box(&mut self) {
        let l = &*self.layout;
        let t = &l.transforms;
        let (x, y) = (&l.axes.x, &l.axes.y);
        let hlw = l.half_line_width;

        match l.grid_style {
            GridStyle::NoAxes => {}
            GridStyle::AxesAndBox | GridStyle::AxesAndBoxAndGrid => {
                self.dev.rect(t.box_fraction(0.0, 0.0), t.box_fraction(1.0, 1.0));
            }
            GridStyle::Axes => {
                let x_start = if x.switch_axis_end {
                    t.x.frame(x.other_axis_loc) - hlw
                } else {
                    t.x.frame(x.alt_other_axis_loc) + hlw
                };
                let corner = t.frame(PlotPoint::new(
                    if x.switch_axis_end { x.alt_other_axis_loc } else { x.other_axis_loc },
                    if y.switch_axis_end { y.alt_other_axis_loc } else { y.other_axis_loc },
                ));
                let y_end = if y.switch_axis_end {
                    t.y.frame(y.other_axis_loc) - hlw
                } else {
                    t.y.frame(y.alt_other_axis_loc) + hlw
                };

                self.dev.move_to(DevicePoint::new(x_start, corner.y));
                self.dev.line_to(corner);
                self.dev.line_to(DevicePoint::new(corner.x, y_end));
            }
            GridStyle::AxesAtOrigin => {
                let origin = t.frame(PlotPoint::new(
                    if x.switch_axis_end { x.other_axis_loc } else { x.alt_other_axis_loc },
                    if y.switch_axis_end { y.alt_other_axis_loc } else { y.other_axis_loc },
                ));

                self.dev.line(
                    DevicePoint::new(origin.x, t.y.box_fraction(0.0) - hlw),
                    DevicePoint::new(origin.x, t.y.box_fraction(1.0) + hlw),
                );
                self.dev.line(
                    DevicePoint::new(t.x.box_fraction(0.0) - hlw, origin.y),
                    DevicePoint::new(t.x.box_fraction(1.0) + hlw, origin.y),
                );
            }
        }
    }

    fn set_axis_font(&mut self, id: AxisId) -> f64 {
        let font = &self.layout.axes.get(id).font;
        self.dev.set_font_name(&font.name);
        self.dev.set_font_size(self.layout.size(font.size))
    }

    /// Draw one tick mark of device length `size` at `along`, with the
    /// lines the grid style calls for.
    fn tick_mark(&mut self, id: AxisId, along: f64, size: f64, grid_line: bool) {
        let l = &*self.layout;
        let other = l.axes.get(id.other());
        let ot = l.transforms.get(id.other());
        let hlw = l.half_line_width;
        let reach = size + if size > 0.0 { hlw } else { -hlw };

        if l.grid_style == GridStyle::NoAxes {
            return;
        }
        if grid_line && l.grid_style == GridStyle::AxesAndBoxAndGrid {
            self.dev.set_line_mode(LineMode::Dotted);
            self.dev
                .line(at(id, along, ot.box_fraction(0.0)), at(id, along, ot.box_fraction(1.0)));
            self.dev.set_line_mode(LineMode::Solid);
        }

        let (near, far) = (ot.frame(other.other_axis_loc), ot.frame(other.alt_other_axis_loc));
        if l.grid_style.has_box() {
            let (base, dir) = if other.switch_axis_end { (near, 1.0) } else { (far, -1.0) };
            self.dev.line(at(id, along, base), at(id, along, base + dir * reach));
        }
        let (base, dir) = if other.switch_axis_end { (far, -1.0) } else { (near, 1.0) };
        self.dev.line(at(id, along, base), at(id, along, base + dir * reach));
    }

    /// Label the tick at input-space `value` on axis `id`.
    fn tick_label(&mut self, id: AxisId, value: f64) {
        let l = &*self.layout;
        let axis = l.axes.get(id);
        let t = l.transforms.get(id);
        let other = l.axes.get(id.other());
        let ot = l.transforms.get(id.other());

        let text = format_tick_label(axis, t, axis.kind.to_true(value));
        let offset = l.size(label_clearance(l.tick_size)) + l.half_line_width;
        let far = other.switch_axis_end;
        let across = if far {
            ot.frame(other.alt_other_axis_loc) + offset
        } else {
            ot.frame(other.other_axis_loc) - offset
        };
        let (h, v) = label_anchor(id, far);

        let width = self.dev.label_width(&text);
        self.dev.move_to(at(id, t.value(value), across));
        self.dev.label(h, v, &text);

        let axis = self.layout.axes.get_mut(id);
        axis.max_label_width = axis.max_label_width.max(width);
        axis.labelled_ticks += 1;
    }

    /// Whether the label at `value` would sit on the other axis, for axes
    /// drawn through the origin. Labels at a limit are kept.
    fn label_hits_other_axis(&self, id: AxisId, value: f64) -> bool {
        let l = &*self.layout;
        let axis = l.axes.get(id);
        let t = l.transforms.get(id);
        let other = l.axes.get(id.other());
        let ot = l.transforms.get(id.other());

        l.grid_style == GridStyle::AxesAtOrigin
            && near_equality(value, axis.other_axis_loc, t.input_range)
            && other.other_axis_loc != ot.input_min
            && other.other_axis_loc != ot.input_max
    }

    fn ticks(&mut self, id: AxisId) {
        let l = &*self.layout;
        let axis = l.axes.get(id);
        if l.grid_style == GridStyle::NoAxes || axis.omit_ticks || axis.user_subsubtick_spacing().is_some() {
            return;
        }
        let t: Transform = *l.transforms.get(id);
        let majors: Vec<f64> = axis.major_ticks(&t).values().collect();
        let subs: Vec<f64> = axis.subtick_positions(&t).values().collect();
        let tick_size = l.size(l.tick_size);
        let subtick_size = if axis.is_log() { tick_size } else { l.size(l.subtick_size) };
        let zero_line = l.grid_style != GridStyle::AxesAtOrigin && !axis.is_log() && t.input_min * t.input_max < 0.0;

        self.set_axis_font(id);
        for value in majors {
            if !self.label_hits_other_axis(id, value) {
                self.tick_label(id, value);
            }
            self.tick_mark(id, t.value(value), tick_size, true);
        }
        for value in subs {
            self.tick_mark(id, t.value(value), subtick_size, false);
        }

        if zero_line {
            let ot = self.layout.transforms.get(id.other());
            let (from, to) = (ot.box_fraction(0.0), ot.box_fraction(1.0));
            let along = t.value(0.0);
            self.dev.set_line_mode(LineMode::Dotted);
            self.dev.line(at(id, along, from), at(id, along, to));
            self.dev.set_line_mode(LineMode::Solid);
        }
    }

    fn log_subsubticks(&mut self, id: AxisId) {
        let l = &*self.layout;
        let axis = l.axes.get(id);
        if l.grid_style == GridStyle::NoAxes || axis.omit_ticks {
            return;
        }
        let t: Transform = *l.transforms.get(id);
        let labelled = axis.user_subsubtick_spacing().is_some();
        let positions: Vec<f64> = match axis.subsubtick_positions(&t) {
            Ok(iter) => iter.values().collect(),
            Err(err) => {
                warn!(axis = %id.letter(), %err, "log subsubticks skipped");
                return;
            }
        };
        if positions.is_empty() {
            return;
        }
        let size = l.size(l.subtick_size);

        self.set_axis_font(id);
        for value in positions {
            if labelled {
                self.tick_label(id, value);
            }
            self.tick_mark(id, t.value(value), size, true);
        }
    }

    /// Where along an axis its label goes: the middle, or with axes
    /// through the origin, the middle of the longer side of the crossing.
    fn label_position(&self, id: AxisId) -> f64 {
        let l = &*self.layout;
        let axis = l.axes.get(id);
        let t = l.transforms.get(id);
        let other = l.axes.get(id.other());
        let ot = l.transforms.get(id.other());
        let middle = 0.5 * (t.input_min + t.input_max);

        if l.grid_style != GridStyle::AxesAtOrigin
            || other.other_axis_loc == ot.input_min
            || other.other_axis_loc == ot.input_max
        {
            middle
        } else if t.input_max - axis.other_axis_loc >= axis.other_axis_loc - t.input_min {
            0.5 * (axis.other_axis_loc + t.input_max)
        } else {
            0.5 * (t.input_min + axis.other_axis_loc)
        }
    }

    fn x_label(&mut self) {
        if self.layout.grid_style == GridStyle::NoAxes {
            return;
        }
        let Some(label) = self.layout.axes.x.label.clone().filter(|s| !s.is_empty()) else {
            return;
        };
        let font_size = self.set_axis_font(AxisId::X);

        let l = &*self.layout;
        let (t, y) = (&l.transforms, &l.axes.y);
        let clearance = (if l.tick_size >= 0.0 { 0.875 } else { 2.125 }) * l.tick_size.abs();
        let offset = l.size(clearance) + 6.0 * font_size / 5.0 + l.half_line_width;
        let along = t.x.value(self.label_position(AxisId::X));

        if y.switch_axis_end {
            self.dev
                .move_to(DevicePoint::new(along, t.y.frame(y.alt_other_axis_loc) + offset));
            self.dev.label(HAlign::Center, VAlign::Bottom, &label);
        } else {
            self.dev
                .move_to(DevicePoint::new(along, t.y.frame(y.other_axis_loc) - offset));
            self.dev.label(HAlign::Center, VAlign::Top, &label);
        }
    }

    fn y_label(&mut self) {
        if self.layout.grid_style == GridStyle::NoAxes {
            return;
        }
        let Some(label) = self.layout.axes.y.label.clone().filter(|s| !s.is_empty()) else {
            return;
        };
        let font_size = self.set_axis_font(AxisId::Y);

        let l = &*self.layout;
        let (t, x) = (&l.transforms, &l.axes.x);
        let offset = l.size(label_clearance(l.tick_size))
            + 1.15 * l.axes.y.max_label_width
            + 0.5 * font_size
            + l.half_line_width;
        let along = t.y.value(self.label_position(AxisId::Y));
        let rotate = !l.no_rotate_y_label;

        let (across, anchor) = if x.switch_axis_end {
            let anchor = if rotate {
                (HAlign::Center, VAlign::Top)
            } else {
                (HAlign::Left, VAlign::Center)
            };
            (t.x.frame(x.alt_other_axis_loc) + offset, anchor)
        } else {
            let anchor = if rotate {
                (HAlign::Center, VAlign::Baseline)
            } else {
                (HAlign::Right, VAlign::Center)
            };
            (t.x.frame(x.other_axis_loc) - offset, anchor)
        };

        self.dev.move_to(DevicePoint::new(across, along));
        if rotate {
            self.dev.set_text_angle(90.0);
        }
        self.dev.label(anchor.0, anchor.1, &label);
        if rotate {
            self.dev.set_text_angle(0.0);
        }
    }
}
