//! The vector-drawing surface a graph is rendered onto.
//!
//! [`DrawingDevice`] is the whole output contract: the renderer emits an
//! ordered stream of primitive calls and never inspects the result, apart
//! from font sizes and label widths. Coordinates are in the device space
//! set by [`DrawingDevice::set_space`]; the multigrapher uses `[0, 4096]²`.
//!
//! [`RecordingDevice`] keeps every call as a [`DrawCommand`], for tests and
//! for callers that want to replay or serialize the output.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::transform::DevicePoint;

/// Dash pattern of stroked lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    #[default]
    Solid,
    ShortDashed,
    Dotted,
    DotDashed,
    LongDashed,
}

impl LineMode {
    /// The five modes in the order data line styles cycle through them.
    pub const ALL: [LineMode; 5] = [
        LineMode::Solid,
        LineMode::ShortDashed,
        LineMode::Dotted,
        LineMode::DotDashed,
        LineMode::LongDashed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LineMode::Solid => "solid",
            LineMode::ShortDashed => "shortdashed",
            LineMode::Dotted => "dotted",
            LineMode::DotDashed => "dotdashed",
            LineMode::LongDashed => "longdashed",
        }
    }
}

/// Horizontal anchor of a text label relative to the current point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text label relative to the current point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Baseline,
    Bottom,
}

bitflags! {
    /// Optional features of a device that change how a graph is laid out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Line width is honoured, so frame geometry is offset by half of it.
        const WIDE_LINES = 1 << 0;
        /// The background color can be changed; the canvas box uses it.
        const SETTABLE_BACKGROUND = 1 << 1;
    }
}

/// Marker code for a single dot.
pub const MARKER_DOT: u32 = 1;

/// A 2-D vector drawing surface with a stack of drawing states.
///
/// Every `save_state` is matched by exactly one `restore_state` on every
/// path through the renderer. Pen position, colors, line mode and width,
/// fill level, font and text angle are part of the saved state.
pub trait DrawingDevice {
    /// Clear the display.
    fn erase(&mut self);

    /// Define the user coordinate window that maps onto the display.
    fn set_space(&mut self, min: DevicePoint, max: DevicePoint);

    /// Compose an affine map `[a, b, c, d, e, f]` onto the current one.
    fn concat(&mut self, matrix: [f64; 6]);

    fn save_state(&mut self);

    fn restore_state(&mut self);

    /// Color of stroked lines and text.
    fn set_pen_color(&mut self, name: &str);

    /// Color of both strokes and fills.
    fn set_color(&mut self, name: &str);

    /// `0` for no fill, `1..=0xffff` for increasingly light fills.
    fn set_fill_level(&mut self, level: u32);

    fn set_line_mode(&mut self, mode: LineMode);

    /// Negative widths select the device default.
    fn set_line_width(&mut self, width: f64);

    fn set_font_name(&mut self, name: &str);

    /// Request a font size; returns the size actually used.
    fn set_font_size(&mut self, size: f64) -> f64;

    /// Width `text` would have in the current font.
    fn label_width(&self, text: &str) -> f64;

    /// Rotation of subsequent labels, in degrees.
    fn set_text_angle(&mut self, degrees: f64);

    /// Move the pen without drawing, ending any open path.
    fn move_to(&mut self, p: DevicePoint);

    /// Extend the open path to `p`.
    fn line_to(&mut self, p: DevicePoint);

    /// A single segment.
    fn line(&mut self, from: DevicePoint, to: DevicePoint) {
        self.move_to(from);
        self.line_to(to);
    }

    /// A box with corners `a` and `b`, filled according to the fill level.
    fn rect(&mut self, a: DevicePoint, b: DevicePoint);

    /// Place `text` at the pen position with the given anchors.
    fn label(&mut self, h: HAlign, v: VAlign, text: &str);

    /// A marker symbol or glyph of `size` centred on `at`.
    fn marker(&mut self, at: DevicePoint, code: u32, size: f64);

    /// Finish the open path, if any.
    fn end_path(&mut self);

    /// Push buffered output to the display.
    fn flush(&mut self);

    fn capabilities(&self) -> Capabilities;

    fn has_capability(&self, cap: Capabilities) -> bool {
        self.capabilities().contains(cap)
    }
}

/// One call made on a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Erase,
    SetSpace { min: DevicePoint, max: DevicePoint },
    Concat([f64; 6]),
    SaveState,
    RestoreState,
    PenColor(String),
    Color(String),
    FillLevel(u32),
    LineMode(LineMode),
    LineWidth(f64),
    FontName(String),
    FontSize(f64),
    TextAngle(f64),
    MoveTo(DevicePoint),
    LineTo(DevicePoint),
    Rect { a: DevicePoint, b: DevicePoint },
    Label { h: HAlign, v: VAlign, text: String },
    Marker { at: DevicePoint, code: u32, size: f64 },
    EndPath,
    Flush,
}

/// A [`DrawingDevice`] that records instead of drawing.
///
/// Label widths are estimated as a fixed fraction of the font size per
/// character.
///
/// # Examples
///
/// ```
/// use grafaksel::{DevicePoint, DrawCommand, DrawingDevice, RecordingDevice};
///
/// let mut device = RecordingDevice::new();
/// device.save_state();
/// device.line(DevicePoint::new(0.0, 0.0), DevicePoint::new(10.0, 0.0));
/// device.restore_state();
///
/// assert_eq!(device.depth(), 0);
/// assert_eq!(device.commands().len(), 4);
/// assert!(matches!(device.commands()[0], DrawCommand::SaveState));
/// ```
#[derive(Debug, Clone)]
pub struct RecordingDevice {
    commands: Vec<DrawCommand>,
    capabilities: Capabilities,
    char_width: f64,
    font_sizes: Vec<f64>,
    depth: usize,
    max_depth: usize,
    unbalanced_restores: usize,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            capabilities: Capabilities::all(),
            char_width: 0.6,
            font_sizes: vec![0.0],
            depth: 0,
            max_depth: 0,
            unbalanced_restores: 0,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Width of one character as a fraction of the font size.
    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, keeping the drawing state.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current number of unmatched `save_state` calls.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `restore_state` calls made with nothing saved.
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// Text of every label, in drawing order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn font_size(&self) -> f64 {
        self.font_sizes.last().copied().unwrap_or(0.0)
    }

    fn record(&mut self, command: DrawCommand) {
        trace!(?command, "draw");
        self.commands.push(command);
    }
}

impl DrawingDevice for RecordingDevice {
    fn erase(&mut self) {
        self.record(DrawCommand::Erase);
    }

    fn set_space(&mut self, min: DevicePoint, max: DevicePoint) {
        self.record(DrawCommand::SetSpace { min, max });
    }

    fn concat(&mut self, matrix: [f64; 6]) {
        self.record(DrawCommand::Concat(matrix));
    }

    fn save_state(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        let size = self.font_size();
        self.font_sizes.push(size);
        self.record(DrawCommand::SaveState);
    }

    fn restore_state(&mut self) {
        if self.depth == 0 {
            self.unbalanced_restores += 1;
        } else {
            self.depth -= 1;
            self.font_sizes.pop();
        }
        self.record(DrawCommand::RestoreState);
    }

    fn set_pen_color(&mut self, name: &str) {
        self.record(DrawCommand::PenColor(name.to_string()));
    }

    fn set_color(&mut self, name: &str) {
        self.record(DrawCommand::Color(name.to_string()));
    }

    fn set_fill_level(&mut self, level: u32) {
        self.record(DrawCommand::FillLevel(level));
    }

    fn set_line_mode(&mut self, mode: LineMode) {
        self.record(DrawCommand::LineMode(mode));
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawCommand::LineWidth(width));
    }

    fn set_font_name(&mut self, name: &str) {
        self.record(DrawCommand::FontName(name.to_string()));
    }

    fn set_font_size(&mut self, size: f64) -> f64 {
        if let Some(current) = self.font_sizes.last_mut() {
            *current = size;
        }
        self.record(DrawCommand::FontSize(size));
        size
    }

    fn label_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width * self.font_size()
    }

    fn set_text_angle(&mut self, degrees: f64) {
        self.record(DrawCommand::TextAngle(degrees));
    }

    fn move_to(&mut self, p: DevicePoint) {
        self.record(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: DevicePoint) {
        self.record(DrawCommand::LineTo(p));
    }

    fn rect(&mut self, a: DevicePoint, b: DevicePoint) {
        self.record(DrawCommand::Rect { a, b });
    }

    fn label(&mut self, h: HAlign, v: VAlign, text: &str) {
        self.record(DrawCommand::Label {
            h,
            v,
            text: text.to_string(),
        });
    }

    fn marker(&mut self, at: DevicePoint, code: u32, size: f64) {
        self.record(DrawCommand::Marker { at, code, size });
    }

    fn end_path(&mut self) {
        self.record(DrawCommand::EndPath);
    }

    fn flush(&mut self) {
        self.record(DrawCommand::Flush);
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_restore_depth() {
        let mut device = RecordingDevice::new();
        device.save_state();
        device.save_state();
        device.restore_state();
        assert_eq!(device.depth(), 1);
        assert_eq!(device.max_depth(), 2);
        device.restore_state();
        device.restore_state();
        assert_eq!(device.depth(), 0);
        assert_eq!(device.unbalanced_restores(), 1);
    }

    #[test]
    fn test_font_size_is_part_of_state() {
        let mut device = RecordingDevice::new().with_char_width(0.5);
        device.set_font_size(100.0);
        assert_eq!(device.label_width("abcd"), 200.0);

        device.save_state();
        device.set_font_size(10.0);
        assert_eq!(device.label_width("abcd"), 20.0);
        device.restore_state();
        assert_eq!(device.label_width("abcd"), 200.0);
    }

    #[test]
    fn test_capabilities() {
        let device = RecordingDevice::new().with_capabilities(Capabilities::WIDE_LINES);
        assert!(device.has_capability(Capabilities::WIDE_LINES));
        assert!(!device.has_capability(Capabilities::SETTABLE_BACKGROUND));
    }

    #[test]
    fn test_line_default_is_move_then_cont() {
        let mut device = RecordingDevice::new();
        let (a, b) = (DevicePoint::new(1.0, 2.0), DevicePoint::new(3.0, 4.0));
        device.line(a, b);
        assert_eq!(device.take_commands(), vec![DrawCommand::MoveTo(a), DrawCommand::LineTo(b)]);
        assert!(device.commands().is_empty());
    }

    #[test]
    fn test_commands_serialize() {
        let mut device = RecordingDevice::new();
        device.set_line_mode(LineMode::DotDashed);
        device.label(HAlign::Center, VAlign::Top, "10");
        let json = serde_json::to_string(device.commands()).unwrap();
        assert!(json.contains("\"dotdashed\""));
        assert!(json.contains("\"Center\""));
    }
}
