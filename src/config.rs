//! Graph configuration.
//!
//! All structs deserialize with `#[serde(default)]`, so a partial document
//! (JSON, TOML, ...) only needs the settings that differ from the defaults.
//! Sizes are fractions: of the plot box for tick, font and symbol sizes, of
//! the display for plot width, height, margins and line widths.
//!
//! # Examples
//!
//! ```
//! use grafaksel::{GraphConfig, GridStyle};
//!
//! let config: GraphConfig = serde_json::from_str(
//!     r#"{ "grid_style": "axes_at_origin", "x": { "log": true, "label": "f (Hz)" } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.grid_style, GridStyle::AxesAtOrigin);
//! assert!(config.x.log);
//! assert_eq!(config.tick_size, 0.02);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GraphError, GraphResult};

/// Which parts of the frame are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridStyle {
    /// No frame, ticks, labels or title.
    NoAxes,
    /// A pair of axes meeting at the lower left.
    Axes,
    /// A full box, ticked on both sides.
    #[default]
    AxesAndBox,
    /// A box with dotted grid lines at every tick.
    AxesAndBoxAndGrid,
    /// Axes crossing at the origin, or at the limit nearest to it.
    AxesAtOrigin,
}

impl GridStyle {
    /// The style with the given number, `0..=4`, in declaration order.
    pub fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => GridStyle::NoAxes,
            1 => GridStyle::Axes,
            2 => GridStyle::AxesAndBox,
            3 => GridStyle::AxesAndBoxAndGrid,
            4 => GridStyle::AxesAtOrigin,
            _ => return None,
        })
    }

    pub fn has_box(self) -> bool {
        matches!(self, GridStyle::AxesAndBox | GridStyle::AxesAndBoxAndGrid)
    }

    /// Whether ticks point outward from an L-shaped or boxed frame, which
    /// moves the title up when the tick size is negative.
    pub(crate) fn is_plain_frame(self) -> bool {
        matches!(self, GridStyle::Axes | GridStyle::AxesAndBox)
    }
}

/// How a data segment that crosses the plot box edge is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipMode {
    /// Only segments with both ends inside the box are drawn.
    BothInside,
    /// The visible part is drawn when at least one end is inside.
    #[default]
    OneInside,
    /// The visible part is drawn even when both ends are outside.
    Visible,
}

impl ClipMode {
    /// Mode `0`, `1` or `2`.
    pub fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => ClipMode::BothInside,
            1 => ClipMode::OneInside,
            2 => ClipMode::Visible,
            _ => return None,
        })
    }
}

/// Horizontal placement of the legend box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    #[default]
    Left,
    Center,
    Right,
}

impl LegendPosition {
    /// Parse `l`, `c` or `r`.
    pub fn from_letter(letter: char) -> GraphResult<Self> {
        match letter {
            'l' => Ok(LegendPosition::Left),
            'c' => Ok(LegendPosition::Center),
            'r' => Ok(LegendPosition::Right),
            other => Err(GraphError::InvalidLegendPosition(other)),
        }
    }

    /// Like [`from_letter`](Self::from_letter), falling back to the left
    /// with a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::LegendPosition;
    ///
    /// assert_eq!(LegendPosition::from_letter_or_left('r'), LegendPosition::Right);
    /// assert_eq!(LegendPosition::from_letter_or_left('q'), LegendPosition::Left);
    /// ```
    pub fn from_letter_or_left(letter: char) -> Self {
        Self::from_letter(letter).unwrap_or_else(|err| {
            warn!(%err, "legend placed at the left");
            LegendPosition::Left
        })
    }

    /// Horizontal center of the legend as a fraction of the plot box.
    pub fn fraction(self) -> f64 {
        match self {
            LegendPosition::Left => 0.2,
            LegendPosition::Center => 0.5,
            LegendPosition::Right => 0.8,
        }
    }
}

/// A font name and a size as a fraction of the plot box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub name: String,
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: "HersheySerif".to_string(),
            size: 0.0525,
        }
    }
}

/// Settings of one axis, as the user gives them.
///
/// Limits are in true space. An unset limit is computed from the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Tick spacing; on a log axis, the spacing of labelled subsubticks.
    pub spacing: Option<f64>,
    pub log: bool,
    /// Round the limits outward to a tick. Always done for an axis whose
    /// limits both come from the data.
    pub round_to_next_tick: bool,
    /// Put this axis' labels at the far side of the plot.
    pub switch_axis_end: bool,
    pub omit_ticks: bool,
    pub label: Option<String>,
}

/// Where a graph sits on the display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reposition {
    pub scale: f64,
    /// Fractions of the display.
    pub trans_x: f64,
    pub trans_y: f64,
}

impl Default for Reposition {
    fn default() -> Self {
        Self {
            scale: 1.0,
            trans_x: 0.0,
            trans_y: 0.0,
        }
    }
}

/// Everything that shapes one graph of a multigraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub grid_style: GridStyle,
    /// Negative values draw ticks outward.
    pub tick_size: f64,
    /// Font of tick labels and axis labels.
    pub font: FontSpec,
    pub title: Option<String>,
    /// Falls back to the label font when unset.
    pub title_font_name: Option<String>,
    pub title_font_size: f64,
    pub frame_color: String,
    /// `None` for the device default.
    pub frame_line_width: Option<f64>,
    pub plot_width: f64,
    pub plot_height: f64,
    pub margin_left: f64,
    pub margin_below: f64,
    /// Size of the opaque canvas behind a graph, relative to the plot box.
    pub blankout_fraction: f64,
    pub clip_mode: ClipMode,
    pub no_rotate_y_label: bool,
    pub transpose_axes: bool,
    /// Redraw the frame after the data.
    pub frame_on_top: bool,
    /// `None` for no legend.
    pub legend: Option<LegendPosition>,
    pub reposition: Reposition,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            x: AxisConfig::default(),
            y: AxisConfig::default(),
            grid_style: GridStyle::default(),
            tick_size: 0.02,
            font: FontSpec::default(),
            title: None,
            title_font_name: None,
            title_font_size: 0.07,
            frame_color: "black".to_string(),
            frame_line_width: None,
            plot_width: 0.6,
            plot_height: 0.6,
            margin_left: 0.2,
            margin_below: 0.2,
            blankout_fraction: 1.3,
            clip_mode: ClipMode::default(),
            no_rotate_y_label: false,
            transpose_axes: false,
            frame_on_top: false,
            legend: None,
            reposition: Reposition::default(),
        }
    }
}

impl GraphConfig {
    pub fn title_font(&self) -> FontSpec {
        FontSpec {
            name: self.title_font_name.clone().unwrap_or_else(|| self.font.name.clone()),
            size: self.title_font_size,
        }
    }
}

/// Settings fixed for a whole multigraph session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub bg_color: Option<String>,
    /// Keep what is already on the display.
    pub save_screen: bool,
    /// Pen color overrides such as `"1=orange:2=black"`.
    pub pen_colors: Option<String>,
}
