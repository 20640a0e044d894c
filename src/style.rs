//! Data line styles: dash patterns and pen colors.
//!
//! A polyline's integer line style picks a dash pattern and, in color
//! mode, one of five pen colors. Styles `1..=5` are solid lines in the five
//! colors, `6..=10` short-dashed lines in the same colors, and so on. In
//! monochrome mode the style only selects the dash pattern and everything is
//! drawn in the frame color. Styles `<= 0` draw no line but still pick the
//! color used for symbols.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::device::LineMode;
use crate::error::{GraphError, GraphResult};

/// Number of pens, and of dash patterns.
pub const NUM_PENS: usize = 5;

/// Longest color name a pen string may assign.
pub const MAX_COLOR_NAME_LEN: usize = 32;

/// Colors of the five data pens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenColors(pub [String; NUM_PENS]);

impl Default for PenColors {
    fn default() -> Self {
        Self(["red", "green", "blue", "magenta", "cyan"].map(String::from))
    }
}

impl PenColors {
    pub fn get(&self, index: usize) -> &str {
        &self.0[index % NUM_PENS]
    }

    /// Apply a pen string such as `"1=orange:3=black"`.
    ///
    /// Entries are separated by colons. Each bad entry is skipped with a
    /// warning and the rest still apply. Returns the rejected entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::PenColors;
    ///
    /// let mut pens = PenColors::default();
    /// let rejected = pens.apply_pen_string("1=orange:9=black:3=gray");
    /// assert_eq!(pens.get(0), "orange");
    /// assert_eq!(pens.get(2), "gray");
    /// assert_eq!(rejected.len(), 1);
    /// ```
    pub fn apply_pen_string(&mut self, pens: &str) -> Vec<GraphError> {
        let mut rejected = Vec::new();
        for entry in pens.split(':').filter(|e| !e.is_empty()) {
            match parse_pen_entry(entry) {
                Ok((pen, name)) => self.0[pen - 1] = name.to_string(),
                Err(err) => {
                    warn!(%err, "pen entry disregarded");
                    rejected.push(err);
                }
            }
        }
        rejected
    }
}

/// Split one `n=color` entry into a pen number in `1..=5` and a color name.
fn parse_pen_entry(entry: &str) -> GraphResult<(usize, &str)> {
    let invalid = || GraphError::InvalidPenEntry(entry.to_string());
    let (number, name) = entry.split_once('=').ok_or_else(invalid)?;
    let pen: usize = number.parse().map_err(|_| invalid())?;
    if !(1..=NUM_PENS).contains(&pen) || name.is_empty() || name.len() >= MAX_COLOR_NAME_LEN {
        return Err(invalid());
    }
    Ok((pen, name))
}

/// The dash pattern and color a data line style resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStyle {
    /// `None` when the style draws no line, so the pattern is left alone.
    pub mode: Option<LineMode>,
    pub color: String,
}

/// Resolve integer line `style` to a dash pattern and color.
///
/// # Examples
///
/// ```
/// use grafaksel::{LineMode, PenColors, line_style_for};
///
/// let pens = PenColors::default();
/// let style = line_style_for(7, true, "black", &pens);
/// assert_eq!(style.mode, Some(LineMode::ShortDashed));
/// assert_eq!(style.color, "green");
///
/// let mono = line_style_for(3, false, "black", &pens);
/// assert_eq!(mono.mode, Some(LineMode::Dotted));
/// assert_eq!(mono.color, "black");
/// ```
pub fn line_style_for(style: i32, use_color: bool, frame_color: &str, pens: &PenColors) -> LineStyle {
    let index = |i: i32| usize::try_from(i).unwrap_or(0);

    if !use_color {
        return LineStyle {
            mode: (style > 0).then(|| LineMode::ALL[index((style - 1) % NUM_PENS as i32)]),
            color: frame_color.to_string(),
        };
    }

    let n = NUM_PENS as i32;
    let (mode, pen) = match style {
        s if s > 0 => (Some(LineMode::ALL[index(((s - 1) / n) % n)]), index((s - 1) % n)),
        0 => (None, 0),
        s => (None, index((-s - 1) % (n - 1))),
    };
    LineStyle {
        mode,
        color: pens.get(pen).to_string(),
    }
}
