//! Data points and the polyline attributes they carry.

use serde::{Deserialize, Serialize};

use crate::device::MARKER_DOT;

/// What is drawn at a data point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Nothing, not even a dot.
    None,
    /// Marker code 0: nothing on a line, a dot when no line is drawn.
    #[default]
    Plain,
    /// One of the device's marker symbols, codes `1..=31`.
    Marker(u32),
    /// A character from the symbol font.
    Glyph(char),
}

impl Symbol {
    /// Interpret a numeric symbol code: negative for none, `0..=31` for
    /// markers, anything above for a character.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::Symbol;
    ///
    /// assert_eq!(Symbol::from_code(-1), Symbol::None);
    /// assert_eq!(Symbol::from_code(0), Symbol::Plain);
    /// assert_eq!(Symbol::from_code(4), Symbol::Marker(4));
    /// assert_eq!(Symbol::from_code(65), Symbol::Glyph('A'));
    /// ```
    pub fn from_code(code: i32) -> Self {
        match u32::try_from(code) {
            Err(_) => Symbol::None,
            Ok(0) => Symbol::Plain,
            Ok(c @ 1..=31) => Symbol::Marker(c),
            Ok(c) => char::from_u32(c).map_or(Symbol::None, Symbol::Glyph),
        }
    }

    /// The code passed to [`DrawingDevice::marker`](crate::DrawingDevice::marker).
    pub fn code(self) -> Option<u32> {
        match self {
            Symbol::None => None,
            Symbol::Plain => Some(MARKER_DOT),
            Symbol::Marker(c) => Some(c),
            Symbol::Glyph(c) => Some(u32::from(c)),
        }
    }
}

/// Extent of an error bar along one axis, in true space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorBar {
    pub min: f64,
    pub max: f64,
}

impl ErrorBar {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Attributes shared by every point of a polyline.
///
/// The renderer reads them from the first point of each polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    /// Data line style, see [`line_style_for`](crate::line_style_for).
    /// `<= 0` draws no line.
    pub line_mode: i32,
    pub use_color: bool,
    /// Fraction of the display size; negative for the device default.
    pub line_width: f64,
    /// Fill darkness in `[0, 1]`, or `None` for an unfilled polyline.
    pub fill_fraction: Option<f64>,
    pub symbol: Symbol,
    /// Fraction of the plot box.
    pub symbol_size: f64,
    /// Font that [`Symbol::Glyph`] characters come from.
    pub symbol_font: String,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            line_mode: 1,
            use_color: false,
            line_width: -0.0,
            fill_fraction: None,
            symbol: Symbol::Plain,
            symbol_size: 0.03,
            symbol_font: "ZapfDingbats".to_string(),
        }
    }
}

impl PointStyle {
    /// Device fill level: `0` unfilled, `1` darkest, `0xffff` lightest.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::PointStyle;
    ///
    /// let mut style = PointStyle::default();
    /// assert_eq!(style.fill_level(), 0);
    /// style.fill_fraction = Some(1.0);
    /// assert_eq!(style.fill_level(), 1);
    /// style.fill_fraction = Some(0.0);
    /// assert_eq!(style.fill_level(), 0xffff);
    /// ```
    pub fn fill_level(&self) -> u32 {
        match self.fill_fraction {
            Some(f) if f >= 0.0 => {
                let shade = ((1.0 - f.min(1.0)) * f64::from(0xfffe_u32)).round();
                1 + shade as u32
            }
            _ => 0,
        }
    }

    pub fn draws_line(&self) -> bool {
        self.line_mode > 0
    }
}

/// One data point, in true space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub x_errorbar: Option<ErrorBar>,
    pub y_errorbar: Option<ErrorBar>,
    /// Connect to the previous point. `false` starts a new polyline.
    pub pendown: bool,
    pub style: PointStyle,
}

impl Point {
    /// A connected point with the default style.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            x_errorbar: None,
            y_errorbar: None,
            pendown: true,
            style: PointStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }

    pub fn pen_up(mut self) -> Self {
        self.pendown = false;
        self
    }

    pub fn with_x_errorbar(mut self, min: f64, max: f64) -> Self {
        self.x_errorbar = Some(ErrorBar::new(min, max));
        self
    }

    pub fn with_y_errorbar(mut self, min: f64, max: f64) -> Self {
        self.y_errorbar = Some(ErrorBar::new(min, max));
        self
    }

    /// The point with its coordinates and error bars exchanged.
    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            x_errorbar: self.y_errorbar,
            y_errorbar: self.x_errorbar,
            ..self
        }
    }

    pub fn has_errorbar(&self) -> bool {
        self.x_errorbar.is_some() || self.y_errorbar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transposed_swaps_errorbars() {
        let p = Point::new(1.0, 2.0).with_x_errorbar(0.5, 1.5);
        let t = p.clone().transposed();
        assert_eq!((t.x, t.y), (2.0, 1.0));
        assert_eq!(t.x_errorbar, None);
        assert_eq!(t.y_errorbar, Some(ErrorBar::new(0.5, 1.5)));
        assert_eq!(t.transposed(), p);
    }

    #[test]
    fn test_symbol_codes() {
        assert_eq!(Symbol::Plain.code(), Some(MARKER_DOT));
        assert_eq!(Symbol::None.code(), None);
        assert_eq!(Symbol::from_code(31), Symbol::Marker(31));
        assert_eq!(Symbol::from_code(32), Symbol::Glyph(' '));
        assert_eq!(Symbol::Glyph('*').code(), Some(42));
    }

    #[test]
    fn test_fill_level_midpoint() {
        let style = PointStyle {
            fill_fraction: Some(0.5),
            ..Default::default()
        };
        assert_eq!(style.fill_level(), 1 + 0x7fff);
    }

    #[test]
    fn test_style_deserializes_partially() {
        let style: PointStyle = serde_json::from_str(r#"{"line_mode": 3, "symbol": {"Marker": 4}}"#).unwrap();
        assert_eq!(style.line_mode, 3);
        assert_eq!(style.symbol, Symbol::Marker(4));
        assert_eq!(style.symbol_font, "ZapfDingbats");
    }
}
