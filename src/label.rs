//! Tick label text.
//!
//! Label precision is always derived from the tick spacing, never from the
//! value being labelled, so every label on one axis carries the same number
//! of decimals. Axes whose limits reach a magnitude of 10⁴ or 10⁻⁴ switch to
//! `mantissa × 10^exponent` notation.
//!
//! Labels use the device's escape markup: `\sp … \ep` encloses a
//! superscript, `\mu` is the multiplication sign and `\r6` shifts right by a
//! sixth of an em.

use crate::axis::Axis;
use crate::transform::Transform;

/// Largest `|log10|` of an axis limit that still gets plain decimal labels.
const BIG_EXPONENT: f64 = 4.0;

/// Render the label for the tick at true-space `value`.
///
/// `axis` and `transform` must come from the same [`prepare_axis`] call.
///
/// [`prepare_axis`]: crate::prepare_axis
///
/// # Examples
///
/// ```
/// use grafaksel::{AxisParams, format_tick_label, prepare_axis};
///
/// let params = AxisParams { min: 0.0, max: 0.01, spacing: Some(0.001), ..Default::default() };
/// let (axis, transform) = prepare_axis(&params).unwrap();
/// assert_eq!(format_tick_label(&axis, &transform, 0.0034), "0.003");
///
/// let params = AxisParams { min: 0.0, max: 50000.0, ..Default::default() };
/// let (axis, transform) = prepare_axis(&params).unwrap();
/// assert_eq!(format_tick_label(&axis, &transform, 20000.0), "2\\r6\\mu10\\sp4\\ep");
/// ```
pub fn format_tick_label(axis: &Axis, transform: &Transform, value: f64) -> String {
    let min = axis.kind.to_true(transform.input_min);
    let max = axis.kind.to_true(transform.input_max);
    let is_big = |v: f64| v != 0.0 && v.abs().log10().abs() >= BIG_EXPONENT;
    let powers_of_ten = axis.is_log() && axis.user_subsubtick_spacing().is_none();
    let spacing = label_spacing(axis);

    if is_big(min) || is_big(max) {
        let (prefactor, exponent) = split_scientific(value);
        if powers_of_ten {
            return format!("10\\sp{exponent}\\ep");
        }
        if value == 0.0 {
            return "0".to_string();
        }
        let scaled = spacing / 10f64.powf(f64::from(exponent));
        let prec = significant_decimals(&format!("{scaled:.6}"));
        format!("{prefactor:.prec$}\\r6\\mu10\\sp{exponent}\\ep")
    } else {
        if powers_of_ten {
            return format_general(value, 9);
        }
        let prec = significant_decimals(&format!("{spacing:.9}"));
        format!("{value:.prec$}")
    }
}

/// The spacing whose digits set label precision: the tick spacing on a
/// linear axis, the user subsubtick spacing on a log axis.
fn label_spacing(axis: &Axis) -> f64 {
    if axis.is_log() {
        axis.user_subsubtick_spacing().unwrap_or(axis.tick_spacing)
    } else {
        axis.tick_spacing
    }
}

/// Mantissa (rounded to six decimals) and decimal exponent of `value`.
fn split_scientific(value: f64) -> (f64, i32) {
    let text = format!("{value:.6e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => (
            mantissa.parse().unwrap_or(value),
            exponent.parse().unwrap_or(0),
        ),
        None => (value, 0),
    }
}

/// Position of the last non-zero digit after the decimal point.
fn significant_decimals(text: &str) -> usize {
    text.split_once('.')
        .map(|(_, frac)| frac.rfind(|c| c != '0').map_or(0, |i| i + 1))
        .unwrap_or(0)
}

/// `value` with `significant` significant digits and trailing zeros removed,
/// switching to exponent notation for very large or small magnitudes.
///
/// # Examples
///
/// ```
/// use grafaksel::label::format_general;
///
/// assert_eq!(format_general(100.0, 9), "100");
/// assert_eq!(format_general(0.01, 9), "0.01");
/// assert_eq!(format_general(1.0e12, 9), "1e+12");
/// assert_eq!(format_general(0.0, 9), "0");
/// ```
pub fn format_general(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let significant = significant.max(1);
    let sci = format!("{:.*e}", significant - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    let limit = i32::try_from(significant).unwrap_or(i32::MAX);
    if (-4..limit).contains(&exponent) {
        let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
        trim_fraction(format!("{value:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa.to_string()),
            exponent.unsigned_abs()
        )
    }
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisKind, AxisParams, prepare_axis};

    fn linear_axis(min: f64, max: f64, spacing: Option<f64>) -> (Axis, Transform) {
        prepare_axis(&AxisParams {
            min,
            max,
            spacing,
            ..Default::default()
        })
        .unwrap()
    }

    fn log_axis(true_min: f64, true_max: f64, subsubticks: Option<f64>) -> (Axis, Transform) {
        prepare_axis(&AxisParams {
            min: true_min.log10(),
            max: true_max.log10(),
            kind: AxisKind::Log10,
            subsubtick_spacing: subsubticks,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn small_precision_follows_spacing() {
        let (axis, transform) = linear_axis(0.0, 0.01, Some(0.001));
        assert_eq!(format_tick_label(&axis, &transform, 0.0034), "0.003");
        assert_eq!(format_tick_label(&axis, &transform, 0.0), "0.000");
    }

    #[test]
    fn small_precision_is_uniform_across_axis() {
        let (axis, transform) = linear_axis(0.0, 1.0, None);
        let labels: Vec<String> = axis
            .major_ticks(&transform)
            .map(|t| format_tick_label(&axis, &transform, t.value))
            .collect();
        assert_eq!(labels, ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    }

    #[test]
    fn integral_spacing_has_no_decimals() {
        let (axis, transform) = linear_axis(0.0, 47.0, None);
        assert_eq!(format_tick_label(&axis, &transform, 30.0), "30");
    }

    #[test]
    fn big_values_use_mantissa_and_exponent() {
        let (axis, transform) = linear_axis(0.0, 50000.0, None);
        assert_eq!(axis.tick_spacing, 10000.0);
        assert_eq!(format_tick_label(&axis, &transform, 20000.0), "2\\r6\\mu10\\sp4\\ep");
        assert_eq!(format_tick_label(&axis, &transform, 0.0), "0");
    }

    #[test]
    fn big_mantissa_precision_follows_spacing() {
        let (axis, transform) = linear_axis(0.0, 100000.0, Some(25000.0));
        assert_eq!(format_tick_label(&axis, &transform, 25000.0), "2.5\\r6\\mu10\\sp4\\ep");
        assert_eq!(format_tick_label(&axis, &transform, 50000.0), "5.0\\r6\\mu10\\sp4\\ep");
    }

    #[test]
    fn tiny_limits_count_as_big() {
        let (axis, transform) = linear_axis(0.0, 0.00005, Some(0.00001));
        assert_eq!(format_tick_label(&axis, &transform, 0.00002), "2\\r6\\mu10\\sp-5\\ep");
    }

    #[test]
    fn zero_endpoint_is_ignored_for_magnitude() {
        // log10(0) would be -inf; the zero end must not force big labels
        let (axis, transform) = linear_axis(0.0, 10.0, None);
        assert_eq!(format_tick_label(&axis, &transform, 4.0), "4");
    }

    #[test]
    fn log_axis_powers_of_ten() {
        let (axis, transform) = log_axis(0.01, 100.0, None);
        assert_eq!(format_tick_label(&axis, &transform, 0.01), "0.01");
        assert_eq!(format_tick_label(&axis, &transform, 100.0), "100");

        let (axis, transform) = log_axis(1.0, 1e6, None);
        assert_eq!(format_tick_label(&axis, &transform, 1e5), "10\\sp5\\ep");
        assert_eq!(format_tick_label(&axis, &transform, 1.0), "10\\sp0\\ep");
    }

    #[test]
    fn log_axis_user_subsubticks_use_their_spacing() {
        let (axis, transform) = log_axis(1.0, 100.0, Some(2.5));
        assert_eq!(format_tick_label(&axis, &transform, 7.5), "7.5");
        assert_eq!(format_tick_label(&axis, &transform, 10.0), "10.0");
    }

    #[test]
    fn general_format_matches_c() {
        assert_eq!(format_general(123456789.0, 9), "123456789");
        assert_eq!(format_general(1234567890.0, 9), "1.23456789e+09");
        assert_eq!(format_general(0.0001, 9), "0.0001");
        assert_eq!(format_general(0.00001, 9), "1e-05");
        assert_eq!(format_general(-2.5, 9), "-2.5");
    }

    #[test]
    fn significant_decimals_counts_to_last_nonzero() {
        assert_eq!(significant_decimals("0.001000000"), 3);
        assert_eq!(significant_decimals("10.000000"), 0);
        assert_eq!(significant_decimals("2.500000"), 1);
        assert_eq!(significant_decimals("7"), 0);
    }
}
