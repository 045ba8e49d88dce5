//! Conversion between computed numbers and display text.
//!
//! [`format_number`] is the only place a computed `f64` becomes display
//! text, and [`parse_value`] reads display text (including in-progress
//! entry such as `"5."`) back into a number.

/// Text shown while the engine is in the Error state, and for `NaN`.
pub const ERROR_DISPLAY: &str = "Error";
pub const INFINITY_DISPLAY: &str = "∞";
pub const NEG_INFINITY_DISPLAY: &str = "-∞";

/// Magnitudes above this switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e10;
/// Non-zero magnitudes below this switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-10;
/// Fractional digits kept in either notation.
const PRECISION: usize = 10;

/// Format a number for display.
///
/// Values in the readable range use fixed-point with up to 10 decimal
/// places and no trailing zeros; very large or very small magnitudes use
/// scientific notation with 10 fractional digits (`1.0000000000e+11`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return ERROR_DISPLAY.to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            INFINITY_DISPLAY
        } else {
            NEG_INFINITY_DISPLAY
        };
        return text.to_string();
    }

    let magnitude = value.abs();
    if magnitude > SCIENTIFIC_UPPER || (magnitude > 0.0 && magnitude < SCIENTIFIC_LOWER) {
        return format_scientific(value);
    }

    let formatted = format!("{:.*}", PRECISION, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    // -0 and values rounding to it
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Scientific notation with an explicitly signed exponent.
fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.*e}", PRECISION, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Parse display text back into a number.
///
/// Accepts everything [`format_number`] produces plus partial entry like
/// `"5."` or `"-0"`. Text that is not a number yields `NaN`, which formats
/// back to [`ERROR_DISPLAY`].
pub fn parse_value(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        INFINITY_DISPLAY => f64::INFINITY,
        NEG_INFINITY_DISPLAY => f64::NEG_INFINITY,
        _ if is_numeric_text(trimmed) => trimmed.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Rejects the words `f64::from_str` would otherwise accept (`inf`, `NaN`).
fn is_numeric_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}
