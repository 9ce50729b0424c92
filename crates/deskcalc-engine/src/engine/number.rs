//! Conversions between entry strings and floating-point values.
//!
//! Entries are kept as decimal numerals so the display shows exactly what
//! was typed. Computed values are normalized before they become entries:
//! rounded to [`RESULT_PRECISION`] significant digits, `-0` folded to `0`,
//! and non-finite values rejected.

use super::error::CalcError;

/// Entry text shown while the calculator is in its error state.
pub const ERROR_TEXT: &str = "Error";

/// Significant digits kept from a computed result.
pub const RESULT_PRECISION: usize = 15;

/// Count the digits in an entry, ignoring sign, decimal point and separators.
pub fn digit_count(entry: &str) -> usize {
    entry.bytes().filter(u8::is_ascii_digit).count()
}

/// Parse an entry into a value. Returns `None` for anything that is not a
/// finite decimal numeral, including the error text.
pub fn parse_entry(entry: &str) -> Option<f64> {
    let body = entry.strip_prefix('-').unwrap_or(entry);
    let well_formed = !body.is_empty()
        && body.bytes().any(|b| b.is_ascii_digit())
        && body.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && body.bytes().filter(|&b| b == b'.').count() <= 1;
    if !well_formed {
        return None;
    }
    entry.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round a computed value to [`RESULT_PRECISION`] significant digits.
pub fn normalize(value: f64) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::Overflow);
    }
    if value == 0.0 {
        return Ok(0.0);
    }
    let rounded = format!("{:.*e}", RESULT_PRECISION - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(CalcError::Overflow)
    }
}

/// Render a normalized value as an entry numeral (never exponent notation).
pub fn value_to_entry(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
