//! Decimal amount parsing and formatting
//!
//! Converts user-typed decimal strings to token base units and back using a
//! fixed decimal scale. Parsing is strict: plain digits with at most one dot,
//! no signs, exponents, or hex.

use alloy_primitives::U256;

use crate::UnitsError;

/// Parse a decimal string into base units at the given scale.
///
/// Accepts `1`, `1.5`, `.5` and `1.`; surrounding whitespace is ignored.
pub fn parse_units(text: &str, decimals: u8) -> Result<U256, UnitsError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::InvalidDigits(text.to_string()));
    }

    let scale = decimals as usize;
    if fraction.len() > scale {
        return Err(UnitsError::TooManyDecimals { max: decimals });
    }

    let mut digits = String::with_capacity(whole.len() + scale);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(scale - fraction.len()));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|_| UnitsError::Overflow)
}

/// Parse a decimal string and require it to be strictly positive.
pub fn parse_positive_units(text: &str, decimals: u8) -> Result<U256, UnitsError> {
    let value = parse_units(text, decimals)?;
    if value.is_zero() {
        return Err(UnitsError::NotPositive);
    }
    Ok(value)
}

/// Format base units as a decimal string at the given scale.
///
/// Trailing fractional zeros are trimmed but one fractional digit is always
/// kept, so whole amounts render as `2500.0`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let scale = decimals as usize;

    let (whole, fraction) = if digits.len() > scale {
        let (w, f) = digits.split_at(digits.len() - scale);
        (w.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = scale))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}
