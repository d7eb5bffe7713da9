//! Thousands grouping for monetary input and display
//!
//! Amounts are typed as plain digits and shown grouped with a separator every
//! three digits from the right ("80000000" -> "80.000.000"). Stripping the
//! separators and reformatting is lossless for integer amounts.

use std::num::ParseIntError;

/// Separator used by the portal (es-CL grouping)
pub const THOUSANDS_SEPARATOR: char = '.';

/// Keep only the ASCII digits of `input`
pub fn strip_separators(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Strip non-digits and group the remainder with the default separator
pub fn format_thousands(input: &str) -> String {
    format_thousands_with(input, THOUSANDS_SEPARATOR)
}

/// Strip non-digits and group the remainder with `separator`.
/// Leading zeros are kept as typed.
pub fn format_thousands_with(input: &str, separator: char) -> String {
    let digits = strip_separators(input);
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Parse a typed amount. `Ok(None)` when the input holds no digits.
pub fn parse_amount(input: &str) -> Result<Option<u64>, ParseIntError> {
    let digits = strip_separators(input);
    if digits.is_empty() {
        return Ok(None);
    }
    digits.parse().map(Some)
}

/// Group an integer amount with `separator`
pub fn format_amount(amount: u64, separator: char) -> String {
    format_thousands_with(&amount.to_string(), separator)
}

/// Round a computed payment to whole currency units and group it.
///
/// This is the only place payments are rounded.
pub fn format_payment(amount: f64, separator: char) -> String {
    let rounded = amount.round();
    if !rounded.is_finite() || rounded < 0.0 {
        return format!("{}", rounded);
    }
    format_amount(rounded as u64, separator)
}
