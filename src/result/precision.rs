use tracing::trace;

use super::types::{Measurement, Precision};
use crate::error::ParseError;

/// Bring a bare seconds string (digits and at most one '.') to canonical form.
///
/// - no decimal point, or nothing after it: pad to one decimal, `Hand`
/// - one decimal: `Hand`
/// - two decimals: `Auto`, unchanged
/// - three or more: truncate to centiseconds, add 0.01 if any dropped digit
///   is nonzero, `Auto`
///
/// Sub-centisecond remainders always round toward the larger value.
pub fn clean_seconds(seconds: &str) -> Result<Measurement, ParseError> {
    let (whole, decimals) =
        split_bare_number(seconds).ok_or_else(|| ParseError::unrecognized(seconds))?;
    let whole = if whole.is_empty() { "0" } else { whole };

    let (text, precision) = match decimals.len() {
        0 => (format!("{}.0", whole), Precision::Hand),
        1 => (format!("{}.{}", whole, decimals), Precision::Hand),
        2 => (format!("{}.{}", whole, decimals), Precision::Auto),
        _ => (round_up_to_centiseconds(whole, decimals), Precision::Auto),
    };

    let value = text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::unrecognized(seconds))?;

    Ok(Measurement {
        value,
        text,
        precision,
    })
}

/// Parse a bare number such as a minute count ("5", "1.5").
pub(super) fn parse_bare_number(s: &str) -> Option<f64> {
    split_bare_number(s)?;
    let s = if s.starts_with('.') { format!("0{}", s) } else { s.to_string() };
    s.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Split "11.36" into ("11", "36"). Rejects signs, exponents, letters and
/// strings without a digit.
fn split_bare_number(s: &str) -> Option<(&str, &str)> {
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let (whole, decimals) = s.split_once('.').unwrap_or((s, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if all_digits(whole) && all_digits(decimals) {
        Some((whole, decimals))
    } else {
        None
    }
}

/// Carry on the digit string itself so a whole part of any length keeps
/// exact centiseconds.
fn round_up_to_centiseconds(whole: &str, decimals: &str) -> String {
    let (kept, dropped) = decimals.split_at(2);
    let mut digits: Vec<char> = whole.chars().chain(kept.chars()).collect();

    if dropped.chars().any(|c| c != '0') {
        trace!(whole, decimals, "carrying dropped sub-centisecond digits");
        increment_digits(&mut digits);
    }

    let (whole, kept) = digits.split_at(digits.len() - 2);
    format!(
        "{}.{}",
        whole.iter().collect::<String>(),
        kept.iter().collect::<String>()
    )
}

/// Add one to a string of decimal digits, growing it when every digit is 9.
fn increment_digits(digits: &mut Vec<char>) {
    for d in digits.iter_mut().rev() {
        if *d == '9' {
            *d = '0';
        } else {
            *d = char::from(*d as u8 + 1);
            return;
        }
    }
    digits.insert(0, '1');
}
