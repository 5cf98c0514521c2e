//! Raw result strings to canonical measurements.
//!
//! `convert` runs the whole pipeline: digit-free status codes pass through
//! untouched, everything else is normalized, matched against the accepted
//! layouts and rounded to canonical precision.

pub mod classify;
pub mod normalize;
pub mod precision;
pub mod shape;
pub mod types;

pub use classify::has_numeric_content;
pub use normalize::normalize_decimal_separators;
pub use precision::clean_seconds;
pub use shape::{detect_shape, parse_time, Shape, Suffix};
pub use types::{Measurement, ParsedResult, Precision};

use crate::error::ParseError;

/// Convert one raw result string.
///
/// Non-numeric inputs come back verbatim as [`ParsedResult::NonNumeric`].
pub fn convert(raw: &str) -> Result<ParsedResult, ParseError> {
    if !has_numeric_content(raw) {
        return Ok(ParsedResult::NonNumeric {
            code: raw.to_string(),
        });
    }

    let normalized = normalize_decimal_separators(raw);
    parse_time(&normalized)
        .map(ParsedResult::Numeric)
        .map_err(|_| ParseError::unrecognized(raw))
}
