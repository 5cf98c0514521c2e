use tracing::debug;

use super::precision::{clean_seconds, parse_bare_number};
use super::types::{Measurement, Precision};
use crate::error::ParseError;

/// The textual layouts a numeric result may take, in match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// "5:09.01"
    Colon,
    /// "5m9.01s"
    MinuteLetter,
    /// "11.5h" or "11.36s"
    UnitSuffix(Suffix),
    /// "11.36"
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    Hand,
    Seconds,
}

/// Decide which layout a normalized string uses. First match wins.
pub fn detect_shape(normalized: &str) -> Option<Shape> {
    if normalized.contains(':') {
        return Some(Shape::Colon);
    }

    let compact = strip_whitespace(normalized);
    if compact.contains('m') && compact.ends_with('s') {
        Some(Shape::MinuteLetter)
    } else if compact.ends_with('h') {
        Some(Shape::UnitSuffix(Suffix::Hand))
    } else if compact.ends_with('s') {
        Some(Shape::UnitSuffix(Suffix::Seconds))
    } else if parse_bare_number(&compact).is_some() {
        Some(Shape::Plain)
    } else {
        None
    }
}

/// Parse a normalized (comma-free, lower-cased) numeric string into seconds.
pub fn parse_time(normalized: &str) -> Result<Measurement, ParseError> {
    let shape = detect_shape(normalized).ok_or_else(|| ParseError::unrecognized(normalized))?;
    debug!(input = normalized, ?shape, "matched result shape");

    let compact = strip_whitespace(normalized);
    let parsed = match shape {
        Shape::Colon => {
            let (minutes, seconds) = normalized
                .split_once(':')
                .ok_or_else(|| ParseError::unrecognized(normalized))?;
            combine_minutes(&strip_whitespace(minutes), &strip_whitespace(seconds))
        }
        Shape::MinuteLetter => {
            let (minutes, rest) = compact
                .split_once('m')
                .ok_or_else(|| ParseError::unrecognized(normalized))?;
            let seconds = rest.strip_suffix('s').unwrap_or(rest);
            combine_minutes(minutes, seconds)
        }
        Shape::UnitSuffix(suffix) => {
            let stem = &compact[..compact.len() - 1];
            clean_seconds(stem).map(|mut m| {
                if suffix == Suffix::Hand {
                    m.precision = Precision::Hand;
                }
                m
            })
        }
        Shape::Plain => clean_seconds(&compact),
    };

    parsed.map_err(|_| ParseError::unrecognized(normalized))
}

/// `minutes * 60 + seconds`, keeping the decimal places of the seconds part.
fn combine_minutes(minutes: &str, seconds: &str) -> Result<Measurement, ParseError> {
    let minutes = parse_bare_number(minutes).ok_or_else(|| ParseError::unrecognized(minutes))?;
    let seconds = clean_seconds(seconds)?;

    let places = seconds
        .text
        .split_once('.')
        .map(|(_, decimals)| decimals.len())
        .unwrap_or(0);
    let total = minutes * 60.0 + seconds.value;
    if !total.is_finite() {
        return Err(ParseError::unrecognized(&seconds.text));
    }
    let text = format!("{:.*}", places, total);
    let value = text
        .parse::<f64>()
        .map_err(|_| ParseError::unrecognized(&text))?;

    Ok(Measurement {
        value,
        text,
        precision: seconds.precision,
    })
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
