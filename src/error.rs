//! Typed failures for result parsing, points calculation and parameter tables.

use thiserror::Error;

/// A numeric-looking result that matches none of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unrecognized result format: '{input}'")]
    UnrecognizedFormat { input: String },
}

impl ParseError {
    pub(crate) fn unrecognized(input: &str) -> Self {
        ParseError::UnrecognizedFormat {
            input: input.to_string(),
        }
    }
}

/// Failures of the points formula.
///
/// `InvalidPerformance` is about the athlete's mark; the others point at
/// bad coefficients in the parameter table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// Performance lies beyond the formula's zero-point threshold.
    #[error("performance outside the scoring table (base {base} is negative)")]
    InvalidPerformance { base: f64 },

    /// Exponentiation did not produce a finite real number.
    #[error("points formula produced a non-real result (base {base}, exponent {exponent})")]
    ComplexResult { base: f64, exponent: f64 },

    #[error("points formula produced a negative score ({points})")]
    NegativePoints { points: f64 },

    /// Finite, but larger than a points total can hold.
    #[error("points formula produced {points}, beyond the largest representable score")]
    PointsOverflow { points: f64 },
}

/// Why a single roster row produced no points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    #[error("no event kind for '{event}' (add a kind column to the table or pass --kind)")]
    MissingKind { event: String },
}

/// Errors raised while loading or querying a coefficient table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read parameter table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter table: {0}")]
    Csv(#[from] csv::Error),

    #[error("parameter table is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    #[error("invalid parameter table:\n  - {}", .0.join("\n  - "))]
    Invalid(Vec<String>),
}
