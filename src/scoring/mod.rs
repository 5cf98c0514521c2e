pub mod formula;
pub mod params;
pub mod validation;

pub use formula::{score, EventKind, NegativeBasePolicy};
pub use params::{EventParameters, ParameterTable};
pub use validation::validate_table;

use crate::error::ScoreError;
use crate::result::ParsedResult;

/// Points for a converted result. Status codes carry no points.
pub fn score_parsed(
    parsed: &ParsedResult,
    kind: EventKind,
    params: &EventParameters,
    policy: NegativeBasePolicy,
) -> Result<Option<u32>, ScoreError> {
    match parsed {
        ParsedResult::Numeric(m) => score(kind, m.value, params, policy).map(Some),
        ParsedResult::NonNumeric { .. } => Ok(None),
    }
}
