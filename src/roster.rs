//! Batch scoring of a whole start list.
//!
//! Entries share no state, so they are scored in parallel; output order always
//! matches input order.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;
use tracing::debug;

use crate::error::EntryError;
use crate::result::{convert, Measurement, ParsedResult};
use crate::scoring::{score, EventKind, NegativeBasePolicy, ParameterTable};

/// One row of a roster CSV (`athlete, event, result`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RosterEntry {
    pub athlete: String,
    pub event: String,
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Scored { measurement: Measurement, points: u32 },
    /// Status code passed through without points
    NonNumeric { code: String },
    Failed {
        #[serde(rename = "reason", serialize_with = "serialize_reason")]
        error: EntryError,
    },
}

fn serialize_reason<S: Serializer>(
    error: &EntryError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub athlete: String,
    pub event: String,
    pub raw: String,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

/// Read a roster CSV with a header row `athlete,event,result`.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open roster file at {}", path.display()))?;

    let entries = reader
        .deserialize()
        .collect::<Result<Vec<RosterEntry>, _>>()
        .with_context(|| format!("Failed to parse roster file at {}", path.display()))?;

    debug!(path = %path.display(), entries = entries.len(), "loaded roster");
    Ok(entries)
}

/// Convert and score every entry. One bad row never aborts the batch.
///
/// `kind` overrides the table's `kind` column for every event.
pub fn score_roster(
    entries: &[RosterEntry],
    table: &ParameterTable,
    kind: Option<EventKind>,
    policy: NegativeBasePolicy,
) -> Vec<ScoredEntry> {
    entries
        .par_iter()
        .map(|entry| ScoredEntry {
            athlete: entry.athlete.clone(),
            event: entry.event.clone(),
            raw: entry.result.clone(),
            outcome: score_entry(entry, table, kind, policy),
        })
        .collect()
}

fn score_entry(
    entry: &RosterEntry,
    table: &ParameterTable,
    kind: Option<EventKind>,
    policy: NegativeBasePolicy,
) -> EntryOutcome {
    let measurement = match convert(&entry.result) {
        Ok(ParsedResult::Numeric(m)) => m,
        Ok(ParsedResult::NonNumeric { code }) => return EntryOutcome::NonNumeric { code },
        Err(e) => return failed(e),
    };

    let Ok(params) = table.get(&entry.event) else {
        return failed(EntryError::UnknownEvent {
            event: entry.event.clone(),
        });
    };

    let Some(kind) = kind.or(params.kind) else {
        return failed(EntryError::MissingKind {
            event: params.event.clone(),
        });
    };

    match score(kind, measurement.value, params, policy) {
        Ok(points) => EntryOutcome::Scored { measurement, points },
        Err(e) => failed(e),
    }
}

fn failed(error: impl Into<EntryError>) -> EntryOutcome {
    EntryOutcome::Failed {
        error: error.into(),
    }
}
