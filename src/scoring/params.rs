use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::formula::EventKind;
use crate::error::TableError;

const REQUIRED_COLUMNS: [&str; 4] = ["event", "a", "b", "c"];

/// Coefficients for one scoring event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventParameters {
    pub event: String,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// From the optional `kind` column
    pub kind: Option<EventKind>,
}

/// All events of one competition's coefficient table, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    pub events: Vec<EventParameters>,
}

impl ParameterTable {
    /// Load a CSV table with columns `event, a, b, c` and optionally `kind`.
    ///
    /// Header names are matched ignoring case and surrounding whitespace.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), events = table.events.len(), "loaded parameter table");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();

        let index_of = |column: &str| -> Result<usize, TableError> {
            columns
                .get(column)
                .copied()
                .ok_or_else(|| TableError::MissingColumn {
                    column: column.to_string(),
                })
        };
        let [event_idx, a_idx, b_idx, c_idx] = [
            index_of(REQUIRED_COLUMNS[0])?,
            index_of(REQUIRED_COLUMNS[1])?,
            index_of(REQUIRED_COLUMNS[2])?,
            index_of(REQUIRED_COLUMNS[3])?,
        ];
        let kind_idx = columns.get("kind").copied();

        let mut events = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let number = |idx: usize, column: &str| -> Result<f64, TableError> {
                field(idx).parse().map_err(|_| TableError::InvalidValue {
                    row,
                    column: column.to_string(),
                    value: field(idx).to_string(),
                })
            };

            let kind = match kind_idx.map(field) {
                None | Some("") => None,
                Some(value) => Some(value.parse().map_err(|_| TableError::InvalidValue {
                    row,
                    column: "kind".to_string(),
                    value: value.to_string(),
                })?),
            };

            events.push(EventParameters {
                event: field(event_idx).to_string(),
                a: number(a_idx, "a")?,
                b: number(b_idx, "b")?,
                c: number(c_idx, "c")?,
                kind,
            });
        }

        Ok(Self { events })
    }

    /// Look up an event by name, ignoring case and surrounding whitespace.
    pub fn get(&self, event: &str) -> Result<&EventParameters, TableError> {
        let wanted = event.trim();
        self.events
            .iter()
            .find(|p| p.event.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TableError::UnknownEvent {
                event: event.to_string(),
            })
    }
}
