use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::error::ParseError;
use crate::result::ParsedResult;
use crate::roster::{EntryOutcome, ScoredEntry};

/// One converted input, as shown by the `convert` command
pub struct Conversion<'a> {
    pub raw: &'a str,
    pub outcome: Result<ParsedResult, ParseError>,
}

#[derive(Serialize)]
struct ConversionRecord<'a> {
    raw: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ParsedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format conversions one per line: "{raw}  ->  {canonical} ({precision})"
pub fn format_conversions(rows: &[Conversion], use_colors: bool) -> String {
    let raw_width = rows.iter().map(|r| r.raw.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|row| {
            let raw = format!("{:<width$}", quoted(row.raw), width = raw_width + 2);
            let detail = match &row.outcome {
                Ok(ParsedResult::Numeric(m)) => {
                    let tag = m.precision.to_string();
                    if use_colors {
                        format!("{} ({})", m.text.bold(), tag.dimmed())
                    } else {
                        format!("{} ({})", m.text, tag)
                    }
                }
                Ok(ParsedResult::NonNumeric { code }) => {
                    let label = format!("{} (no mark)", quoted(code));
                    if use_colors {
                        label.yellow().to_string()
                    } else {
                        label
                    }
                }
                Err(e) => {
                    let label = format!("error: {}", e);
                    if use_colors {
                        label.red().to_string()
                    } else {
                        label
                    }
                }
            };
            format!("{}  ->  {}", raw, detail)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format conversions as tab-separated values: raw, canonical, precision.
/// Status codes leave the precision column empty; errors put the message there.
pub fn format_conversions_tsv(rows: &[Conversion]) -> String {
    rows.iter()
        .map(|row| match &row.outcome {
            Ok(ParsedResult::Numeric(m)) => format!("{}\t{}\t{}", row.raw, m.text, m.precision),
            Ok(ParsedResult::NonNumeric { code }) => format!("{}\t{}\t", row.raw, code),
            Err(e) => format!("{}\t\terror: {}", row.raw, e),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_conversions_json(rows: &[Conversion]) -> serde_json::Result<String> {
    let records: Vec<_> = rows
        .iter()
        .map(|row| ConversionRecord {
            raw: row.raw,
            result: row.outcome.as_ref().ok(),
            error: row.outcome.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format scored roster rows as a table: index, points, athlete, event, mark.
/// Rows without points show "-" in the points column and the reason after the mark.
pub fn format_roster_table(rows: &[ScoredEntry], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No roster entries found.".to_string();
    }

    let points_width = 5;
    let event_width = rows.iter().map(|r| r.event.chars().count()).max().unwrap_or(0);
    let athlete_cap = rows.iter().map(|r| r.athlete.chars().count()).max().unwrap_or(0);
    let separator = "  ";

    // index(3) + space + points + separators + event + mark column (~12)
    let fixed_width = 4 + points_width + separator.len() * 3 + event_width + 12;
    let athlete_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => athlete_cap.min(width - fixed_width),
        Some(_) => athlete_cap.min(20),
        None => athlete_cap,
    };

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let athlete = format!(
                "{:<width$}",
                truncate_name(&row.athlete, athlete_width),
                width = athlete_width
            );
            let event = format!("{:<width$}", row.event, width = event_width);

            let (points, mark) = match &row.outcome {
                EntryOutcome::Scored { measurement, points } => {
                    (points.to_string(), measurement.to_string())
                }
                EntryOutcome::NonNumeric { code } => ("-".to_string(), quoted(code)),
                EntryOutcome::Failed { error } => {
                    ("-".to_string(), format!("{} ({})", quoted(&row.raw), error))
                }
            };
            let points = format!("{:>width$}", points, width = points_width);

            if use_colors {
                let mark = match &row.outcome {
                    EntryOutcome::Scored { .. } => mark,
                    EntryOutcome::NonNumeric { .. } => mark.yellow().to_string(),
                    EntryOutcome::Failed { .. } => mark.red().to_string(),
                };
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    points.bold(),
                    separator,
                    athlete,
                    separator,
                    event.cyan(),
                    separator,
                    mark
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, points, separator, athlete, separator, event, separator, mark
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format roster rows as tab-separated values for scripting
/// Columns: athlete, event, raw, canonical, precision, points, error (no headers, no colors)
pub fn format_roster_tsv(rows: &[ScoredEntry]) -> String {
    rows.iter()
        .map(|row| {
            let (canonical, precision, points, error) = match &row.outcome {
                EntryOutcome::Scored { measurement, points } => (
                    measurement.text.clone(),
                    measurement.precision.to_string(),
                    points.to_string(),
                    String::new(),
                ),
                EntryOutcome::NonNumeric { code } => {
                    (code.clone(), String::new(), String::new(), String::new())
                }
                EntryOutcome::Failed { error } => {
                    (String::new(), String::new(), String::new(), error.to_string())
                }
            };
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                row.athlete, row.event, row.raw, canonical, precision, points, error
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_roster_json(rows: &[ScoredEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::result::{convert, Measurement, Precision};

    fn conversion(raw: &str) -> Conversion<'_> {
        Conversion {
            raw,
            outcome: convert(raw),
        }
    }

    fn scored(athlete: &str, event: &str, raw: &str, outcome: EntryOutcome) -> ScoredEntry {
        ScoredEntry {
            athlete: athlete.to_string(),
            event: event.to_string(),
            raw: raw.to_string(),
            outcome,
        }
    }

    fn sample_rows() -> Vec<ScoredEntry> {
        vec![
            scored(
                "Ada Lovelace",
                "100m",
                "10,83",
                EntryOutcome::Scored {
                    measurement: Measurement {
                        value: 10.83,
                        text: "10.83".to_string(),
                        precision: Precision::Auto,
                    },
                    points: 899,
                },
            ),
            scored(
                "Bea",
                "long jump",
                "nm",
                EntryOutcome::NonNumeric {
                    code: "nm".to_string(),
                },
            ),
            scored(
                "Cleo",
                "100m",
                "19.00",
                EntryOutcome::Failed {
                    error: ScoreError::InvalidPerformance { base: -1.0 }.into(),
                },
            ),
        ]
    }

    #[test]
    fn test_format_conversions_plain() {
        let rows = vec![conversion("11.363"), conversion("dnf"), conversion("5x3")];
        let result = format_conversions(&rows, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("->  11.37 (auto)"));
        assert!(lines[1].ends_with("->  \"dnf\" (no mark)"));
        assert!(lines[2].contains("error: unrecognized result format"));
    }

    #[test]
    fn test_format_conversions_tsv() {
        let rows = vec![conversion("11"), conversion("dq")];
        assert_eq!(format_conversions_tsv(&rows), "11\t11.0\thand\ndq\tdq\t");
    }

    #[test]
    fn test_format_conversions_json() {
        let rows = vec![conversion("5:09.01"), conversion("1:2:3")];
        let json = format_conversions_json(&rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["result"]["type"], "numeric");
        assert_eq!(value[0]["result"]["text"], "309.01");
        assert_eq!(value[0]["result"]["precision"], "auto");
        assert!(value[1]["error"].as_str().unwrap().contains("1:2:3"));
        assert!(value[1].get("result").is_none());
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Ada", 20), "Ada");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Jackie Joyner-Kersee", 10), "Jackie ...");
    }

    #[test]
    fn test_truncate_name_unicode() {
        assert_eq!(truncate_name("Ashton Éaton", 12), "Ashton Éaton");
        assert_eq!(truncate_name("Ashton Éaton", 9), "Ashton...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_roster_table_empty() {
        assert_eq!(format_roster_table(&[], false), "No roster entries found.");
    }

    #[test]
    fn test_format_roster_table_rows() {
        let result = format_roster_table(&sample_rows(), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("  899"));
        assert!(lines[0].ends_with("10.83"));
        assert!(lines[1].contains("    -"));
        assert!(lines[1].ends_with("\"nm\""));
        assert!(lines[2].contains("outside the scoring table"));
    }

    #[test]
    fn test_format_roster_table_hand_mark() {
        let rows = vec![scored(
            "Ada",
            "100m",
            "10.8",
            EntryOutcome::Scored {
                measurement: Measurement {
                    value: 10.8,
                    text: "10.8".to_string(),
                    precision: Precision::Hand,
                },
                points: 906,
            },
        )];
        assert!(format_roster_table(&rows, false).ends_with("10.8h"));
    }

    #[test]
    fn test_format_roster_tsv() {
        let result = format_roster_tsv(&sample_rows());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "Ada Lovelace\t100m\t10,83\t10.83\tauto\t899\t");
        assert_eq!(lines[1], "Bea\tlong jump\tnm\tnm\t\t\t");
        assert_eq!(lines[2].split('\t').count(), 7);
        assert!(lines[2].ends_with("\tperformance outside the scoring table (base -1 is negative)"));
    }

    #[test]
    fn test_format_roster_json() {
        let json = format_roster_json(&sample_rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["status"], "scored");
        assert_eq!(value[0]["points"], 899);
        assert_eq!(value[1]["status"], "non_numeric");
        assert_eq!(value[2]["status"], "failed");
        assert_eq!(
            value[2]["reason"],
            "performance outside the scoring table (base -1 is negative)"
        );
        assert!(value[2].get("error").is_none());
    }
}
