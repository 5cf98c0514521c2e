pub mod formatter;

pub use formatter::{
    format_conversions, format_conversions_json, format_conversions_tsv, format_roster_json,
    format_roster_table, format_roster_tsv, should_use_colors, Conversion,
};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable table
    #[default]
    Table,
    /// Tab-separated values, no headers, no colors
    Tsv,
    /// Pretty-printed JSON
    Json,
}
