use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use multi_event_points::config::{self, Config};
use multi_event_points::output::{self, Conversion, OutputFormat};
use multi_event_points::roster::{self, EntryOutcome, ScoredEntry};
use multi_event_points::scoring::{self, EventKind, NegativeBasePolicy, ParameterTable};
use multi_event_points::{convert, ParsedResult, TableError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_SCORING: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert raw results to canonical measurements
    Convert {
        /// Raw results, e.g. "11,36" "10.9h" "4:29.5" "dnf"
        #[arg(required = true)]
        results: Vec<String>,
    },
    /// Convert and score a single result
    Score {
        /// Event name as it appears in the parameter table
        #[arg(short, long)]
        event: String,

        #[command(flatten)]
        table: TableArgs,

        /// Raw result
        result: String,
    },
    /// Score every row of a roster CSV (athlete,event,result)
    Roster {
        #[command(flatten)]
        table: TableArgs,

        /// Path to the roster CSV
        path: PathBuf,
    },
    /// Check a parameter table and list every problem found
    ValidateTable {
        /// Path to the CSV coefficient table
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Path to a CSV coefficient table (event,a,b,c[,kind])
    #[arg(short, long, conflicts_with = "competition", required_unless_present = "competition")]
    table: Option<PathBuf>,

    /// Competition whose table is configured in the config file
    #[arg(long)]
    competition: Option<String>,

    /// Formula branch for every event, overriding the table's kind column
    #[arg(short, long)]
    kind: Option<EventKind>,
}

#[derive(Parser, Debug)]
#[command(name = "multi-event-points")]
#[command(about = "Normalize athletics results and score combined events", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/multi-event-points/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Score 0 instead of failing when a performance is beyond a table's zero point
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    multi_event_points::telemetry::init_tracing(cli.verbose);

    let config = match config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let policy = if cli.lenient {
        NegativeBasePolicy::Zero
    } else {
        config.negative_base
    };
    debug!(?policy, "negative base policy");

    let use_colors = !cli.no_color && output::should_use_colors();

    let code = match &cli.command {
        Commands::Convert { results } => run_convert(results, cli.format, use_colors),
        Commands::Score {
            event,
            table,
            result,
        } => run_score(event, table, result, &config, policy, cli.format, use_colors),
        Commands::Roster { table, path } => {
            run_roster(table, path, &config, policy, cli.format, use_colors)
        }
        Commands::ValidateTable { path } => run_validate_table(path),
    };

    std::process::exit(code);
}

fn run_convert(results: &[String], format: OutputFormat, use_colors: bool) -> i32 {
    let rows: Vec<Conversion> = results
        .iter()
        .map(|raw| Conversion {
            raw,
            outcome: convert(raw),
        })
        .collect();

    print_or_fail(match format {
        OutputFormat::Table => Ok(output::format_conversions(&rows, use_colors)),
        OutputFormat::Tsv => Ok(output::format_conversions_tsv(&rows)),
        OutputFormat::Json => output::format_conversions_json(&rows),
    });

    if rows.iter().any(|row| row.outcome.is_err()) {
        EXIT_INPUT
    } else {
        EXIT_SUCCESS
    }
}

fn run_score(
    event: &str,
    table_args: &TableArgs,
    raw: &str,
    config: &Config,
    policy: NegativeBasePolicy,
    format: OutputFormat,
    use_colors: bool,
) -> i32 {
    let table = match load_table(table_args, config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Parameter table error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let params = match table.get(event) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_CONFIG;
        }
    };

    let Some(kind) = table_args.kind.or(params.kind) else {
        eprintln!(
            "No event kind for '{}'. Pass --kind track|field or add a kind column to the table.",
            params.event
        );
        return EXIT_CONFIG;
    };

    let parsed = match convert(raw) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_INPUT;
        }
    };

    let (outcome, code) = match parsed {
        ParsedResult::NonNumeric { code } => (EntryOutcome::NonNumeric { code }, EXIT_SUCCESS),
        ParsedResult::Numeric(measurement) => {
            match scoring::score(kind, measurement.value, params, policy) {
                Ok(points) => (EntryOutcome::Scored { measurement, points }, EXIT_SUCCESS),
                Err(e) => (
                    EntryOutcome::Failed { error: e.into() },
                    EXIT_SCORING,
                ),
            }
        }
    };

    let rows = vec![ScoredEntry {
        athlete: String::new(),
        event: params.event.clone(),
        raw: raw.to_string(),
        outcome,
    }];
    print_rows(&rows, format, use_colors);
    code
}

fn run_roster(
    table_args: &TableArgs,
    path: &std::path::Path,
    config: &Config,
    policy: NegativeBasePolicy,
    format: OutputFormat,
    use_colors: bool,
) -> i32 {
    let table = match load_table(table_args, config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Parameter table error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let entries = match roster::load_roster(path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Roster error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let rows = roster::score_roster(&entries, &table, table_args.kind, policy);
    let failed = rows
        .iter()
        .filter(|row| matches!(row.outcome, EntryOutcome::Failed { .. }))
        .count();
    info!(entries = rows.len(), failed, "scored roster");

    print_rows(&rows, format, use_colors);

    if failed > 0 {
        eprintln!("{} of {} entries could not be scored", failed, rows.len());
        EXIT_SCORING
    } else {
        EXIT_SUCCESS
    }
}

fn run_validate_table(path: &std::path::Path) -> i32 {
    let table = match ParameterTable::load(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Parameter table error: {}", e);
            return EXIT_CONFIG;
        }
    };

    match scoring::validate_table(&table) {
        Ok(()) => {
            println!("{}: {} events OK", path.display(), table.events.len());
            EXIT_SUCCESS
        }
        Err(errors) => {
            eprintln!("{}", TableError::Invalid(errors));
            EXIT_CONFIG
        }
    }
}

/// Load and validate the table named by `--table` or `--competition`.
fn load_table(args: &TableArgs, config: &Config) -> anyhow::Result<ParameterTable> {
    let path = match (&args.table, &args.competition) {
        (Some(path), _) => path.clone(),
        (None, Some(competition)) => config.table_for(competition)?,
        (None, None) => anyhow::bail!("Pass --table <csv> or --competition <name>"),
    };

    let table = ParameterTable::load(&path)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
    scoring::validate_table(&table).map_err(TableError::Invalid)?;
    Ok(table)
}

fn print_rows(rows: &[ScoredEntry], format: OutputFormat, use_colors: bool) {
    print_or_fail(match format {
        OutputFormat::Table => Ok(output::format_roster_table(rows, use_colors)),
        OutputFormat::Tsv => Ok(output::format_roster_tsv(rows)),
        OutputFormat::Json => output::format_roster_json(rows),
    });
}

fn print_or_fail(rendered: serde_json::Result<String>) {
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Failed to render output: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}
