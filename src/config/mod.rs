mod schema;

pub use schema::{CompetitionConfig, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (~/.config/multi-event-points/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("multi-event-points"))
}

/// Get the default config file path (~/.config/multi-event-points/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to the default config when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;
    config.source_dir = config_path.parent().map(Path::to_path_buf);

    Ok(config)
}

impl Config {
    /// Resolve the coefficient table path for a competition type.
    pub fn table_for(&self, competition: &str) -> Result<PathBuf> {
        let entry = self
            .competitions
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(competition.trim()))
            .map(|(_, entry)| entry)
            .with_context(|| {
                let known: Vec<&str> = self.competitions.keys().map(String::as_str).collect();
                format!(
                    "Unknown competition '{}' (configured: {})",
                    competition,
                    if known.is_empty() { "none".to_string() } else { known.join(", ") }
                )
            })?;

        Ok(match &self.source_dir {
            Some(dir) if entry.table.is_relative() => dir.join(&entry.table),
            _ => entry.table.clone(),
        })
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, competition) in &config.competitions {
        if name.trim().is_empty() {
            errors.push("competitions: competition name must not be empty".to_string());
        }
        if competition.table.as_os_str().is_empty() {
            errors.push(format!("competitions.{}.table: path must not be empty", name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
