use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::scoring::NegativeBasePolicy;

/// Tool configuration.
///
/// Example YAML:
/// ```yaml
/// negative_base: reject
/// competitions:
///   decathlon:
///     table: tables/decathlon_men.csv
///   heptathlon:
///     table: tables/heptathlon_women.csv
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Performances beyond a table's zero point: `reject` (default) or `zero`
    #[serde(default)]
    pub negative_base: NegativeBasePolicy,

    /// Coefficient table per competition type, keyed by competition name
    #[serde(default)]
    pub competitions: BTreeMap<String, CompetitionConfig>,

    /// Directory of the file this config was read from; relative table paths
    /// resolve against it.
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompetitionConfig {
    /// Path to the CSV coefficient table
    pub table: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.negative_base, NegativeBasePolicy::Reject);
        assert!(config.competitions.is_empty());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
negative_base: zero
competitions:
  decathlon:
    table: tables/decathlon_men.csv
  heptathlon:
    table: /srv/tables/heptathlon_women.csv
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.negative_base, NegativeBasePolicy::Zero);
        assert_eq!(config.competitions.len(), 2);
        assert_eq!(
            config.competitions["decathlon"].table,
            PathBuf::from("tables/decathlon_men.csv")
        );
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "negative_base: reject\nranking: true\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let yaml = "negative_base: clamp\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let yaml = "competitions:\n  decathlon:\n    table: d.csv\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let out = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&out).unwrap();
        assert_eq!(config, parsed);
    }
}
