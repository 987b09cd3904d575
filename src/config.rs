use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration loaded from `CATALOG_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Snapshot document to execute
    pub input_path: PathBuf,

    /// Report destination; stdout when unset
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Pretty-print the JSON report
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl Iterator<Item = (String, String)>) -> anyhow::Result<Self> {
        envy::prefixed("CATALOG_")
            .from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Iterator<Item = (String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_vars(vars(&[("CATALOG_INPUT_PATH", "input.json")])).unwrap();
        assert_eq!(config.input_path, PathBuf::from("input.json"));
        assert_eq!(config.output_path, None);
        assert_eq!(config.log_filter, "info");
        assert!(config.pretty);
    }

    #[test]
    fn test_all_fields() {
        let config = Config::from_vars(vars(&[
            ("CATALOG_INPUT_PATH", "in.json"),
            ("CATALOG_OUTPUT_PATH", "out.json"),
            ("CATALOG_LOG_FILTER", "catalog_engine=debug"),
            ("CATALOG_PRETTY", "false"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.output_path, Some(PathBuf::from("out.json")));
        assert_eq!(config.log_filter, "catalog_engine=debug");
        assert!(!config.pretty);
    }

    #[test]
    fn test_missing_input_path_fails() {
        let err = Config::from_vars(vars(&[("CATALOG_PRETTY", "true")])).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
