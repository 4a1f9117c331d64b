//! Converter configuration, loadable from TOML and overridable from environment.

use serde::Deserialize;
use std::path::PathBuf;

use smt_log_core::{LogFamily, ParseOptions};

/// A machine on the line whose logs are converted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Machine {
    /// Equipment identifier; names the output directory (e.g., "e133415").
    pub id: String,
    /// Machine name; prefixes the input files (e.g., "CM 421").
    pub name: String,
}

/// Top-level configuration for a conversion run.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    /// Directory holding the raw `.log` files (LOG_DIR env var).
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Directory receiving the JSON documents (OUTPUT_DIR env var).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Machines to process. Empty means a single unprefixed `Error.log` /
    /// `Operate.log` pair.
    #[serde(default)]
    pub machines: Vec<Machine>,
    /// Log families to convert for each machine.
    #[serde(default = "default_families")]
    pub families: Vec<LogFamily>,
    /// Grammar selection.
    #[serde(default)]
    pub parse: ParseOptions,
    /// Abort on the first failed file instead of continuing (FAIL_FAST env var).
    #[serde(default)]
    pub fail_fast: bool,
    /// Also write `Summary.json` next to each machine's event files.
    #[serde(default)]
    pub write_summary: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/equipment")
}

fn default_families() -> Vec<LogFamily> {
    LogFamily::ALL.to_vec()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            output_dir: default_output_dir(),
            machines: vec![],
            families: default_families(),
            parse: ParseOptions::default(),
            fail_fast: false,
            write_summary: false,
        }
    }
}

impl ConverterConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Defaults overridden from process environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `LOG_DIR`, `OUTPUT_DIR` and `FAIL_FAST` from `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("LOG_DIR").filter(|v| !v.is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(v) = lookup("FAIL_FAST") {
            self.fail_fast = v.eq_ignore_ascii_case("true") || v == "1";
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smt_log_core::{FeederCapture, GrammarStyle};
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.output_dir, PathBuf::from("data/equipment"));
        assert!(config.machines.is_empty());
        assert_eq!(config.families, vec![LogFamily::Error, LogFamily::Operate]);
        assert!(!config.fail_fast);
        assert!(!config.write_summary);
    }

    #[test]
    fn deserialize_minimal_config() {
        let config: ConverterConfig = toml::from_str("").unwrap();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.parse, ParseOptions::default());
        assert_eq!(config.families.len(), 2);
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
log_dir = "/srv/smt/logs"
output_dir = "/srv/smt/public"
families = ["error"]
fail_fast = true
write_summary = true

[parse]
style = "flat"
operate_feeder = "raw"

[[machines]]
id = "e133415"
name = "CM 421"

[[machines]]
id = "e133416"
name = "Test"
"#;
        let config: ConverterConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/srv/smt/logs"));
        assert_eq!(config.families, vec![LogFamily::Error]);
        assert!(config.fail_fast);
        assert!(config.write_summary);
        assert_eq!(config.parse.style, GrammarStyle::Flat);
        assert_eq!(config.parse.operate_feeder, FeederCapture::Raw);
        assert_eq!(config.machines.len(), 2);
        assert_eq!(
            config.machines[0],
            Machine {
                id: "e133415".into(),
                name: "CM 421".into()
            }
        );
    }

    #[test]
    fn unknown_family_is_rejected() {
        let result: Result<ConverterConfig, _> = toml::from_str(r#"families = ["audit"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn env_overrides_paths_and_fail_fast() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LOG_DIR", "/mnt/share/Log"),
            ("OUTPUT_DIR", "/var/www/public"),
            ("FAIL_FAST", "TRUE"),
        ]);
        let config = ConverterConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.log_dir, PathBuf::from("/mnt/share/Log"));
        assert_eq!(config.output_dir, PathBuf::from("/var/www/public"));
        assert!(config.fail_fast);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = ConverterConfig::default().with_env_overrides(|key| match key {
            "LOG_DIR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }
}
