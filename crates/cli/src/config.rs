//! Optional TOML configuration file.
//!
//! Every field is optional; command-line flags override the file and the file
//! overrides built-in defaults.
//!
//! ```toml
//! [report]
//! limit = 10
//! min_messages = 5
//! type = "guild"
//! format = "json"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use counter::ConversationKind;
use serde::Deserialize;
use thiserror::Error;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree, one conversation per line.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        /// The configuration file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML, or has an unknown key or a bad value.
    #[error("Invalid config file '{}': {source}", .path.display())]
    Parse {
        /// The configuration file that failed to parse.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level layout of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[report]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub limit: Option<usize>,
    pub min_messages: Option<usize>,
    #[serde(rename = "type")]
    pub kind: Option<ConversationKind>,
    pub format: Option<OutputFormat>,
}

/// `[logging]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// An `EnvFilter` directive such as `info` or `counter=debug`.
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

impl CliConfig {
    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn full_file_parses() {
        let config: CliConfig = toml::from_str(
            r#"
            [report]
            limit = 3
            min_messages = 10
            type = "dm"
            format = "json"

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.report.limit, Some(3));
        assert_eq!(config.report.min_messages, Some(10));
        assert_eq!(config.report.kind, Some(ConversationKind::Dm));
        assert_eq!(config.report.format, Some(OutputFormat::Json));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<CliConfig>("[report]\nlimt = 3\n").unwrap_err();
        assert!(err.to_string().contains("limt"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dmc.toml");
        std::fs::write(&path, "[report]\ntype = \"server\"\n").unwrap();
        let err = CliConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("dmc.toml"));
    }
}
