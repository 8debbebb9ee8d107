//! Run configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags. Nothing here changes how ownership is validated; it
//! only selects the backend and the output format.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshot";

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line-oriented text.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Configuration for a single audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Directory holding the captured store snapshot.
    pub snapshot_dir: PathBuf,
    /// Budget for the whole enumeration phase, in seconds.
    pub list_timeout_secs: Option<u64>,
    /// Report rendering.
    pub format: OutputFormat,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            list_timeout_secs: None,
            format: OutputFormat::Text,
        }
    }
}

impl AuditConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|error| ConfigError::Parse {
            path: origin.to_path_buf(),
            error,
        })
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        let config = Self::from_toml(&text, path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the snapshot directory.
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    /// Set the enumeration timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.list_timeout_secs = Some(secs);
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enumeration timeout as a duration.
    pub fn list_timeout(&self) -> Option<Duration> {
        self.list_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.snapshot_dir, PathBuf::from("snapshot"));
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.list_timeout().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AuditConfig::from_toml("format = \"json\"\n", Path::new("inline")).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.snapshot_dir, PathBuf::from(DEFAULT_SNAPSHOT_DIR));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = AuditConfig::from_toml("kubeconfig = \"x\"\n", Path::new("inline"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "snapshot_dir = \"/var/lib/badref\"").unwrap();
        writeln!(file, "list_timeout_secs = 30").unwrap();

        let config = AuditConfig::load(file.path()).unwrap();
        assert_eq!(config.snapshot_dir, PathBuf::from("/var/lib/badref"));
        assert_eq!(config.list_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AuditConfig::load(Path::new("/nonexistent/badref.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(ConfigError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = AuditConfig::new()
            .with_snapshot_dir("/snap")
            .with_timeout_secs(5)
            .with_format(OutputFormat::Json);
        assert_eq!(config.snapshot_dir, PathBuf::from("/snap"));
        assert_eq!(config.list_timeout_secs, Some(5));
        assert_eq!(config.format.to_string(), "json");
    }
}
