//! Log output configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`).
    /// Overridden by `-v` / `--log-level`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Write a daily-rolling log file
    pub file: bool,
    /// Directory for the log file
    pub directory: PathBuf,
    /// Log file name prefix
    pub file_name: String,
    /// JSONL event log path (disabled when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: true,
            directory: PathBuf::from("logs"),
            file_name: "sentinel.log".to_string(),
            event_log: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileLoggingConfig::default();
        assert!(config.file);
        assert_eq!(config.directory, PathBuf::from("logs"));
        assert_eq!(config.file_name, "sentinel.log");
        assert!(config.event_log.is_none());
    }
}
