//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section has defaults so a partial
//! file (or no file at all) is valid.

mod engine;
mod logging;
mod run;
mod telemetry;

pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;
pub use run::FileRunConfig;
pub use telemetry::FileTelemetryConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("run.max_messages cannot be 0")]
    ZeroMessageLimit,

    #[error("run.stop_tokens cannot contain an empty token")]
    EmptyStopToken,

    #[error("run.turn_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("run.event_buffer cannot be 0")]
    ZeroEventBuffer,

    #[error("telemetry.errors cannot be 0")]
    ZeroTelemetryErrors,

    #[error("engine.model cannot be empty")]
    EmptyModelName,

    #[error("engine.temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("engine.request_timeout_seconds cannot be 0")]
    InvalidRequestTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning engine settings
    pub engine: FileEngineConfig,
    /// Orchestration loop settings
    pub run: FileRunConfig,
    /// Mock telemetry settings
    pub telemetry: FileTelemetryConfig,
    /// Log output settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.engine.validate()?;
        self.run.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Render as TOML with credentials masked (for `--show-config`).
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut redacted = self.clone();
        redacted.engine = redacted.engine.redacted();
        toml::to_string_pretty(&redacted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[engine]
model = "gpt-4o"
temperature = 0.1
azure_endpoint = "https://example.openai.azure.com"

[run]
max_messages = 8
stop_tokens = ["DONE", "TERMINATE"]
turn_timeout_seconds = 30

[telemetry]
errors = 5

[logging]
level = "debug"
directory = "/tmp/sentinel-logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.model, "gpt-4o");
        assert_eq!(config.engine.temperature, 0.1);
        assert_eq!(
            config.engine.azure_endpoint.as_deref(),
            Some("https://example.openai.azure.com")
        );
        assert_eq!(config.run.max_messages, 8);
        assert_eq!(config.run.stop_tokens, vec!["DONE", "TERMINATE"]);
        assert_eq!(config.run.turn_timeout_seconds, 30);
        assert_eq!(config.run.event_buffer, 256);
        assert_eq!(config.telemetry.errors, 5);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FileConfig = toml::from_str("[telemetry]\nerrors = 2\n").unwrap();
        assert_eq!(config.telemetry.errors, 2);
        assert_eq!(config.run, FileRunConfig::default());
        assert_eq!(config.engine.model, "gpt-4");
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = FileConfig::default();
        config.run.max_messages = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroMessageLimit));

        let mut config = FileConfig::default();
        config.telemetry.errors = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroTelemetryErrors));

        let mut config = FileConfig::default();
        config.engine.model = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_redacted_toml_hides_keys() {
        let mut config = FileConfig::default();
        config.engine.openai_api_key = Some("sk-secret".to_string());
        let rendered = config.to_redacted_toml().unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("max_messages = 12"));
    }
}
