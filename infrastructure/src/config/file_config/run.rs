//! Orchestration loop configuration from TOML (`[run]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

/// Raw run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRunConfig {
    /// Message ceiling, seed included
    pub max_messages: usize,
    /// A participant message containing any of these ends the run
    pub stop_tokens: Vec<String>,
    /// Upper bound for a single participant turn
    pub turn_timeout_seconds: u64,
    /// Event queue and observer buffer size
    pub event_buffer: usize,
}

impl Default for FileRunConfig {
    fn default() -> Self {
        Self {
            max_messages: 12,
            stop_tokens: vec!["TERMINATE".to_string()],
            turn_timeout_seconds: 120,
            event_buffer: 256,
        }
    }
}

impl FileRunConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_messages == 0 {
            return Err(ConfigValidationError::ZeroMessageLimit);
        }
        if self.stop_tokens.iter().any(|t| t.is_empty()) {
            return Err(ConfigValidationError::EmptyStopToken);
        }
        if self.turn_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.event_buffer == 0 {
            return Err(ConfigValidationError::ZeroEventBuffer);
        }
        Ok(())
    }
}
