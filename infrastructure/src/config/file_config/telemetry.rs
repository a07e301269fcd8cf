//! Mock telemetry configuration from TOML (`[telemetry]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

/// Raw telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelemetryConfig {
    /// Number of error lines to generate
    pub errors: usize,
}

impl Default for FileTelemetryConfig {
    fn default() -> Self {
        Self { errors: 3 }
    }
}

impl FileTelemetryConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.errors == 0 {
            return Err(ConfigValidationError::ZeroTelemetryErrors);
        }
        Ok(())
    }
}
