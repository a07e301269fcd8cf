//! Reasoning engine configuration from TOML (`[engine]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

/// Raw engine configuration
///
/// Credentials are usually supplied through the environment
/// (`OPENAI_API_KEY`, `AZURE_OPENAI_*`) rather than the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Model name (also the Azure deployment when none is given)
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Timeout for a single HTTP request
    pub request_timeout_seconds: u64,
    /// OpenAI API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    /// OpenAI-compatible base URL
    pub openai_base_url: String,
    /// Azure OpenAI API key (preferred over OpenAI when set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_api_key: Option<String>,
    /// Azure OpenAI resource endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_endpoint: Option<String>,
    /// Azure OpenAI API version
    pub azure_api_version: String,
    /// Azure deployment name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_deployment: Option<String>,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.3,
            request_timeout_seconds: 120,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            azure_api_key: None,
            azure_endpoint: None,
            azure_api_version: "2024-02-01".to_string(),
            azure_deployment: None,
        }
    }
}

impl FileEngineConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(self.temperature));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidRequestTimeout);
        }
        Ok(())
    }

    /// Copy with API keys masked.
    pub fn redacted(mut self) -> Self {
        let mask = |key: &mut Option<String>| {
            if key.is_some() {
                *key = Some("********".to_string());
            }
        };
        mask(&mut self.openai_api_key);
        mask(&mut self.azure_api_key);
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.openai_api_key.is_some() || self.azure_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileEngineConfig::default();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.azure_api_version, "2024-02-01");
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let config = FileEngineConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(3.5))
        );
    }

    #[test]
    fn test_redacted_masks_only_present_keys() {
        let config = FileEngineConfig {
            azure_api_key: Some("abc".to_string()),
            ..Default::default()
        }
        .redacted();
        assert_eq!(config.azure_api_key.as_deref(), Some("********"));
        assert!(config.openai_api_key.is_none());
    }
}
