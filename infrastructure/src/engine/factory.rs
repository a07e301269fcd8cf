//! Reasoning engine construction from configuration.

use super::openai::{EngineEndpoint, OpenAiEngine};
use crate::config::FileEngineConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors while building the reasoning engine
#[derive(Error, Debug)]
pub enum EngineSetupError {
    #[error(
        "No API credentials found. Set OPENAI_API_KEY, or AZURE_OPENAI_API_KEY together with \
         AZURE_OPENAI_ENDPOINT (a .env-style export or [engine] in sentinel.toml also works)"
    )]
    MissingCredentials,

    #[error("AZURE_OPENAI_API_KEY is set but AZURE_OPENAI_ENDPOINT is missing")]
    MissingAzureEndpoint,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Builds reasoning engines from `[engine]` configuration.
pub struct EngineFactory;

impl EngineFactory {
    /// Pick the endpoint. Azure is preferred when both credentials exist.
    pub fn resolve_endpoint(config: &FileEngineConfig) -> Result<EngineEndpoint, EngineSetupError> {
        if let Some(api_key) = non_empty(&config.azure_api_key) {
            let endpoint =
                non_empty(&config.azure_endpoint).ok_or(EngineSetupError::MissingAzureEndpoint)?;
            let deployment = non_empty(&config.azure_deployment).unwrap_or(&config.model);
            return Ok(EngineEndpoint::Azure {
                api_key: api_key.to_string(),
                endpoint: endpoint.to_string(),
                deployment: deployment.to_string(),
                api_version: config.azure_api_version.clone(),
            });
        }

        if let Some(api_key) = non_empty(&config.openai_api_key) {
            return Ok(EngineEndpoint::OpenAi {
                api_key: api_key.to_string(),
                base_url: config.openai_base_url.clone(),
            });
        }

        Err(EngineSetupError::MissingCredentials)
    }

    pub fn create(config: &FileEngineConfig) -> Result<OpenAiEngine, EngineSetupError> {
        let endpoint = Self::resolve_endpoint(config)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        info!(
            "Using {} with model {} (temperature {})",
            endpoint.provider_name(),
            config.model,
            config.temperature
        );
        Ok(OpenAiEngine::new(
            client,
            endpoint,
            config.model.clone(),
            config.temperature,
        ))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials() {
        let err = EngineFactory::resolve_endpoint(&FileEngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineSetupError::MissingCredentials));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = FileEngineConfig {
            openai_api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            EngineFactory::resolve_endpoint(&config),
            Err(EngineSetupError::MissingCredentials)
        ));
    }

    #[test]
    fn test_openai_endpoint() {
        let config = FileEngineConfig {
            openai_api_key: Some("sk-test".into()),
            ..Default::default()
        };
        let endpoint = EngineFactory::resolve_endpoint(&config).unwrap();
        assert_eq!(
            endpoint,
            EngineEndpoint::OpenAi {
                api_key: "sk-test".into(),
                base_url: "https://api.openai.com/v1".into(),
            }
        );
    }

    #[test]
    fn test_azure_preferred_and_deployment_defaults_to_model() {
        let config = FileEngineConfig {
            openai_api_key: Some("sk-test".into()),
            azure_api_key: Some("az-key".into()),
            azure_endpoint: Some("https://res.openai.azure.com".into()),
            ..Default::default()
        };
        match EngineFactory::resolve_endpoint(&config).unwrap() {
            EngineEndpoint::Azure {
                deployment,
                api_version,
                ..
            } => {
                assert_eq!(deployment, "gpt-4");
                assert_eq!(api_version, "2024-02-01");
            }
            other => panic!("expected Azure endpoint, got {:?}", other),
        }
    }

    #[test]
    fn test_azure_without_endpoint_is_an_error() {
        let config = FileEngineConfig {
            azure_api_key: Some("az-key".into()),
            ..Default::default()
        };
        assert!(matches!(
            EngineFactory::resolve_endpoint(&config),
            Err(EngineSetupError::MissingAzureEndpoint)
        ));
    }

    #[test]
    fn test_create_builds_engine() {
        let config = FileEngineConfig {
            openai_api_key: Some("sk-test".into()),
            model: "gpt-4o".into(),
            ..Default::default()
        };
        let engine = EngineFactory::create(&config).unwrap();
        assert_eq!(engine.model(), "gpt-4o");
    }
}
