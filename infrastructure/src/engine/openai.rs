//! OpenAI-compatible chat completions engine.
//!
//! Speaks the `/chat/completions` wire format to either OpenAI
//! (`Authorization: Bearer`) or Azure OpenAI (`api-key` header, deployment
//! URL, `api-version` query).

use async_trait::async_trait;
use sentinel_application::ports::reasoning_engine::{EngineError, ReasoningEngine};
use sentinel_domain::core::string::truncate;
use sentinel_domain::{ChatMessage, ChatRole, EngineContext, MessageContent};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest error body quoted in an error message.
const MAX_ERROR_BODY: usize = 500;

/// Where and how to reach the chat completions API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEndpoint {
    OpenAi {
        api_key: String,
        base_url: String,
    },
    Azure {
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

impl EngineEndpoint {
    pub fn provider_name(&self) -> &'static str {
        match self {
            EngineEndpoint::OpenAi { .. } => "openai",
            EngineEndpoint::Azure { .. } => "azure-openai",
        }
    }

    pub fn chat_url(&self) -> String {
        match self {
            EngineEndpoint::OpenAi { base_url, .. } => {
                format!("{}/chat/completions", base_url.trim_end_matches('/'))
            }
            EngineEndpoint::Azure {
                endpoint,
                deployment,
                api_version,
                ..
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                deployment,
                api_version
            ),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            EngineEndpoint::OpenAi { api_key, .. } => request.bearer_auth(api_key),
            EngineEndpoint::Azure { api_key, .. } => request.header("api-key", api_key),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, PartialEq)]
struct WireMessage {
    role: ChatRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            name: message.name.as_deref().map(wire_name),
            content: message.content.clone(),
        }
    }
}

/// The API only accepts `[A-Za-z0-9_-]` in author names.
fn wire_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn parse_response(body: &str) -> Result<MessageContent, EngineError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| EngineError::InvalidResponse(format!("malformed JSON: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(MessageContent::Text)
        .ok_or_else(|| EngineError::InvalidResponse("response has no message content".to_string()))
}

fn classify_transport_error(e: reqwest::Error) -> EngineError {
    if e.is_timeout() {
        EngineError::Timeout
    } else if e.is_connect() {
        EngineError::Connection(e.to_string())
    } else {
        EngineError::RequestFailed(e.to_string())
    }
}

/// Chat completions client implementing [`ReasoningEngine`].
pub struct OpenAiEngine {
    client: reqwest::Client,
    endpoint: EngineEndpoint,
    model: String,
    temperature: f32,
}

impl OpenAiEngine {
    pub fn new(
        client: reqwest::Client,
        endpoint: EngineEndpoint,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            endpoint,
            model: model.into(),
            temperature,
        }
    }

    pub fn endpoint(&self) -> &EngineEndpoint {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, context: &EngineContext) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: context.messages.iter().map(WireMessage::from).collect(),
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl ReasoningEngine for OpenAiEngine {
    async fn generate(&self, context: &EngineContext) -> Result<MessageContent, EngineError> {
        let body = self.request_body(context);
        debug!(
            "POST {} for {} ({} messages)",
            self.endpoint.provider_name(),
            context.speaker,
            body.messages.len()
        );

        let request = self.client.post(self.endpoint.chat_url()).json(&body);
        let response = self
            .endpoint
            .authorize(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_transport_error)?;
        if !status.is_success() {
            return Err(EngineError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&text, MAX_ERROR_BODY)
            )));
        }

        parse_response(&text)
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.endpoint.provider_name(), self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_domain::{MessageSource, ParticipantName, TranscriptLog};

    fn openai() -> EngineEndpoint {
        EngineEndpoint::OpenAi {
            api_key: "sk-test".into(),
            base_url: "https://api.openai.com/v1/".into(),
        }
    }

    #[test]
    fn test_chat_urls() {
        assert_eq!(
            openai().chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        let azure = EngineEndpoint::Azure {
            api_key: "k".into(),
            endpoint: "https://res.openai.azure.com/".into(),
            deployment: "gpt-4".into(),
            api_version: "2024-02-01".into(),
        };
        assert_eq!(
            azure.chat_url(),
            "https://res.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2024-02-01"
        );
        assert_eq!(azure.provider_name(), "azure-openai");
    }

    #[test]
    fn test_request_body_shape() {
        let engine = OpenAiEngine::new(reqwest::Client::new(), openai(), "gpt-4", 0.3);
        let observer = ParticipantName::new("Observer").unwrap();
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "alert".into());
        log.append(
            MessageSource::Participant(ParticipantName::new("Root Cause").unwrap()),
            "hmm".into(),
        );
        let context = EngineContext::for_speaker(&observer, "You observe.", &log.snapshot());

        let json = serde_json::to_value(engine.request_body(&context)).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json["messages"][1].get("name").is_none());
        assert_eq!(json["messages"][2]["name"], "Root_Cause");
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_response_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"All clear"}}]}"#;
        assert_eq!(parse_response(body).unwrap().as_text(), Some("All clear"));
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(
            parse_response("not json"),
            Err(EngineError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(EngineError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(EngineError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_describe() {
        let engine = OpenAiEngine::new(reqwest::Client::new(), openai(), "gpt-4o", 0.0);
        assert_eq!(engine.describe(), "openai/gpt-4o");
    }
}
