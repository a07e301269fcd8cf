//! Reasoning-engine context value objects.
//!
//! A participant turns the shared transcript into an [`EngineContext`]: the
//! persona's system prompt plus an attributed chat history. Engine adapters
//! map this onto whatever wire format they speak.

use crate::participant::ParticipantName;
use crate::transcript::message::MessageSource;
use crate::transcript::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// Role of a message in an engine conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A message in an engine conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    /// Author name, for multi-party histories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            name: None,
            content: content.into(),
        }
    }

    pub fn user(name: Option<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            name,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            name: None,
            content: content.into(),
        }
    }
}

/// Everything a reasoning engine needs to produce the next message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineContext {
    /// Participant the context is built for.
    pub speaker: String,
    pub messages: Vec<ChatMessage>,
}

impl EngineContext {
    /// Build the context `speaker` sees: its system prompt, then the whole
    /// transcript. The speaker's own earlier turns become assistant messages;
    /// everyone else's are attributed user messages.
    pub fn for_speaker(speaker: &ParticipantName, system_prompt: &str, transcript: &Transcript) -> Self {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }
        for message in transcript {
            let content = message.content().render();
            let chat = match message.source() {
                source if source.is_participant(speaker) => ChatMessage::assistant(content),
                MessageSource::System => ChatMessage::user(None, content),
                MessageSource::Participant(name) => {
                    ChatMessage::user(Some(name.as_str().to_string()), content)
                }
            };
            messages.push(chat);
        }
        Self {
            speaker: speaker.as_str().to_string(),
            messages,
        }
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::transcript::TranscriptLog;

    #[test]
    fn test_context_attributes_history() {
        let observer = ParticipantName::new("Observer").unwrap();
        let diagnostic = ParticipantName::new("Diagnostic").unwrap();

        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "incident".into());
        log.append(MessageSource::Participant(observer.clone()), "report".into());
        log.append(MessageSource::Participant(diagnostic.clone()), "root cause".into());

        let context = EngineContext::for_speaker(&observer, "You observe.", &log.snapshot());

        assert_eq!(context.system_prompt(), Some("You observe."));
        assert_eq!(context.messages.len(), 4);
        assert_eq!(context.messages[1], ChatMessage::user(None, "incident"));
        assert_eq!(context.messages[2], ChatMessage::assistant("report"));
        assert_eq!(
            context.messages[3],
            ChatMessage::user(Some("Diagnostic".to_string()), "root cause")
        );
    }

    #[test]
    fn test_empty_system_prompt_is_omitted() {
        let speaker = ParticipantName::new("A").unwrap();
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());

        let context = EngineContext::for_speaker(&speaker, "", &log.snapshot());
        assert_eq!(context.system_prompt(), None);
        assert_eq!(context.messages.len(), 1);
    }
}
