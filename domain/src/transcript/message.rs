//! Message value object

use crate::participant::ParticipantName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved source name for messages not produced by a participant.
pub const SYSTEM_SOURCE: &str = "system";

/// Who produced a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum MessageSource {
    /// The orchestrator itself (the seed task).
    System,
    /// A named participant.
    Participant(ParticipantName),
}

impl MessageSource {
    pub fn as_str(&self) -> &str {
        match self {
            MessageSource::System => SYSTEM_SOURCE,
            MessageSource::Participant(name) => name.as_str(),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, MessageSource::System)
    }

    /// Check whether this message was produced by the given participant.
    pub fn is_participant(&self, name: &ParticipantName) -> bool {
        matches!(self, MessageSource::Participant(n) if n == name)
    }
}

impl std::fmt::Display for MessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ParticipantName> for MessageSource {
    fn from(name: ParticipantName) -> Self {
        MessageSource::Participant(name)
    }
}

/// Opaque message payload.
///
/// Usually text, but participants may hand back structured data. The
/// orchestration core never interprets the payload; only termination
/// predicates look at its text rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum MessageContent {
    Text(String),
    Structured(serde_json::Value),
}

impl MessageContent {
    pub fn text(content: impl Into<String>) -> Self {
        MessageContent::Text(content.into())
    }

    /// Returns the text if this is a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            MessageContent::Structured(_) => None,
        }
    }

    /// Render the payload as text. Structured payloads are rendered as compact JSON.
    pub fn render(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Structured(v) => v.to_string(),
        }
    }

    /// Check whether the rendered payload contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            MessageContent::Text(s) => s.contains(needle),
            MessageContent::Structured(v) => v.to_string().contains(needle),
        }
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Text(s.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Text(s)
    }
}

impl From<serde_json::Value> for MessageContent {
    fn from(v: serde_json::Value) -> Self {
        MessageContent::Structured(v)
    }
}

impl std::fmt::Display for MessageContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageContent::Text(s) => write!(f, "{}", s),
            MessageContent::Structured(v) => write!(f, "{}", v),
        }
    }
}

/// A message in the shared transcript (Value Object)
///
/// Only the transcript log constructs messages, because the sequence number
/// and timestamp are assigned at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    sequence: u64,
    source: MessageSource,
    content: MessageContent,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(
        sequence: u64,
        source: MessageSource,
        content: MessageContent,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sequence,
            source,
            content,
            timestamp,
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn source(&self) -> &MessageSource {
        &self.source
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
