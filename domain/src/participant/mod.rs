//! Participant identity and profile.

use crate::core::error::DomainError;
use crate::transcript::message::SYSTEM_SOURCE;
use serde::{Deserialize, Serialize};

/// Unique, stable participant name (Value Object)
///
/// Used for attribution and as the scheduling key. Must be non-empty and
/// must not collide with the reserved `system` source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidParticipantName(name));
        }
        if trimmed.eq_ignore_ascii_case(SYSTEM_SOURCE) {
            return Err(DomainError::InvalidParticipantName(name));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// For names known to be valid at compile time.
    pub(crate) fn from_static(name: &'static str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ParticipantName> for String {
    fn from(name: ParticipantName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static description of a participant: who it is and how it is prompted.
///
/// `description` is metadata only; the orchestrator never branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub name: ParticipantName,
    pub description: String,
    pub system_prompt: String,
}

impl ParticipantProfile {
    pub fn new(
        name: ParticipantName,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name,
            description: description.into(),
            system_prompt: system_prompt.into(),
        }
    }
}
