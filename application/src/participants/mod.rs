//! Participant implementations.

pub mod assistant;

pub use assistant::AssistantParticipant;
