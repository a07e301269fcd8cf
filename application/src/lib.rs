//! Application layer for sentinel
//!
//! This crate contains the orchestrator use case, port definitions, the
//! shared transcript bus and the run event stream.
//! It depends only on the domain layer.

pub mod bus;
pub mod config;
pub mod events;
pub mod participants;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use bus::{TranscriptBus, TranscriptReader, TranscriptWriter};
pub use config::RunParams;
pub use events::{EventPublisher, EventStream, EventSubscription, forward_to_logger};
pub use participants::AssistantParticipant;
pub use ports::{
    conversation_logger::ConversationLogger,
    participant::{Participant, ParticipantError},
    reasoning_engine::{EngineError, ReasoningEngine},
};
pub use use_cases::orchestrate::{Orchestrator, OrchestratorError};
