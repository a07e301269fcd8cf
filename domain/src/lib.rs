//! Domain layer for sentinel
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! An append-only, totally ordered record of every message in a run. The
//! seed task is message 0; each participant turn appends exactly one message.
//!
//! ## Run
//!
//! A run walks participants in strict round-robin order until the
//! termination policy fires, the run is cancelled, or a participant fails.
//!
//! ## Termination
//!
//! Predicates over the transcript (message ceiling, stop token, external
//! stop) composed with OR semantics.

pub mod core;
pub mod engine;
pub mod event;
pub mod participant;
pub mod prompt;
pub mod run;
pub mod termination;
pub mod transcript;

// Re-export commonly used types
pub use core::error::DomainError;
pub use engine::{ChatMessage, ChatRole, EngineContext};
pub use event::{EventKind, EventPayload, RunEvent};
pub use participant::{ParticipantName, ParticipantProfile};
pub use prompt::{Persona, PromptTemplate};
pub use run::{
    cursor::RoundRobinCursor,
    state::RunState,
    summary::{RunId, RunSummary},
};
pub use termination::{
    EvaluatorError, ExternalTermination, MaxMessageTermination, StopReason, TerminationCondition,
    TerminationEvaluator, TerminationSignal, TextMentionTermination,
};
pub use transcript::{
    message::{Message, MessageContent, MessageSource, SYSTEM_SOURCE},
    transcript::{Transcript, TranscriptLog},
};
