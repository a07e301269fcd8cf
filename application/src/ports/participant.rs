//! Participant port
//!
//! A participant is a black-box unit of work: given the transcript so far it
//! produces exactly one message payload.

use super::reasoning_engine::EngineError;
use async_trait::async_trait;
use sentinel_domain::{MessageContent, ParticipantName, Transcript};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors raised by a participant invocation. Any of them fails the run.
#[derive(Error, Debug)]
pub enum ParticipantError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Participant task panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

/// A named participant in a run
///
/// The orchestrator holds participants as `Arc<dyn Participant>` and never
/// inspects concrete types.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Unique, stable name used for attribution and scheduling.
    fn name(&self) -> &ParticipantName;

    /// Free-form description (metadata only).
    fn description(&self) -> &str {
        ""
    }

    /// Produce the next message.
    ///
    /// `transcript` is an immutable snapshot. Implementations should return
    /// early when `cancel` fires, but the orchestrator does not rely on it.
    async fn act(
        &self,
        transcript: &Transcript,
        cancel: &CancellationToken,
    ) -> Result<MessageContent, ParticipantError>;
}
