//! Termination predicates
//!
//! Each predicate inspects a transcript snapshot and either stays silent or
//! names the reason the run should stop. Predicates are validated when they
//! are constructed, so a malformed policy never reaches a running loop.

use super::signal::StopReason;
use crate::transcript::transcript::Transcript;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors raised while building a termination policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("max_messages must be at least 1 (the seed message counts)")]
    ZeroMessageLimit,

    #[error("stop token cannot be empty")]
    EmptyStopToken,

    #[error("termination policy has no conditions; the run would never end")]
    NoConditions,
}

/// A single termination predicate.
pub trait TerminationCondition: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the transcript. Returns the stop reason and the sequence
    /// number of the message that triggered it, or `None` to continue.
    fn check(&self, transcript: &Transcript) -> Option<(StopReason, u64)>;
}

/// Stops once the transcript holds `limit` messages, seed included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxMessageTermination {
    limit: usize,
}

impl MaxMessageTermination {
    pub fn new(limit: usize) -> Result<Self, EvaluatorError> {
        if limit == 0 {
            return Err(EvaluatorError::ZeroMessageLimit);
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl TerminationCondition for MaxMessageTermination {
    fn name(&self) -> &'static str {
        "max_messages"
    }

    fn check(&self, transcript: &Transcript) -> Option<(StopReason, u64)> {
        if transcript.len() < self.limit {
            return None;
        }
        let index = transcript.last_index()?;
        Some((StopReason::MaxMessages { limit: self.limit }, index))
    }
}

/// Stops on the first participant message whose content contains `token`.
///
/// The seed is never inspected, so a task description that happens to quote
/// the token does not end the run before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMentionTermination {
    token: String,
}

impl TextMentionTermination {
    pub fn new(token: impl Into<String>) -> Result<Self, EvaluatorError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(EvaluatorError::EmptyStopToken);
        }
        Ok(Self { token })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl TerminationCondition for TextMentionTermination {
    fn name(&self) -> &'static str {
        "stop_token"
    }

    fn check(&self, transcript: &Transcript) -> Option<(StopReason, u64)> {
        transcript
            .turns()
            .find(|m| m.content().contains(&self.token))
            .map(|m| {
                (
                    StopReason::StopToken {
                        token: self.token.clone(),
                    },
                    m.sequence(),
                )
            })
    }
}

/// Graceful stop requested from outside the run.
///
/// Clones share one flag: keep a clone, hand the other to the evaluator and
/// call [`set`](Self::set) to end the run after the current turn.
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl TerminationCondition for ExternalTermination {
    fn name(&self) -> &'static str {
        "external"
    }

    fn check(&self, transcript: &Transcript) -> Option<(StopReason, u64)> {
        if !self.is_set() {
            return None;
        }
        Some((StopReason::ExternalStop, transcript.last_index().unwrap_or(0)))
    }
}
