//! Termination signal types

use crate::run::state::RunState;
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum StopReason {
    /// The transcript reached the configured message ceiling.
    MaxMessages { limit: usize },
    /// A participant message contained a stop token.
    StopToken { token: String },
    /// An external party asked for a graceful stop between turns.
    ExternalStop,
    /// The run's cancellation token fired.
    Cancelled,
    /// A participant invocation failed; the run does not retry.
    ParticipantFailed { participant: String, error: String },
}

impl StopReason {
    /// The terminal run state this reason leads to.
    pub fn terminal_state(&self) -> RunState {
        match self {
            StopReason::MaxMessages { .. } | StopReason::StopToken { .. } => RunState::Completed,
            StopReason::ExternalStop | StopReason::Cancelled => RunState::Cancelled,
            StopReason::ParticipantFailed { .. } => RunState::Failed,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::MaxMessages { limit } => {
                write!(f, "maximum number of messages ({}) reached", limit)
            }
            StopReason::StopToken { token } => write!(f, "stop token {:?} observed", token),
            StopReason::ExternalStop => write!(f, "external stop requested"),
            StopReason::Cancelled => write!(f, "run cancelled"),
            StopReason::ParticipantFailed { participant, error } => {
                write!(f, "participant {} failed: {}", participant, error)
            }
        }
    }
}

/// Result of evaluating the termination policy against a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "signal")]
pub enum TerminationSignal {
    Continue,
    Stop {
        #[serde(flatten)]
        reason: StopReason,
        /// Sequence number of the message that triggered the stop.
        message_index: u64,
    },
}

impl TerminationSignal {
    pub fn stop(reason: StopReason, message_index: u64) -> Self {
        TerminationSignal::Stop {
            reason,
            message_index,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, TerminationSignal::Stop { .. })
    }

    pub fn reason(&self) -> Option<&StopReason> {
        match self {
            TerminationSignal::Continue => None,
            TerminationSignal::Stop { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_maps_to_terminal_state() {
        assert_eq!(
            StopReason::MaxMessages { limit: 5 }.terminal_state(),
            RunState::Completed
        );
        assert_eq!(
            StopReason::StopToken {
                token: "TERMINATE".into()
            }
            .terminal_state(),
            RunState::Completed
        );
        assert_eq!(StopReason::Cancelled.terminal_state(), RunState::Cancelled);
        assert_eq!(StopReason::ExternalStop.terminal_state(), RunState::Cancelled);
        assert_eq!(
            StopReason::ParticipantFailed {
                participant: "A".into(),
                error: "boom".into()
            }
            .terminal_state(),
            RunState::Failed
        );
    }

    #[test]
    fn test_signal_serializes_flat() {
        let signal = TerminationSignal::stop(StopReason::MaxMessages { limit: 5 }, 4);
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["signal"], "stop");
        assert_eq!(json["reason"], "max_messages");
        assert_eq!(json["limit"], 5);
        assert_eq!(json["message_index"], 4);
    }

    #[test]
    fn test_continue_has_no_reason() {
        assert!(TerminationSignal::Continue.reason().is_none());
        assert!(!TerminationSignal::Continue.is_stop());
    }
}
