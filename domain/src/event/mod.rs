//! Run events streamed to observers.
//!
//! Every scheduler transition and every produced or discarded turn becomes a
//! [`RunEvent`]: a `(kind, payload, timestamp)` tuple tagged with the run id
//! and a per-run event sequence number.

use crate::participant::ParticipantName;
use crate::run::state::RunState;
use crate::run::summary::RunId;
use crate::termination::signal::{StopReason, TerminationSignal};
use crate::transcript::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a run event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    RunStarted,
    TurnProduced,
    TurnDiscarded,
    RunCompleted,
    RunCancelled,
    RunFailed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::RunStarted => "run-started",
            EventKind::TurnProduced => "turn-produced",
            EventKind::TurnDiscarded => "turn-discarded",
            EventKind::RunCompleted => "run-completed",
            EventKind::RunCancelled => "run-cancelled",
            EventKind::RunFailed => "run-failed",
        }
    }

    /// Terminal events are the last event of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::RunCompleted | EventKind::RunCancelled | EventKind::RunFailed
        )
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    RunStarted {
        participants: Vec<ParticipantName>,
        seed: Message,
    },
    TurnProduced {
        turn: u64,
        message: Message,
    },
    TurnDiscarded {
        turn: u64,
        participant: ParticipantName,
        reason: String,
    },
    RunCompleted {
        signal: TerminationSignal,
        turns: u64,
    },
    RunCancelled {
        signal: TerminationSignal,
        turns: u64,
    },
    RunFailed {
        participant: String,
        error: String,
        turns: u64,
    },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::RunStarted { .. } => EventKind::RunStarted,
            EventPayload::TurnProduced { .. } => EventKind::TurnProduced,
            EventPayload::TurnDiscarded { .. } => EventKind::TurnDiscarded,
            EventPayload::RunCompleted { .. } => EventKind::RunCompleted,
            EventPayload::RunCancelled { .. } => EventKind::RunCancelled,
            EventPayload::RunFailed { .. } => EventKind::RunFailed,
        }
    }

    /// Terminal payload for a run that stopped with `signal`.
    pub fn finished(signal: TerminationSignal, turns: u64) -> Self {
        if let Some(StopReason::ParticipantFailed { participant, error }) = signal.reason() {
            return EventPayload::RunFailed {
                participant: participant.clone(),
                error: error.clone(),
                turns,
            };
        }
        match signal.reason().map(StopReason::terminal_state) {
            Some(RunState::Cancelled) => EventPayload::RunCancelled { signal, turns },
            _ => EventPayload::RunCompleted { signal, turns },
        }
    }
}

/// One event in a run's stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunEvent {
    pub run_id: RunId,
    /// Position of this event within the run (0 = run-started).
    pub sequence: u64,
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl RunEvent {
    pub fn new(run_id: RunId, sequence: u64, payload: EventPayload) -> Self {
        Self {
            run_id,
            sequence,
            kind: payload.kind(),
            timestamp: Utc::now(),
            payload,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// The appended message, for `turn-produced` events.
    pub fn message(&self) -> Option<&Message> {
        match &self.payload {
            EventPayload::TurnProduced { message, .. } => Some(message),
            EventPayload::RunStarted { seed, .. } => Some(seed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(EventKind::TurnProduced.to_string(), "turn-produced");
        assert_eq!(
            serde_json::to_value(EventKind::RunCancelled).unwrap(),
            "run-cancelled"
        );
    }

    #[test]
    fn test_only_run_end_kinds_are_terminal() {
        assert!(EventKind::RunCompleted.is_terminal());
        assert!(EventKind::RunCancelled.is_terminal());
        assert!(EventKind::RunFailed.is_terminal());
        assert!(!EventKind::RunStarted.is_terminal());
        assert!(!EventKind::TurnProduced.is_terminal());
        assert!(!EventKind::TurnDiscarded.is_terminal());
    }

    #[test]
    fn test_finished_payload_follows_reason() {
        let completed = EventPayload::finished(
            TerminationSignal::stop(StopReason::MaxMessages { limit: 3 }, 2),
            2,
        );
        assert_eq!(completed.kind(), EventKind::RunCompleted);

        let cancelled =
            EventPayload::finished(TerminationSignal::stop(StopReason::Cancelled, 0), 0);
        assert_eq!(cancelled.kind(), EventKind::RunCancelled);

        let failed = EventPayload::finished(
            TerminationSignal::stop(
                StopReason::ParticipantFailed {
                    participant: "Diagnostic".into(),
                    error: "engine down".into(),
                },
                1,
            ),
            1,
        );
        assert_eq!(failed.kind(), EventKind::RunFailed);
    }

    #[test]
    fn test_event_serializes_with_flattened_payload() {
        let event = RunEvent::new(
            RunId::generate(),
            3,
            EventPayload::TurnDiscarded {
                turn: 2,
                participant: ParticipantName::new("B").unwrap(),
                reason: "cancelled".into(),
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "turn-discarded");
        assert_eq!(json["sequence"], 3);
        assert_eq!(json["participant"], "B");
        assert_eq!(json["turn"], 2);
    }
}
