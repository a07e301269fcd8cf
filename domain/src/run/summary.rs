//! Run identity and final report

use super::state::RunState;
use crate::termination::signal::{StopReason, TerminationSignal};
use crate::transcript::transcript::Transcript;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for one run, used for log and event correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final report of a completed, cancelled or failed run.
///
/// The transcript is always the full record up to the moment the run
/// stopped; nothing is discarded on failure or cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub state: RunState,
    pub signal: TerminationSignal,
    /// Number of participant turns appended (the seed is not a turn).
    pub turns: u64,
    pub started_at: DateTime<Utc>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Error recorded when the run failed.
    pub error: Option<String>,
    pub transcript: Transcript,
}

impl RunSummary {
    pub fn reason(&self) -> Option<&StopReason> {
        self.signal.reason()
    }

    pub fn is_completed(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }

    pub fn is_failed(&self) -> bool {
        self.state == RunState::Failed
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::message::MessageSource;
    use crate::transcript::transcript::TranscriptLog;

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(RunId::generate(), RunId::generate());
    }

    #[test]
    fn test_summary_json_shape() {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "start".into());

        let summary = RunSummary {
            run_id: RunId::generate(),
            state: RunState::Completed,
            signal: TerminationSignal::stop(StopReason::MaxMessages { limit: 1 }, 0),
            turns: 0,
            started_at: Utc::now(),
            duration: Duration::from_millis(1500),
            error: None,
            transcript: log.snapshot(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["state"], "completed");
        assert_eq!(json["duration_ms"], 1500);
        assert_eq!(json["transcript"][0]["sequence"], 0);
        assert_eq!(json["transcript"][0]["source"]["kind"], "system");
        assert!(summary.is_completed());
    }
}
