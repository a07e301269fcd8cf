//! Run parameters - orchestrator loop control.
//!
//! [`RunParams`] groups the static parameters that control one run of the
//! [`Orchestrator`](crate::use_cases::orchestrate::Orchestrator). Termination
//! policy lives in the domain's `TerminationEvaluator`, not here.

use crate::events::{DEFAULT_EVENT_QUEUE_CAPACITY, DEFAULT_OBSERVER_BUFFER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestrator loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// Upper bound for one participant invocation. `None` waits forever.
    pub turn_timeout: Option<Duration>,
    /// Capacity of the event publication queue.
    pub event_queue_capacity: usize,
    /// Capacity of each observer's buffer.
    pub observer_buffer: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            turn_timeout: Some(Duration::from_secs(120)),
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            observer_buffer: DEFAULT_OBSERVER_BUFFER,
        }
    }
}

impl RunParams {
    // ==================== Builder Methods ====================

    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn with_turn_timeout_seconds(self, seconds: u64) -> Self {
        self.with_turn_timeout(Some(Duration::from_secs(seconds)))
    }

    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }

    pub fn with_observer_buffer(mut self, capacity: usize) -> Self {
        self.observer_buffer = capacity;
        self
    }
}
