//! Port for structured run-event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures every
//! [`RunEvent`] in a machine-readable format (JSONL).

use sentinel_domain::RunEvent;

/// Port for logging run events to a structured log.
///
/// `log` is synchronous and non-fallible; logging failures never disturb
/// the run.
pub trait ConversationLogger: Send + Sync {
    /// Record a run event.
    fn log(&self, event: &RunEvent);
}

