//! Run lifecycle state machine

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a run.
///
/// ```text
/// Idle ──start──► Running ──┬──► Completed
///                           ├──► Cancelled
///                           └──► Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
            RunState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Cancelled | RunState::Failed
        )
    }

    /// Check whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        match (self, next) {
            (RunState::Idle, RunState::Running) => true,
            (RunState::Running, next) => next.is_terminal(),
            _ => false,
        }
    }

    /// Move to `next`, rejecting illegal transitions.
    pub fn transition(&mut self, next: RunState) -> Result<(), DomainError> {
        if !self.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = RunState::Idle;
        state.transition(RunState::Running).unwrap();
        state.transition(RunState::Completed).unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [RunState::Completed, RunState::Cancelled, RunState::Failed] {
            let mut state = terminal;
            assert!(state.transition(RunState::Running).is_err());
            assert!(state.transition(RunState::Failed).is_err());
            assert_eq!(state, terminal);
        }
    }

    #[test]
    fn test_idle_cannot_skip_running() {
        let mut state = RunState::Idle;
        assert!(state.transition(RunState::Completed).is_err());
        assert_eq!(state, RunState::Idle);
    }

    #[test]
    fn test_running_cannot_restart() {
        let mut state = RunState::Running;
        assert!(state.transition(RunState::Running).is_err());
        assert!(state.transition(RunState::Idle).is_err());
    }
}
