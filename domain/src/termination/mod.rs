//! Termination policy.
//!
//! - [`signal::TerminationSignal`] / [`signal::StopReason`] - the verdict
//! - [`condition`] - individual predicates (ceiling, stop token, external)
//! - [`evaluator::TerminationEvaluator`] - OR-composition of predicates

pub mod condition;
pub mod evaluator;
pub mod signal;

pub use condition::{
    EvaluatorError, ExternalTermination, MaxMessageTermination, TerminationCondition,
    TextMentionTermination,
};
pub use evaluator::{TerminationEvaluator, TerminationEvaluatorBuilder};
pub use signal::{StopReason, TerminationSignal};
