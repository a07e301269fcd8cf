//! Composite termination evaluator

use super::condition::{
    EvaluatorError, ExternalTermination, MaxMessageTermination, TerminationCondition,
    TextMentionTermination,
};
use super::signal::TerminationSignal;
use crate::transcript::transcript::Transcript;

/// OR-composition of termination predicates.
///
/// Predicates are consulted in the order they were added; the first one that
/// fires decides the stop reason.
///
/// # Example
///
/// ```
/// use sentinel_domain::termination::{
///     MaxMessageTermination, TerminationEvaluator, TextMentionTermination,
/// };
///
/// let evaluator = TerminationEvaluator::builder()
///     .with(MaxMessageTermination::new(12).unwrap())
///     .with(TextMentionTermination::new("TERMINATE").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(evaluator.len(), 2);
/// ```
#[derive(Debug)]
pub struct TerminationEvaluator {
    conditions: Vec<Box<dyn TerminationCondition>>,
}

impl TerminationEvaluator {
    pub fn builder() -> TerminationEvaluatorBuilder {
        TerminationEvaluatorBuilder::default()
    }

    /// Build the usual policy from plain configuration values.
    pub fn from_limits(
        max_messages: Option<usize>,
        stop_tokens: &[String],
    ) -> Result<Self, EvaluatorError> {
        let mut builder = Self::builder();
        if let Some(limit) = max_messages {
            builder = builder.with(MaxMessageTermination::new(limit)?);
        }
        for token in stop_tokens {
            builder = builder.with(TextMentionTermination::new(token.clone())?);
        }
        builder.build()
    }

    /// Add a graceful external stop handle to an already built evaluator.
    pub fn with_external(mut self, handle: ExternalTermination) -> Self {
        self.conditions.push(Box::new(handle));
        self
    }

    pub fn evaluate(&self, transcript: &Transcript) -> TerminationSignal {
        self.conditions
            .iter()
            .find_map(|c| c.check(transcript))
            .map(|(reason, index)| TerminationSignal::stop(reason, index))
            .unwrap_or(TerminationSignal::Continue)
    }

    /// Names of the configured predicates, in evaluation order.
    pub fn condition_names(&self) -> Vec<&'static str> {
        self.conditions.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Builder for [`TerminationEvaluator`].
#[derive(Debug, Default)]
pub struct TerminationEvaluatorBuilder {
    conditions: Vec<Box<dyn TerminationCondition>>,
}

impl TerminationEvaluatorBuilder {
    pub fn with(mut self, condition: impl TerminationCondition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    pub fn build(self) -> Result<TerminationEvaluator, EvaluatorError> {
        if self.conditions.is_empty() {
            return Err(EvaluatorError::NoConditions);
        }
        Ok(TerminationEvaluator {
            conditions: self.conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantName;
    use crate::termination::signal::StopReason;
    use crate::transcript::message::MessageSource;
    use crate::transcript::transcript::TranscriptLog;

    fn log_with(turns: &[&str]) -> TranscriptLog {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());
        let name = ParticipantName::new("A").unwrap();
        for turn in turns {
            log.append(MessageSource::Participant(name.clone()), (*turn).into());
        }
        log
    }

    #[test]
    fn test_empty_policy_rejected() {
        assert_eq!(
            TerminationEvaluator::builder().build().unwrap_err(),
            EvaluatorError::NoConditions
        );
        assert_eq!(
            TerminationEvaluator::from_limits(None, &[]).unwrap_err(),
            EvaluatorError::NoConditions
        );
    }

    #[test]
    fn test_malformed_config_rejected_at_construction() {
        assert_eq!(
            TerminationEvaluator::from_limits(Some(0), &[]).unwrap_err(),
            EvaluatorError::ZeroMessageLimit
        );
        assert_eq!(
            TerminationEvaluator::from_limits(Some(5), &[String::new()]).unwrap_err(),
            EvaluatorError::EmptyStopToken
        );
    }

    #[test]
    fn test_continue_when_nothing_fires() {
        let evaluator =
            TerminationEvaluator::from_limits(Some(10), &["TERMINATE".to_string()]).unwrap();
        let log = log_with(&["one", "two"]);
        assert_eq!(
            evaluator.evaluate(&log.snapshot()),
            TerminationSignal::Continue
        );
    }

    #[test]
    fn test_first_firing_condition_wins() {
        let evaluator =
            TerminationEvaluator::from_limits(Some(3), &["TERMINATE".to_string()]).unwrap();
        let log = log_with(&["one", "TERMINATE"]);

        // Both fire on message 2; the ceiling was added first.
        assert_eq!(
            evaluator.evaluate(&log.snapshot()),
            TerminationSignal::stop(StopReason::MaxMessages { limit: 3 }, 2)
        );
    }

    #[test]
    fn test_stop_token_fires_before_ceiling() {
        let evaluator =
            TerminationEvaluator::from_limits(Some(10), &["DONE".to_string()]).unwrap();
        let log = log_with(&["one", "all DONE"]);
        assert_eq!(
            evaluator.evaluate(&log.snapshot()),
            TerminationSignal::stop(
                StopReason::StopToken {
                    token: "DONE".to_string()
                },
                2
            )
        );
    }

    #[test]
    fn test_external_handle() {
        let handle = ExternalTermination::new();
        let evaluator = TerminationEvaluator::from_limits(Some(10), &[])
            .unwrap()
            .with_external(handle.clone());
        assert_eq!(evaluator.condition_names(), vec!["max_messages", "external"]);

        let log = log_with(&["one"]);
        assert!(!evaluator.evaluate(&log.snapshot()).is_stop());
        handle.set();
        assert_eq!(
            evaluator.evaluate(&log.snapshot()).reason(),
            Some(&StopReason::ExternalStop)
        );
    }
}
