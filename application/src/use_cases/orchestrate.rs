//! Orchestrate use case
//!
//! Drives one run: strict round-robin over a fixed participant list, one
//! participant active at a time, termination policy consulted after every
//! appended message.
//!
//! ```text
//! Idle ──start──▶ Running ──stop signal──▶ Completed
//!                    │  ▲
//!                    │  └── turn appended, policy says continue
//!                    ├──── token cancelled / external stop ──▶ Cancelled
//!                    └──── participant error/timeout/panic ──▶ Failed
//! ```

use crate::bus::{TranscriptBus, TranscriptReader, TranscriptWriter};
use crate::config::RunParams;
use crate::events::EventPublisher;
use crate::ports::participant::{Participant, ParticipantError};
use sentinel_domain::core::string::preview;
use sentinel_domain::{
    EvaluatorError, EventPayload, MessageContent, MessageSource, ParticipantName,
    RoundRobinCursor, RunEvent, RunId, RunState, RunSummary, StopReason, TerminationEvaluator,
    TerminationSignal,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Max length of the content preview in per-turn log lines.
const LOG_PREVIEW_LEN: usize = 80;

/// Errors raised while setting up a run
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("No participants configured")]
    NoParticipants,

    #[error("Duplicate participant name: {0}")]
    DuplicateParticipant(ParticipantName),

    #[error("Invalid termination policy: {0}")]
    Evaluator(#[from] EvaluatorError),
}

type TurnResult = Result<MessageContent, ParticipantError>;

enum TurnOutcome {
    Produced(MessageContent),
    Discarded(&'static str),
    Failed(ParticipantError),
}

enum Waited {
    Joined(Result<TurnResult, JoinError>),
    TimedOut(Duration),
}

/// Scheduler for one run
///
/// One orchestrator serves exactly one run; [`run`](Self::run) consumes it.
pub struct Orchestrator {
    run_id: RunId,
    participants: Vec<Arc<dyn Participant>>,
    cursor: RoundRobinCursor,
    evaluator: TerminationEvaluator,
    params: RunParams,
    writer: TranscriptWriter,
    events: Option<EventPublisher>,
    event_sequence: u64,
    cancel: CancellationToken,
    state: RunState,
}

impl Orchestrator {
    pub fn new(
        participants: Vec<Arc<dyn Participant>>,
        evaluator: TerminationEvaluator,
        params: RunParams,
    ) -> Result<Self, OrchestratorError> {
        let cursor =
            RoundRobinCursor::new(participants.len()).ok_or(OrchestratorError::NoParticipants)?;

        let mut seen = HashSet::new();
        for participant in &participants {
            if !seen.insert(participant.name().clone()) {
                return Err(OrchestratorError::DuplicateParticipant(
                    participant.name().clone(),
                ));
            }
        }

        let (writer, _) = TranscriptBus::new();
        Ok(Self {
            run_id: RunId::generate(),
            participants,
            cursor,
            evaluator,
            params,
            writer,
            events: None,
            event_sequence: 0,
            cancel: CancellationToken::new(),
            state: RunState::Idle,
        })
    }

    /// Build with the usual message ceiling / stop token policy.
    pub fn from_limits(
        participants: Vec<Arc<dyn Participant>>,
        max_messages: Option<usize>,
        stop_tokens: &[String],
        params: RunParams,
    ) -> Result<Self, OrchestratorError> {
        let evaluator = TerminationEvaluator::from_limits(max_messages, stop_tokens)?;
        Self::new(participants, evaluator, params)
    }

    pub fn with_events(mut self, publisher: EventPublisher) -> Self {
        self.events = Some(publisher);
        self
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn transcript_reader(&self) -> TranscriptReader {
        self.writer.reader()
    }

    pub fn participant_names(&self) -> Vec<ParticipantName> {
        self.participants.iter().map(|p| p.name().clone()).collect()
    }

    /// Run to completion, cancellation, or failure.
    ///
    /// Never returns an error: the summary states the terminal state, why it
    /// was reached, and carries the transcript up to that point.
    pub async fn run(mut self, seed: impl Into<MessageContent>) -> RunSummary {
        let started_at = chrono::Utc::now();
        let clock = Instant::now();

        self.transition(RunState::Running);
        let seed = self.writer.append(MessageSource::System, seed.into());
        info!(
            "Starting run {} with {} participants",
            self.run_id,
            self.participants.len()
        );
        self.emit(EventPayload::RunStarted {
            participants: self.participant_names(),
            seed,
        });

        let mut turns: u64 = 0;
        let mut error = None;
        let mut signal = self.evaluator.evaluate(&self.writer.snapshot());

        while !signal.is_stop() {
            if self.cancel.is_cancelled() {
                signal = self.stop_signal(StopReason::Cancelled);
                break;
            }

            let participant = Arc::clone(&self.participants[self.cursor.advance()]);
            let name = participant.name().clone();
            let turn = turns + 1;
            debug!("Turn {}: {} is up", turn, name);

            match self.invoke(participant).await {
                TurnOutcome::Produced(content) => {
                    let message = self
                        .writer
                        .append(MessageSource::Participant(name.clone()), content);
                    turns = turn;
                    info!(
                        "Turn {} produced by {} (message #{}): {}",
                        turn,
                        name,
                        message.sequence(),
                        preview(&message.content().render(), LOG_PREVIEW_LEN)
                    );
                    self.emit(EventPayload::TurnProduced { turn, message });
                    signal = self.evaluator.evaluate(&self.writer.snapshot());
                }
                TurnOutcome::Discarded(reason) => {
                    info!("Turn {} by {} discarded: {}", turn, name, reason);
                    self.emit(EventPayload::TurnDiscarded {
                        turn,
                        participant: name,
                        reason: reason.to_string(),
                    });
                    signal = self.stop_signal(StopReason::Cancelled);
                }
                TurnOutcome::Failed(e) => {
                    warn!("Turn {} by {} failed: {}", turn, name, e);
                    error = Some(e.to_string());
                    signal = self.stop_signal(StopReason::ParticipantFailed {
                        participant: name.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let terminal = signal
            .reason()
            .map(StopReason::terminal_state)
            .unwrap_or(RunState::Completed);
        self.transition(terminal);

        let duration = clock.elapsed();
        match signal.reason() {
            Some(reason) => info!(
                "Run {} {} after {} turns in {:.1}s: {}",
                self.run_id,
                terminal,
                turns,
                duration.as_secs_f64(),
                reason
            ),
            None => info!("Run {} {} after {} turns", self.run_id, terminal, turns),
        }
        self.emit(EventPayload::finished(signal.clone(), turns));

        RunSummary {
            run_id: self.run_id,
            state: terminal,
            signal,
            turns,
            started_at,
            duration,
            error,
            transcript: self.writer.snapshot(),
        }
    }

    /// Run one participant invocation in its own task.
    ///
    /// Cancellation detaches the task; a timeout aborts it.
    async fn invoke(&self, participant: Arc<dyn Participant>) -> TurnOutcome {
        let snapshot = self.writer.snapshot();
        let token = self.cancel.clone();
        let mut task: JoinHandle<TurnResult> =
            tokio::spawn(async move { participant.act(&snapshot, &token).await });

        let waited = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            waited = wait(&mut task, self.params.turn_timeout) => Some(waited),
        };

        let Some(waited) = waited else {
            return TurnOutcome::Discarded("run cancelled while the participant was working");
        };
        if self.cancel.is_cancelled() {
            return TurnOutcome::Discarded("result arrived after cancellation");
        }

        match waited {
            Waited::Joined(Ok(Ok(content))) => TurnOutcome::Produced(content),
            Waited::Joined(Ok(Err(e))) => TurnOutcome::Failed(e),
            Waited::Joined(Err(e)) => TurnOutcome::Failed(ParticipantError::Panicked(e.to_string())),
            Waited::TimedOut(limit) => {
                task.abort();
                TurnOutcome::Failed(ParticipantError::TimedOut(limit))
            }
        }
    }

    fn stop_signal(&self, reason: StopReason) -> TerminationSignal {
        let index = self.writer.snapshot().last_index().unwrap_or_default();
        TerminationSignal::stop(reason, index)
    }

    fn transition(&mut self, next: RunState) {
        if let Err(e) = self.state.transition(next) {
            warn!("Run {}: {}", self.run_id, e);
        }
    }

    fn emit(&mut self, payload: EventPayload) {
        if let Some(publisher) = &self.events {
            publisher.publish(RunEvent::new(self.run_id, self.event_sequence, payload));
        }
        self.event_sequence += 1;
    }
}

async fn wait(task: &mut JoinHandle<TurnResult>, timeout: Option<Duration>) -> Waited {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => Waited::Joined(joined),
            Err(_) => Waited::TimedOut(limit),
        },
        None => Waited::Joined(task.await),
    }
}
