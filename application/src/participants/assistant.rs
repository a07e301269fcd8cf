//! Participant backed by a reasoning engine.

use crate::ports::participant::{Participant, ParticipantError};
use crate::ports::reasoning_engine::{EngineError, ReasoningEngine};
use async_trait::async_trait;
use sentinel_domain::{EngineContext, MessageContent, ParticipantName, ParticipantProfile, Transcript};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A persona that asks its reasoning engine for every turn.
///
/// Stateless across turns: everything it knows comes from the transcript.
pub struct AssistantParticipant<E: ReasoningEngine + ?Sized> {
    profile: ParticipantProfile,
    engine: Arc<E>,
}

impl<E: ReasoningEngine + ?Sized> AssistantParticipant<E> {
    pub fn new(profile: ParticipantProfile, engine: Arc<E>) -> Self {
        Self { profile, engine }
    }

    pub fn profile(&self) -> &ParticipantProfile {
        &self.profile
    }
}

#[async_trait]
impl<E: ReasoningEngine + ?Sized + 'static> Participant for AssistantParticipant<E> {
    fn name(&self) -> &ParticipantName {
        &self.profile.name
    }

    fn description(&self) -> &str {
        &self.profile.description
    }

    async fn act(
        &self,
        transcript: &Transcript,
        cancel: &CancellationToken,
    ) -> Result<MessageContent, ParticipantError> {
        let context =
            EngineContext::for_speaker(&self.profile.name, &self.profile.system_prompt, transcript);
        debug!(
            "{} asking {} with {} messages",
            self.profile.name,
            self.engine.describe(),
            context.messages.len()
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(EngineError::Cancelled.into()),
            result = self.engine.generate(&context) => Ok(result?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_domain::{MessageSource, TranscriptLog};
    use std::sync::Mutex;
    use std::time::Duration;

    struct RecordingEngine {
        seen: Mutex<Vec<EngineContext>>,
        reply: &'static str,
    }

    #[async_trait]
    impl ReasoningEngine for RecordingEngine {
        async fn generate(&self, context: &EngineContext) -> Result<MessageContent, EngineError> {
            self.seen.lock().unwrap().push(context.clone());
            Ok(MessageContent::text(self.reply))
        }
    }

    struct HangingEngine;

    #[async_trait]
    impl ReasoningEngine for HangingEngine {
        async fn generate(&self, _context: &EngineContext) -> Result<MessageContent, EngineError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(MessageContent::text("too late"))
        }
    }

    fn profile(name: &str) -> ParticipantProfile {
        ParticipantProfile::new(ParticipantName::new(name).unwrap(), "test", "You test.")
    }

    fn seed() -> Transcript {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "incident".into());
        log.snapshot()
    }

    #[tokio::test]
    async fn test_act_renders_context_and_returns_reply() {
        let engine = Arc::new(RecordingEngine {
            seen: Mutex::new(Vec::new()),
            reply: "observation",
        });
        let participant = AssistantParticipant::new(profile("Observer"), engine.clone());

        let content = participant
            .act(&seed(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(content.as_text(), Some("observation"));
        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].speaker, "Observer");
        assert_eq!(seen[0].system_prompt(), Some("You test."));
        assert_eq!(participant.description(), "test");
    }

    #[tokio::test]
    async fn test_act_returns_early_on_cancel() {
        let participant = AssistantParticipant::new(profile("Observer"), Arc::new(HangingEngine));
        let token = CancellationToken::new();
        token.cancel();

        let err = participant.act(&seed(), &token).await.unwrap_err();
        assert!(matches!(err, ParticipantError::Engine(EngineError::Cancelled)));
    }

    #[tokio::test]
    async fn test_works_with_trait_object_engine() {
        let engine: Arc<dyn ReasoningEngine> = Arc::new(RecordingEngine {
            seen: Mutex::new(Vec::new()),
            reply: "ok",
        });
        let participant = AssistantParticipant::new(profile("Reporter"), engine);
        let content = participant
            .act(&seed(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(content.render(), "ok");
    }
}
