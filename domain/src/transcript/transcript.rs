//! Transcript snapshot and the append-only log behind it

use super::message::{Message, MessageContent, MessageSource};
use chrono::Utc;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// An immutable, ordered view of the shared conversation.
///
/// Cloning is cheap: every clone shares the same backing storage, and the
/// storage is never mutated once a snapshot has been handed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Arc<Vec<Message>>,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn get(&self, sequence: u64) -> Option<&Message> {
        usize::try_from(sequence)
            .ok()
            .and_then(|i| self.messages.get(i))
    }

    /// The seed message (turn 0), if the run has started.
    pub fn seed(&self) -> Option<&Message> {
        self.messages.first()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Sequence number of the newest message.
    pub fn last_index(&self) -> Option<u64> {
        self.last().map(Message::sequence)
    }

    /// Messages produced by participants (everything after the seed).
    pub fn turns(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.source().is_system())
    }

    /// Source names in transcript order.
    pub fn sources(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.source().as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Transcript {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.messages.as_slice().serialize(serializer)
    }
}

/// The writable side of a transcript.
///
/// Assigns sequence numbers (contiguous from 0) and timestamps at append
/// time. Appending after a snapshot was taken copies the backing storage, so
/// outstanding snapshots never change.
#[derive(Debug, Default)]
pub struct TranscriptLog {
    messages: Arc<Vec<Message>>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return it with its assigned sequence number.
    ///
    /// In place while no snapshot is alive. With a snapshot outstanding the
    /// whole message vector is cloned first, so each such append is O(n) in
    /// the transcript length; runs are kept short by the message ceiling.
    pub fn append(&mut self, source: MessageSource, content: MessageContent) -> &Message {
        let messages = Arc::make_mut(&mut self.messages);
        let sequence = messages.len() as u64;
        messages.push(Message::new(sequence, source, content, Utc::now()));
        &messages[messages.len() - 1]
    }

    pub fn snapshot(&self) -> Transcript {
        Transcript {
            messages: Arc::clone(&self.messages),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantName;

    fn participant(name: &str) -> MessageSource {
        MessageSource::Participant(ParticipantName::new(name).unwrap())
    }

    #[test]
    fn test_sequence_numbers_are_contiguous() {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());
        log.append(participant("A"), "one".into());
        log.append(participant("B"), "two".into());

        let snapshot = log.snapshot();
        let sequences: Vec<u64> = snapshot.iter().map(Message::sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert_eq!(snapshot.last_index(), Some(2));
    }

    #[test]
    fn test_append_copies_storage_only_while_snapshot_is_held() {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());

        let unshared = Arc::as_ptr(&log.messages);
        log.append(MessageSource::System, "no readers".into());
        assert_eq!(Arc::as_ptr(&log.messages), unshared);

        let held = log.snapshot();
        log.append(MessageSource::System, "reader holds a snapshot".into());
        assert_ne!(Arc::as_ptr(&log.messages), Arc::as_ptr(&held.messages));
        assert_eq!(held.len(), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_appends() {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());
        let before = log.snapshot();

        log.append(participant("A"), "one".into());

        assert_eq!(before.len(), 1);
        assert_eq!(log.snapshot().len(), 2);
    }

    #[test]
    fn test_turns_skip_seed() {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());
        log.append(participant("A"), "one".into());

        let snapshot = log.snapshot();
        assert_eq!(snapshot.turns().count(), 1);
        assert_eq!(snapshot.sources(), vec!["system", "A"]);
        assert_eq!(snapshot.seed().map(|m| m.sequence()), Some(0));
    }

    #[test]
    fn test_get_by_sequence() {
        let mut log = TranscriptLog::new();
        log.append(MessageSource::System, "seed".into());
        let snapshot = log.snapshot();
        assert!(snapshot.get(0).is_some());
        assert!(snapshot.get(1).is_none());
    }
}
