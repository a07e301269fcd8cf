//! Single-writer transcript with live subscription.
//!
//! Appends assign the sequence number and publish to subscribers under the
//! same write guard, so a reader taking a snapshot and then subscribing via
//! [`TranscriptReader::subscribe_with_snapshot`] sees every message exactly
//! once.

use sentinel_domain::{Message, MessageContent, MessageSource, Transcript, TranscriptLog};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Default capacity of the live-update channel.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 256;

struct Shared {
    log: RwLock<TranscriptLog>,
    updates: broadcast::Sender<Message>,
}

/// Constructor for a writer/reader pair over one transcript.
pub struct TranscriptBus;

impl TranscriptBus {
    /// Create an empty transcript.
    ///
    /// There is exactly one [`TranscriptWriter`]; it cannot be cloned.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (TranscriptWriter, TranscriptReader) {
        Self::with_capacity(DEFAULT_SUBSCRIBER_CAPACITY)
    }

    /// Like [`new`](Self::new) with an explicit live-update buffer size.
    pub fn with_capacity(capacity: usize) -> (TranscriptWriter, TranscriptReader) {
        let (updates, _) = broadcast::channel(capacity.max(1));
        let shared = Arc::new(Shared {
            log: RwLock::new(TranscriptLog::new()),
            updates,
        });
        (
            TranscriptWriter {
                shared: Arc::clone(&shared),
            },
            TranscriptReader { shared },
        )
    }
}

/// The write side of the transcript.
pub struct TranscriptWriter {
    shared: Arc<Shared>,
}

impl TranscriptWriter {
    /// Append a message and return its sequence number.
    pub fn append(&mut self, source: MessageSource, content: MessageContent) -> Message {
        let mut log = self.shared.log.write().unwrap_or_else(|e| e.into_inner());
        let message = log.append(source, content).clone();
        // No subscribers is fine.
        let _ = self.shared.updates.send(message.clone());
        message
    }

    pub fn snapshot(&self) -> Transcript {
        self.shared
            .log
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .snapshot()
    }

    pub fn reader(&self) -> TranscriptReader {
        TranscriptReader {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// The read side of the transcript.
#[derive(Clone)]
pub struct TranscriptReader {
    shared: Arc<Shared>,
}

impl TranscriptReader {
    /// Consistent, immutable view at the instant of the call.
    pub fn snapshot(&self) -> Transcript {
        self.shared
            .log
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .snapshot()
    }

    /// Live updates for messages appended after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.shared.updates.subscribe()
    }

    /// Snapshot and live receiver taken atomically with respect to appends.
    pub fn subscribe_with_snapshot(&self) -> (Transcript, broadcast::Receiver<Message>) {
        let log = self.shared.log.read().unwrap_or_else(|e| e.into_inner());
        (log.snapshot(), self.shared.updates.subscribe())
    }

    pub fn len(&self) -> usize {
        self.shared
            .log
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
