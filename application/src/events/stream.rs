//! Event stream: bounded queue in, per-observer bounded buffers out.
//!
//! The orchestrator publishes with [`EventPublisher::publish`], which never
//! waits. A dedicated task forwards each event, in publication order, to
//! every registered observer. Registration happens by message passing over a
//! control channel, so there is no shared observer list.
//!
//! Slow consumers lose events instead of slowing the run: a full queue or a
//! full observer buffer drops the event for that consumer and logs it.

use crate::ports::conversation_logger::ConversationLogger;
use futures::Stream;
use sentinel_domain::RunEvent;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default capacity of the publication queue.
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 256;

/// Default capacity of each observer's buffer.
pub const DEFAULT_OBSERVER_BUFFER: usize = 256;

/// Identifies one subscription.
pub type ObserverId = u64;

enum Control {
    Subscribe {
        id: ObserverId,
        tx: mpsc::Sender<RunEvent>,
    },
    Unsubscribe(ObserverId),
    Close(oneshot::Sender<()>),
}

/// Handle used to publish events. Cheap to clone.
#[derive(Clone)]
pub struct EventPublisher {
    tx: mpsc::Sender<RunEvent>,
    dropped: Arc<AtomicU64>,
}

impl EventPublisher {
    /// Queue an event for delivery without waiting.
    ///
    /// Returns `false` when the event was dropped (queue full or stream closed).
    pub fn publish(&self, event: RunEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "Event queue full, dropping {} event #{}",
                    event.kind, event.sequence
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(
                    "Event stream closed, dropping {} event #{}",
                    event.kind, event.sequence
                );
                false
            }
        }
    }

    /// Number of events dropped because the publication queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Fan-out of run events to any number of observers.
///
/// Must be created inside a Tokio runtime.
pub struct EventStream {
    publisher: EventPublisher,
    control: mpsc::UnboundedSender<Control>,
    next_id: AtomicU64,
    observer_buffer: usize,
    handle: JoinHandle<()>,
}

impl EventStream {
    pub fn new(queue_capacity: usize, observer_buffer: usize) -> Self {
        let (tx, events) = mpsc::channel(queue_capacity.max(1));
        let (control, control_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(fan_out(events, control_rx));

        Self {
            publisher: EventPublisher {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            control,
            next_id: AtomicU64::new(0),
            observer_buffer: observer_buffer.max(1),
            handle,
        }
    }

    pub fn publisher(&self) -> EventPublisher {
        self.publisher.clone()
    }

    /// Subscribe with the default observer buffer.
    pub fn subscribe(&self) -> EventSubscription {
        self.subscribe_with_buffer(self.observer_buffer)
    }

    /// Subscribe with an explicit buffer size.
    ///
    /// The subscription receives every event published after the fan-out
    /// task registers it. Subscribing to a closed stream yields a
    /// subscription that ends immediately.
    pub fn subscribe_with_buffer(&self, buffer: usize) -> EventSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(buffer.max(1));
        if self.control.send(Control::Subscribe { id, tx }).is_err() {
            debug!("Subscribe after event stream closed (observer {})", id);
        }
        EventSubscription { id, rx }
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        let _ = self.control.send(Control::Unsubscribe(id));
    }

    /// Deliver everything already queued, then end every observer stream.
    pub async fn close(self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.control.send(Control::Close(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
        if let Err(e) = self.handle.await {
            warn!("Event fan-out task ended abnormally: {}", e);
        }
    }
}

/// One observer's ordered view of the event stream.
pub struct EventSubscription {
    id: ObserverId,
    rx: mpsc::Receiver<RunEvent>,
}

impl EventSubscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Next event, or `None` once the stream is closed.
    pub async fn recv(&mut self) -> Option<RunEvent> {
        self.rx.recv().await
    }

    pub fn into_stream(self) -> impl Stream<Item = RunEvent> + Send + Unpin + 'static {
        Box::pin(futures::stream::unfold(self.rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        }))
    }
}

/// Spawn an observer that writes every event to `logger` until the stream closes.
pub fn forward_to_logger(
    mut subscription: EventSubscription,
    logger: Arc<dyn ConversationLogger>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            logger.log(&event);
        }
    })
}

async fn fan_out(
    mut events: mpsc::Receiver<RunEvent>,
    mut control: mpsc::UnboundedReceiver<Control>,
) {
    let mut observers: HashMap<ObserverId, mpsc::Sender<RunEvent>> = HashMap::new();

    loop {
        tokio::select! {
            biased;

            command = control.recv() => match command {
                Some(Control::Subscribe { id, tx }) => {
                    debug!("Observer {} subscribed", id);
                    observers.insert(id, tx);
                }
                Some(Control::Unsubscribe(id)) => {
                    debug!("Observer {} unsubscribed", id);
                    observers.remove(&id);
                }
                Some(Control::Close(done)) => {
                    events.close();
                    while let Some(event) = events.recv().await {
                        deliver(&mut observers, event);
                    }
                    observers.clear();
                    let _ = done.send(());
                    return;
                }
                // Stream handle dropped without close: keep draining until
                // all publishers are gone.
                None => {
                    while let Some(event) = events.recv().await {
                        deliver(&mut observers, event);
                    }
                    return;
                }
            },

            event = events.recv() => match event {
                Some(event) => deliver(&mut observers, event),
                None => return,
            },
        }
    }
}

fn deliver(observers: &mut HashMap<ObserverId, mpsc::Sender<RunEvent>>, event: RunEvent) {
    observers.retain(|id, tx| match tx.try_send(event.clone()) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(_)) => {
            warn!(
                "Observer {} is lagging, dropping {} event #{}",
                id, event.kind, event.sequence
            );
            true
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            debug!("Observer {} went away, removing", id);
            false
        }
    });
}
