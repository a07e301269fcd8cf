//! Run event fan-out.
//!
//! - [`stream::EventStream`] - fan-out task with subscribe/unsubscribe
//! - [`stream::EventPublisher`] - non-blocking publishing handle for the orchestrator
//! - [`stream::EventSubscription`] - one observer's ordered receiver

pub mod stream;

pub use stream::{
    DEFAULT_EVENT_QUEUE_CAPACITY, DEFAULT_OBSERVER_BUFFER, EventPublisher, EventStream,
    EventSubscription, ObserverId, forward_to_logger,
};
