//! Reasoning engine port
//!
//! Defines the interface participants use to produce the next message.

use async_trait::async_trait;
use sentinel_domain::{EngineContext, MessageContent};
use thiserror::Error;

/// Errors that can occur during reasoning engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

/// Reasoning capability behind a participant
///
/// Implementations (adapters) live in the infrastructure layer. Timeouts and
/// retries inside one call are the adapter's concern.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Produce the next message content for the given context.
    async fn generate(&self, context: &EngineContext) -> Result<MessageContent, EngineError>;

    /// Human-readable identifier (e.g. the model name), for logs.
    fn describe(&self) -> String {
        "reasoning-engine".to_string()
    }
}
