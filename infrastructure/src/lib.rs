//! Infrastructure layer for sentinel
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration loading, the OpenAI-compatible reasoning
//! engine, mock telemetry and the JSONL event logger.

pub mod config;
pub mod engine;
pub mod logging;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEngineConfig, FileLoggingConfig,
    FileRunConfig, FileTelemetryConfig,
};
pub use engine::{EngineEndpoint, EngineFactory, EngineSetupError, OpenAiEngine};
pub use logging::JsonlConversationLogger;
pub use telemetry::{MOCK_ERROR_POOL, generate_mock_telemetry};
