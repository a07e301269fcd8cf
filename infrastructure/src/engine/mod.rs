//! Reasoning engine adapters.
//!
//! - [`openai::OpenAiEngine`] - OpenAI / Azure OpenAI chat completions over HTTP
//! - [`factory::EngineFactory`] - builds the engine from `[engine]` configuration

pub mod factory;
pub mod openai;

pub use factory::{EngineFactory, EngineSetupError};
pub use openai::{EngineEndpoint, OpenAiEngine};
