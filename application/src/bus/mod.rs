//! Shared transcript bus.
//!
//! - [`transcript::TranscriptWriter`] - the single writer, held by the orchestrator
//! - [`transcript::TranscriptReader`] - cloneable read side: snapshots and live updates

pub mod transcript;

pub use transcript::{TranscriptBus, TranscriptReader, TranscriptWriter};
