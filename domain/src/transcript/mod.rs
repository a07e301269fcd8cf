//! Shared conversation state.
//!
//! - [`message::Message`] - one immutable entry, stamped at append time
//! - [`transcript::Transcript`] - an immutable snapshot handed to readers
//! - [`transcript::TranscriptLog`] - the append-only writable side

pub mod message;
#[allow(clippy::module_inception)]
pub mod transcript;
