//! Run lifecycle.
//!
//! - [`state::RunState`] - `Idle → Running → {Completed, Cancelled, Failed}`
//! - [`cursor::RoundRobinCursor`] - whose turn is next
//! - [`summary::RunSummary`] - the final report

pub mod cursor;
pub mod state;
pub mod summary;
