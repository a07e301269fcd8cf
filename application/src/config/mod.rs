//! Application-level configuration.
//!
//! - [`RunParams`] - orchestrator loop control (turn timeout, event buffers)

pub mod run_params;

pub use run_params::RunParams;
