//! Telemetry sources.

pub mod mock;

pub use mock::{MOCK_ERROR_POOL, generate_mock_telemetry, generate_mock_telemetry_with};
