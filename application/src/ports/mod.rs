//! Port definitions
//!
//! Ports are the interfaces the application layer depends on; adapters in
//! the infrastructure and presentation layers implement them.

pub mod conversation_logger;
pub mod participant;
pub mod reasoning_engine;
