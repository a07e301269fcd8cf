//! Presentation layer for sentinel
//!
//! This crate contains the CLI definition, the console formatter and the
//! live event printer.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::EventPrinter;
