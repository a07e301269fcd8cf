//! Use cases.

pub mod orchestrate;
