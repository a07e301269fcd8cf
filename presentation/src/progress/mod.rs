//! Live run rendering.

pub mod reporter;
