//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`string::truncate`], [`string::preview`] - UTF-8 safe shortening for logs and the spinner

pub mod error;
pub mod string;
