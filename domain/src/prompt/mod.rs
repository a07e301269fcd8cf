//! Prompts and personas for the built-in incident-response team.

pub mod persona;
pub mod template;

pub use persona::Persona;
pub use template::PromptTemplate;
