// Completion endpoint client and prompt assembly

pub mod client;
pub mod prompt;

pub use client::{CompletionBackend, CompletionClient, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use prompt::build_prompt;
