// Datalens - document Q&A toolkit: extract file content, ask an LLM about it,
// and derive chart descriptors for tabular columns.

pub mod charts;
pub mod config;
pub mod extract;
pub mod llm;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use session::{Session, SessionState};
pub use types::{AnalystError, AnalystResult, ContentPreview, ExtractedContent, Row};
