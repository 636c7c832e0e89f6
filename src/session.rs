// Per-session display state and the two user actions that drive it.
//
// State is an explicit snapshot behind a lock, replaced wholesale when an
// action completes. Every action bumps a generation counter; a completion
// carrying a stale generation is discarded, so a second action fired while
// the first is in flight cannot be overwritten by the slower one.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::extract;
use crate::llm::{build_prompt, CompletionBackend};
use crate::types::{AnalystError, AnalystResult, ExtractedContent};

/// Current session values: loaded content, latest answer, latest error.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub content: Option<ExtractedContent>,
    pub answer: Option<String>,
    pub error: Option<String>,
    pub busy: bool,
    generation: u64,
}

#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.clone()
    }

    /// Extract a file and store the normalized content. A successful load
    /// clears the previous answer and error; a failed one records the error
    /// message as the current error value.
    pub async fn load_file(
        &self,
        filename: &str,
        payload: &[u8],
    ) -> AnalystResult<ExtractedContent> {
        let generation = self.begin().await;
        let result = extract::extract(filename, payload);

        self.finish(generation, |state| match &result {
            Ok(content) => {
                info!(filename, tabular = content.is_tabular(), "file loaded");
                state.content = Some(content.clone());
                state.answer = None;
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        })
        .await;

        result
    }

    /// Build a prompt from the loaded content and the question, call the
    /// completion backend once, and store the answer. Requires a loaded file,
    /// a non-empty credential, and a non-empty question.
    pub async fn analyze(
        &self,
        backend: &dyn CompletionBackend,
        credential: &str,
        question: &str,
    ) -> AnalystResult<String> {
        let content = self
            .inner
            .read()
            .await
            .content
            .clone()
            .ok_or(AnalystError::MissingPrecondition("no file loaded"))?;
        if credential.is_empty() {
            return Err(AnalystError::MissingPrecondition("API credential"));
        }
        if question.trim().is_empty() {
            return Err(AnalystError::MissingPrecondition("question"));
        }

        let generation = self.begin().await;
        let result = match build_prompt(&content, question) {
            Ok(prompt) => backend.complete(&prompt, credential).await,
            Err(err) => Err(err),
        };

        self.finish(generation, |state| match &result {
            Ok(answer) => {
                state.answer = Some(answer.clone());
                state.error = None;
            }
            Err(err) => state.error = Some(err.to_string()),
        })
        .await;

        result
    }

    async fn begin(&self) -> u64 {
        let mut state = self.inner.write().await;
        state.generation += 1;
        state.busy = true;
        state.generation
    }

    async fn finish(&self, generation: u64, apply: impl FnOnce(&mut SessionState)) {
        let mut state = self.inner.write().await;
        if state.generation != generation {
            warn!(
                stale = generation,
                current = state.generation,
                "discarding stale action result"
            );
            return;
        }
        state.busy = false;
        apply(&mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubBackend {
        reply: Result<String, String>,
    }

    impl StubBackend {
        fn answering(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, _prompt: &str, _credential: &str) -> AnalystResult<String> {
            self.reply.clone().map_err(AnalystError::Completion)
        }
    }

    #[tokio::test]
    async fn load_then_analyze_stores_answer() {
        let session = Session::new();
        session.load_file("report.txt", b"revenue was 10").await.unwrap();

        let backend = StubBackend::answering("it was 10");
        let answer = session.analyze(&backend, "key", "what was revenue?").await.unwrap();

        assert_eq!(answer, "it was 10");
        let state = session.snapshot().await;
        assert_eq!(state.answer.as_deref(), Some("it was 10"));
        assert!(state.error.is_none());
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn analyze_without_file_is_a_precondition_error() {
        let session = Session::new();
        let backend = StubBackend::answering("unused");
        let err = session.analyze(&backend, "key", "question").await.unwrap_err();
        assert!(matches!(err, AnalystError::MissingPrecondition("no file loaded")));
    }

    #[tokio::test]
    async fn analyze_requires_credential_and_question() {
        let session = Session::new();
        session.load_file("a.txt", b"text").await.unwrap();
        let backend = StubBackend::answering("unused");

        let err = session.analyze(&backend, "", "question").await.unwrap_err();
        assert!(matches!(err, AnalystError::MissingPrecondition("API credential")));

        let err = session.analyze(&backend, "key", "  ").await.unwrap_err();
        assert!(matches!(err, AnalystError::MissingPrecondition("question")));
    }

    #[tokio::test]
    async fn failed_load_records_error_message() {
        let session = Session::new();
        let err = session.load_file("virus.exe", b"MZ").await.unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type");

        let state = session.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Unsupported file type"));
        assert!(state.content.is_none());
    }

    #[tokio::test]
    async fn failed_analysis_records_prefixed_error() {
        let session = Session::new();
        session.load_file("a.txt", b"text").await.unwrap();

        let backend = StubBackend::failing("backend down");
        session.analyze(&backend, "key", "q").await.unwrap_err();

        let state = session.snapshot().await;
        let error = state.error.unwrap();
        assert!(error.starts_with("API Error: "));
        assert!(error.contains("backend down"));
    }

    #[tokio::test]
    async fn successful_load_clears_previous_answer() {
        let session = Session::new();
        session.load_file("a.txt", b"one").await.unwrap();
        let backend = StubBackend::answering("answer one");
        session.analyze(&backend, "key", "q").await.unwrap();

        session.load_file("b.txt", b"two").await.unwrap();
        let state = session.snapshot().await;
        assert!(state.answer.is_none());
    }

    #[tokio::test]
    async fn stale_generation_result_is_discarded() {
        let session = Session::new();
        let first = session.begin().await;
        let second = session.begin().await;
        assert!(second > first);

        session
            .finish(first, |state| state.answer = Some("stale".to_string()))
            .await;
        let state = session.snapshot().await;
        assert!(state.answer.is_none());

        session
            .finish(second, |state| state.answer = Some("fresh".to_string()))
            .await;
        let state = session.snapshot().await;
        assert_eq!(state.answer.as_deref(), Some("fresh"));
    }
}
