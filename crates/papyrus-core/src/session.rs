use std::sync::Mutex;
use std::time::Duration;

use papyrus_llm::{EmbedFn, GenerationParams, LlmProvider};
use papyrus_memory::{Retriever, VectorIndex};

use crate::error::SessionError;
use crate::prompt::build_prompt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting,
}

struct Inner {
    state: SessionState,
    history: Vec<HistoryTurn>,
}

/// One chat session: an optional document index, an append-only history,
/// and at most one request in flight.
///
/// A second `ask` while one is `Awaiting` is rejected with
/// [`SessionError::Busy`] rather than queued. History grows for the
/// session's lifetime; it is dropped with the session.
pub struct ChatSession<P: LlmProvider> {
    provider: P,
    embed: EmbedFn,
    index: Option<VectorIndex>,
    retriever: Retriever,
    params: GenerationParams,
    request_timeout: Duration,
    inner: Mutex<Inner>,
}

impl<P: LlmProvider> ChatSession<P> {
    pub fn new(
        provider: P,
        embed: EmbedFn,
        params: GenerationParams,
        request_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            embed,
            index: None,
            retriever: Retriever::default(),
            params,
            request_timeout,
            inner: Mutex::new(Inner {
                state: SessionState::Idle,
                history: Vec::new(),
            }),
        }
    }

    /// Attach a built document index and the retrieval depth to use.
    #[must_use]
    pub fn with_index(mut self, index: VectorIndex, top_k: usize) -> Self {
        self.index = Some(index);
        self.retriever = Retriever::new(top_k);
        self
    }

    #[must_use]
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.lock().map_or(SessionState::Idle, |g| g.state)
    }

    /// Snapshot of the session history, oldest turn first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryTurn> {
        self.inner.lock().map_or_else(|_| Vec::new(), |g| g.history.clone())
    }

    /// Answer one question: retrieve context (when an index is attached),
    /// assemble the prompt, call the model, and append the turn.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyQuery`] for blank input, [`SessionError::Busy`]
    /// while another request is in flight, [`SessionError::Timeout`] if the
    /// model does not answer in time, and retrieval/generation failures
    /// otherwise. On any failure the history is left untouched.
    pub async fn ask(&self, question: &str) -> Result<String, SessionError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        let history = {
            let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            if guard.state == SessionState::Awaiting {
                return Err(SessionError::Busy);
            }
            guard.state = SessionState::Awaiting;
            guard.history.clone()
        };

        let result = self.run(question, &history).await;

        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.state = SessionState::Idle;
        match result {
            Ok(answer) => {
                guard.history.push(HistoryTurn {
                    question: question.to_owned(),
                    answer: answer.clone(),
                });
                Ok(answer)
            }
            Err(e) => Err(e),
        }
    }

    async fn run(
        &self,
        question: &str,
        history: &[HistoryTurn],
    ) -> Result<String, SessionError> {
        let context = match &self.index {
            Some(index) => {
                self.retriever
                    .retrieve(index, question, &self.embed)
                    .await?
            }
            None => Vec::new(),
        };

        let messages = build_prompt(&context, history, question);
        tracing::debug!(
            context_chunks = context.len(),
            history_turns = history.len(),
            "asking model"
        );

        match tokio::time::timeout(
            self.request_timeout,
            self.provider.chat(&messages, &self.params),
        )
        .await
        {
            Ok(result) => Ok(result?),
            Err(_) => Err(SessionError::Timeout(self.request_timeout.as_secs())),
        }
    }
}
