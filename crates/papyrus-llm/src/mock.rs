//! Test-only mock provider.

use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{GenerationParams, LlmProvider, Message};

type EmbedClosure = Arc<dyn Fn(&str) -> Vec<f32> + Send + Sync>;

#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    pub default_response: String,
    embed_with: Option<EmbedClosure>,
    pub embedding: Vec<f32>,
    pub supports_embeddings: bool,
    pub fail_chat: bool,
    pub fail_embed: bool,
    /// Milliseconds to sleep before returning a chat response.
    pub delay_ms: u64,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock response".into(),
            embed_with: None,
            embedding: vec![0.0; 8],
            supports_embeddings: false,
            fail_chat: false,
            fail_embed: false,
            delay_ms: 0,
        }
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("default_response", &self.default_response)
            .field("supports_embeddings", &self.supports_embeddings)
            .field("fail_chat", &self.fail_chat)
            .field("fail_embed", &self.fail_embed)
            .finish_non_exhaustive()
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Return a fixed vector from `embed`.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self.supports_embeddings = true;
        self
    }

    /// Compute embeddings per input text, for deterministic retrieval tests.
    #[must_use]
    pub fn with_embed_fn(mut self, f: impl Fn(&str) -> Vec<f32> + Send + Sync + 'static) -> Self {
        self.embed_with = Some(Arc::new(f));
        self.supports_embeddings = true;
        self
    }
}

impl LlmProvider for MockProvider {
    async fn chat(
        &self,
        _messages: &[Message],
        _params: &GenerationParams,
    ) -> Result<String, LlmError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail_chat {
            return Err(LlmError::Other("mock chat error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        if self.fail_embed {
            return Err(LlmError::Other("mock embed error".into()));
        }
        if !self.supports_embeddings {
            return Err(LlmError::EmbedUnsupported { provider: "mock" });
        }
        if let Some(f) = &self.embed_with {
            Ok(f(text))
        } else {
            Ok(self.embedding.clone())
        }
    }

    fn supports_embeddings(&self) -> bool {
        self.supports_embeddings
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Role;

    fn msgs() -> Vec<Message> {
        vec![Message::new(Role::User, "hi")]
    }

    #[tokio::test]
    async fn scripted_responses_in_order() {
        let p = MockProvider::with_responses(vec!["one".into(), "two".into()]);
        let params = GenerationParams::default();
        assert_eq!(p.chat(&msgs(), &params).await.unwrap(), "one");
        assert_eq!(p.chat(&msgs(), &params).await.unwrap(), "two");
        assert_eq!(p.chat(&msgs(), &params).await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn failing_chat_errors() {
        let p = MockProvider::failing();
        assert!(p.chat(&msgs(), &GenerationParams::default()).await.is_err());
    }

    #[tokio::test]
    async fn embed_unsupported_by_default() {
        let p = MockProvider::default();
        assert!(!p.supports_embeddings());
        assert!(matches!(
            p.embed("x").await,
            Err(LlmError::EmbedUnsupported { .. })
        ));
    }

    #[tokio::test]
    async fn embed_fn_varies_by_input() {
        let p = MockProvider::default()
            .with_embed_fn(|text| vec![if text.contains('a') { 1.0 } else { 0.0 }]);
        assert_eq!(p.embed("abc").await.unwrap(), vec![1.0]);
        assert_eq!(p.embed("xyz").await.unwrap(), vec![0.0]);
    }
}
