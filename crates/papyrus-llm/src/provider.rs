use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Immutable per-call generation parameters. Passed explicitly with every
/// `chat` call; providers hold no mutable generation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    /// Sampling temperature in `[0.0, 1.0]`.
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

pub trait LlmProvider: Send + Sync {
    /// Send messages to the model and return the assistant response.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to communicate or the
    /// response is invalid.
    fn chat(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Convert text into a fixed-length embedding vector.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::EmbedUnsupported`] if the provider has no
    /// embedding model, or a transport error otherwise.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    fn supports_embeddings(&self) -> bool;

    fn name(&self) -> &str;
}

pub type EmbedFuture = Pin<Box<dyn Future<Output = Result<Vec<f32>, LlmError>> + Send>>;

/// Boxed embedding closure. Lets downstream crates embed text without
/// naming a concrete provider type.
pub type EmbedFn = Box<dyn Fn(&str) -> EmbedFuture + Send + Sync>;

/// Wrap a provider into an [`EmbedFn`] for index building and retrieval.
pub fn embed_fn_for<P: LlmProvider + 'static>(provider: std::sync::Arc<P>) -> EmbedFn {
    Box::new(move |text: &str| {
        let provider = std::sync::Arc::clone(&provider);
        let text = text.to_owned();
        Box::pin(async move { provider.embed(&text).await })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn default_params_match_service_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 2000);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn message_new_accepts_str_and_string() {
        let m = Message::new(Role::Assistant, "hi");
        assert_eq!(m.content, "hi");
        let m = Message::new(Role::User, String::from("hello"));
        assert_eq!(m.content, "hello");
    }
}
