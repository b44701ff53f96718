//! Chat and embedding provider abstraction with an OpenAI-compatible backend.

pub mod error;
mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod openai;
pub mod provider;
mod retry;

pub use error::LlmError;
pub use provider::{EmbedFn, EmbedFuture, GenerationParams, LlmProvider, Message, Role};
