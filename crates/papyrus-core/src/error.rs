#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Blank question; no state transition, no remote call.
    #[error("question is empty")]
    EmptyQuery,

    /// A request is already in flight for this session.
    #[error("a request is already in flight")]
    Busy,

    #[error("generation timed out after {0} seconds")]
    Timeout(u64),

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] papyrus_memory::IndexError),

    #[error("generation failed: {0}")]
    Generation(#[from] papyrus_llm::LlmError),
}
