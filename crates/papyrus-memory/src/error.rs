#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Caller-side parameter error. Not retried.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Remote embedding call failed. The caller may retry the whole build.
    #[error("embedding failed: {0}")]
    Embedding(#[from] papyrus_llm::LlmError),

    /// An embedding came back with a different length than the first one.
    /// The whole build aborts; no partial index is kept.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("file too large: {0} bytes")]
    FileTooLarge(u64),

    #[cfg(feature = "pdf")]
    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("indexing failed: {0}")]
    Index(#[from] IndexError),
}
