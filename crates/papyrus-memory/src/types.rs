use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub source: String,
    pub content_type: String,
    pub extra: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// A contiguous slice of source text, the unit of retrieval.
/// Immutable once created; owned by the index after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Split ordinal, unique within one document.
    pub id: usize,
    pub text: String,
    /// Char offset of the window start in the source text.
    pub source_offset: usize,
}
