use papyrus_llm::EmbedFn;

use crate::error::DocumentError;
use crate::index::VectorIndex;
use crate::loader::DocumentLoader;
use crate::splitter::TextSplitter;
use crate::types::Document;

/// One-shot document ingestion: split, embed, build the index.
pub struct IngestionPipeline {
    splitter: TextSplitter,
}

impl IngestionPipeline {
    #[must_use]
    pub fn new(splitter: TextSplitter) -> Self {
        Self { splitter }
    }

    /// Split a document and embed every chunk into a fresh index.
    ///
    /// # Errors
    ///
    /// Returns an error if any embedding call fails; no partial index
    /// survives a failed build.
    pub async fn ingest(
        &self,
        document: &Document,
        embed: &EmbedFn,
    ) -> Result<VectorIndex, DocumentError> {
        let chunks = self.splitter.split(&document.content);
        tracing::info!(
            source = %document.metadata.source,
            chunks = chunks.len(),
            "ingesting document"
        );
        Ok(VectorIndex::build(chunks, embed).await?)
    }

    /// # Errors
    ///
    /// Returns an error if loading, embedding, or indexing fails.
    pub async fn load_and_ingest(
        &self,
        loader: &(dyn DocumentLoader + '_),
        path: &std::path::Path,
        embed: &EmbedFn,
    ) -> Result<VectorIndex, DocumentError> {
        let document = loader.load(path).await?;
        self.ingest(&document, embed).await
    }
}
