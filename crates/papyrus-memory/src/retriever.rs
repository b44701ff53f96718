use papyrus_llm::EmbedFn;

use crate::error::IndexError;
use crate::index::VectorIndex;
use crate::types::Chunk;

/// Query-time similarity search over a built [`VectorIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Retriever {
    pub top_k: usize,
}

impl Default for Retriever {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

impl Retriever {
    #[must_use]
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Embed `query` and return the nearest chunks, most relevant first.
    ///
    /// # Errors
    ///
    /// Returns whatever embedding or [`VectorIndex::search`] fails with.
    pub async fn retrieve(
        &self,
        index: &VectorIndex,
        query: &str,
        embed: &EmbedFn,
    ) -> Result<Vec<Chunk>, IndexError> {
        let vector = embed(query).await?;
        let scored = index.search(&vector, self.top_k)?;
        tracing::debug!(query_len = query.len(), hits = scored.len(), "retrieved");
        Ok(scored.into_iter().map(|s| s.chunk).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_overlap_embed() -> EmbedFn {
        // Counts occurrences of a tiny fixed vocabulary.
        Box::new(|text: &str| {
            let lower = text.to_lowercase();
            let v = ["sky", "grass", "blue", "green", "color"]
                .iter()
                .map(|w| if lower.contains(w) { 1.0 } else { 0.0 })
                .collect();
            Box::pin(async move { Ok(v) })
        })
    }

    #[tokio::test]
    async fn retrieves_nearest_chunk_first() {
        let chunks = vec![
            Chunk {
                id: 0,
                text: "The sky is blue.".into(),
                source_offset: 0,
            },
            Chunk {
                id: 1,
                text: "Grass is green.".into(),
                source_offset: 17,
            },
        ];
        let embed = word_overlap_embed();
        let index = VectorIndex::build(chunks, &embed).await.unwrap();

        let results = Retriever::new(1)
            .retrieve(&index, "What color is the sky?", &embed)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "The sky is blue.");
    }

    #[tokio::test]
    async fn preserves_descending_relevance_order() {
        let chunks = vec![
            Chunk {
                id: 0,
                text: "grass".into(),
                source_offset: 0,
            },
            Chunk {
                id: 1,
                text: "sky blue color".into(),
                source_offset: 6,
            },
        ];
        let embed = word_overlap_embed();
        let index = VectorIndex::build(chunks, &embed).await.unwrap();

        let results = Retriever::new(2)
            .retrieve(&index, "sky color", &embed)
            .await
            .unwrap();
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 0);
    }

    #[tokio::test]
    async fn search_errors_propagate() {
        let embed = word_overlap_embed();
        let index = VectorIndex::build(Vec::new(), &embed).await.unwrap();
        let result = Retriever::new(0).retrieve(&index, "anything", &embed).await;
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }
}
