//! Brute-force in-memory vector index.
//!
//! Document sizes are bounded by the upload limit, so a linear cosine
//! scan is enough; no approximate search structure is kept.

use papyrus_llm::EmbedFn;

use crate::error::IndexError;
use crate::types::Chunk;

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

struct Entry {
    vector: Vec<f32>,
    chunk: Chunk,
}

/// Read-only after `build`; every stored vector has the same length,
/// fixed by the first embedding.
pub struct VectorIndex {
    dimension: usize,
    entries: Vec<Entry>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("dimension", &self.dimension)
            .field("len", &self.entries.len())
            .finish()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorIndex {
    /// Embed every chunk and store the (vector, chunk) pairs.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Embedding`] if any embedding call fails, or
    /// [`IndexError::DimensionMismatch`] if an embedding's length differs
    /// from the first one. Either way the whole build aborts.
    pub async fn build(chunks: Vec<Chunk>, embed: &EmbedFn) -> Result<Self, IndexError> {
        let mut entries = Vec::with_capacity(chunks.len());
        let mut dimension = 0;

        for chunk in chunks {
            let vector = embed(&chunk.text).await?;
            if entries.is_empty() {
                dimension = vector.len();
            } else if vector.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            entries.push(Entry { vector, chunk });
        }

        tracing::debug!(chunks = entries.len(), dimension, "vector index built");
        Ok(Self { dimension, entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the `k` chunks closest to `query` by cosine similarity,
    /// descending. Ties break by ascending chunk id, so identical inputs
    /// always yield the identical ordered result.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidConfig`] if `k` is zero or the query
    /// length differs from the index dimensionality (non-empty index).
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidConfig("k must be > 0".into()));
        }
        if !self.entries.is_empty() && query.len() != self.dimension {
            return Err(IndexError::InvalidConfig(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|e| ScoredChunk {
                chunk: e.chunk.clone(),
                score: cosine_similarity(query, &e.vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.chunk.id.cmp(&b.chunk.id))
        });
        scored.truncate(k);
        Ok(scored)
    }
}
