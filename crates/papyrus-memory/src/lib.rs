//! Document loading, chunking, and brute-force in-memory vector retrieval.

pub mod error;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod retriever;
pub mod splitter;
pub mod types;

pub use error::{DocumentError, IndexError};
pub use index::{ScoredChunk, VectorIndex};
pub use loader::{DocumentLoader, TextLoader, loader_for};
pub use pipeline::IngestionPipeline;
pub use retriever::Retriever;
pub use splitter::{SplitterConfig, TextSplitter};
pub use types::{Chunk, Document, DocumentMetadata};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

/// Default maximum file size accepted by loaders: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
