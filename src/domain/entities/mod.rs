mod document;
mod embedding;
mod index;

pub use document::{chunk_windows, Document, DocumentChunk, SourceKind};
pub use embedding::Embedding;
pub use index::{Answer, SearchResult, VectorIndex};
