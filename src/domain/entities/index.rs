use serde::{Deserialize, Serialize};

use crate::domain::entities::{DocumentChunk, Embedding};
use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// The answer to a question plus the distinct source URLs of the chunks
/// that contributed context. Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    chunk: DocumentChunk,
    embedding: Embedding,
}

/// Nearest-neighbor index over chunk embeddings.
///
/// A flat list scored with brute-force cosine similarity; built once per
/// processing run and serialized whole to disk. There are no update or
/// merge semantics, a new build replaces the previous index entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn build(
        chunks: Vec<DocumentChunk>,
        embeddings: Vec<Embedding>,
    ) -> Result<Self, DomainError> {
        if chunks.len() != embeddings.len() {
            return Err(DomainError::internal(format!(
                "embedding count {} does not match chunk count {}",
                embeddings.len(),
                chunks.len()
            )));
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `top_k` chunks nearest to `query`, best first.
    pub fn search(&self, query: &Embedding, top_k: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: query.cosine_similarity(&entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn chunk(content: &str) -> DocumentChunk {
        DocumentChunk::new(Uuid::new_v4(), "https://example.com", content, 0)
    }

    #[test]
    fn search_ranks_by_cosine_similarity() {
        let index = VectorIndex::build(
            vec![chunk("near"), chunk("far"), chunk("middle")],
            vec![
                Embedding::new(vec![1.0, 0.0, 0.0]),
                Embedding::new(vec![0.0, 1.0, 0.0]),
                Embedding::new(vec![0.7, 0.7, 0.0]),
            ],
        )
        .unwrap();

        let hits = index.search(&Embedding::new(vec![1.0, 0.0, 0.0]), 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.content, "near");
        assert_eq!(hits[1].chunk.content, "middle");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn search_on_empty_index_returns_nothing() {
        let index = VectorIndex::default();
        assert!(index.search(&Embedding::new(vec![1.0]), 4).is_empty());
    }

    #[test]
    fn build_rejects_mismatched_lengths() {
        let err = VectorIndex::build(vec![chunk("a")], vec![]).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
