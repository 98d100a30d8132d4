use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, IndexStore, LlmService},
    Answer, DomainError, SearchResult,
};

pub struct QaService {
    embedding: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmService>,
    store: Arc<dyn IndexStore>,
    top_k: usize,
}

impl QaService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        llm: Arc<dyn LlmService>,
        store: Arc<dyn IndexStore>,
        top_k: usize,
    ) -> Self {
        Self {
            embedding,
            llm,
            store,
            top_k,
        }
    }

    /// Answers a question against the saved index: embed the question,
    /// retrieve the nearest chunks, generate an answer conditioned on them,
    /// and report the distinct source URLs of the retrieved chunks.
    #[instrument(skip(self))]
    pub async fn ask(&self, question: &str) -> Result<Answer, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        let index = self.store.load().await?;
        let query = self.embedding.embed(question).await?;
        let hits = index.search(&query, self.top_k);

        let prompt = build_prompt(question, &hits);
        let text = self.llm.complete(&prompt).await?;

        let mut sources: Vec<String> = Vec::new();
        for hit in &hits {
            if !sources.contains(&hit.chunk.source) {
                sources.push(hit.chunk.source.clone());
            }
        }

        Ok(Answer { text, sources })
    }
}

fn build_prompt(question: &str, hits: &[SearchResult]) -> String {
    let context = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("[{}] {}", i + 1, hit.chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Answer the question using only the context below.\n\n\
         Context:\n{context}\n\nQuestion: {question}\n\nAnswer:"
    )
}
