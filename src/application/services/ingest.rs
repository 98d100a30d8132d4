use std::sync::Arc;
use tracing::{instrument, warn};

use crate::domain::{
    chunk_windows,
    ports::{DocumentLoader, EmbeddingService, IndexStore},
    Document, DocumentChunk, DomainError, VectorIndex,
};

/// Outcome of a processing run. URLs that failed to load are listed in
/// `skipped`; everything counted here made it into the saved index.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub documents: usize,
    pub chunks: usize,
    pub skipped: Vec<SkippedUrl>,
}

#[derive(Debug, Clone)]
pub struct SkippedUrl {
    pub url: String,
    pub reason: String,
}

pub struct IngestService {
    loader: Arc<dyn DocumentLoader>,
    embedding: Arc<dyn EmbeddingService>,
    store: Arc<dyn IndexStore>,
    window: usize,
    overlap: usize,
}

impl IngestService {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        embedding: Arc<dyn EmbeddingService>,
        store: Arc<dyn IndexStore>,
        window: usize,
        overlap: usize,
    ) -> Self {
        Self {
            loader,
            embedding,
            store,
            window,
            overlap,
        }
    }

    /// Loads the given URLs, chunks and embeds their text, and saves a
    /// freshly built index over everything that loaded.
    ///
    /// Fetch failures are per-URL: the URL is skipped and reported while
    /// the rest continue. Everything after loading is all-or-nothing; any
    /// failure aborts the run and leaves the previously saved index as it
    /// was.
    #[instrument(skip(self, urls), fields(urls = urls.len()))]
    pub async fn process(&self, urls: &[String]) -> Result<ProcessReport, DomainError> {
        if urls.is_empty() {
            return Err(DomainError::validation("at least one URL is required"));
        }

        let mut documents: Vec<Document> = Vec::new();
        let mut skipped = Vec::new();
        for url in urls {
            match self.loader.load(url).await {
                Ok(docs) => documents.extend(docs),
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to load URL, skipping");
                    let reason = match e {
                        DomainError::UrlLoad { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    skipped.push(SkippedUrl {
                        url: url.clone(),
                        reason,
                    });
                }
            }
        }

        if documents.is_empty() {
            return Err(DomainError::validation(
                "none of the URLs produced any readable content",
            ));
        }

        let chunks: Vec<DocumentChunk> = documents
            .iter()
            .flat_map(|doc| chunk_windows(doc, self.window, self.overlap))
            .collect();

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        let index = VectorIndex::build(chunks, embeddings)?;
        self.store.save(&index).await?;

        Ok(ProcessReport {
            documents: documents.len(),
            chunks: index.len(),
            skipped,
        })
    }
}
