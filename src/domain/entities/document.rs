use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a URL should be fetched and parsed. Resolved once, before any
/// network traffic, so the rest of the pipeline never re-inspects the URL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Html,
}

impl SourceKind {
    /// Classification is by literal `.pdf` suffix only. A URL whose path
    /// ends in `.pdf` but carries a query string ("report.pdf?download=1")
    /// is treated as HTML.
    pub fn classify(url: &str) -> Self {
        if url.trim().to_ascii_lowercase().ends_with(".pdf") {
            Self::Pdf
        } else {
            Self::Html
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub source: String,
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            text: text.into(),
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub source: String,
    pub content: String,
    pub chunk_index: usize,
}

impl DocumentChunk {
    pub fn new(
        document_id: Uuid,
        source: impl Into<String>,
        content: impl Into<String>,
        chunk_index: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            source: source.into(),
            content: content.into(),
            chunk_index,
        }
    }
}

/// Splits a document into fixed-size overlapping character windows.
///
/// Windows are `window` chars long and consecutive windows share exactly
/// `overlap` chars, so a text of L chars yields one chunk when L <= window
/// and ceil((L - overlap) / (window - overlap)) chunks otherwise. Offsets
/// are counted in chars and sliced on char boundaries. Each chunk inherits
/// the document's source URL.
pub fn chunk_windows(document: &Document, window: usize, overlap: usize) -> Vec<DocumentChunk> {
    debug_assert!(window > 0 && overlap < window);

    let text = document.text.as_str();
    let byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total_chars = byte_offsets.len();
    if total_chars == 0 {
        return Vec::new();
    }

    let step = window - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + window).min(total_chars);
        let byte_start = byte_offsets[start];
        let byte_end = if end == total_chars {
            text.len()
        } else {
            byte_offsets[end]
        };

        chunks.push(DocumentChunk::new(
            document.id,
            &document.source,
            &text[byte_start..byte_end],
            chunks.len(),
        ));

        if end == total_chars {
            break;
        }
        start += step;
    }

    chunks
}
