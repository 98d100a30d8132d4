use crate::domain::DomainError;

/// Extracts the text of every page from raw PDF bytes.
///
/// Extraction runs in memory; the bytes are never written to disk. Runs on
/// a blocking thread because parsing large PDFs is CPU-bound. Failures are
/// reported against `url`, the document the bytes came from.
pub async fn extract_text(url: &str, bytes: Vec<u8>) -> Result<String, DomainError> {
    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| DomainError::internal(format!("PDF extraction task failed: {e}")))?;

    extracted.map_err(|e| DomainError::url_load(url, format!("PDF text extraction failed: {e}")))
}
