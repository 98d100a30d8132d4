mod html;
mod pdf;

pub use html::extract_article_text;

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::{ports::DocumentLoader, Document, DomainError, SourceKind};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches URLs over HTTP and turns them into documents, dispatching on
/// the source kind resolved once up front: PDFs are downloaded as bytes
/// and text-extracted, anything else is treated as an HTML page.
pub struct UrlLoader {
    http: reqwest::Client,
}

impl UrlLoader {
    pub fn new() -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("scheme-research/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    async fn load_pdf(&self, url: &str) -> Result<Vec<Document>, DomainError> {
        let bytes = self
            .fetch(url)
            .await?
            .bytes()
            .await
            .map_err(|e| DomainError::url_load(url, e.to_string()))?;

        let text = pdf::extract_text(url, bytes.to_vec()).await?;
        Ok(vec![Document::new(url, text)])
    }

    async fn load_html(&self, url: &str) -> Result<Vec<Document>, DomainError> {
        let body = self
            .fetch(url)
            .await?
            .text()
            .await
            .map_err(|e| DomainError::url_load(url, e.to_string()))?;

        let text = extract_article_text(&body);
        if text.is_empty() {
            debug!(url = %url, "Page produced no readable text");
            return Ok(Vec::new());
        }
        Ok(vec![Document::new(url, text)])
    }

    async fn fetch(&self, url: &str) -> Result<reqwest::Response, DomainError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::url_load(url, e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::url_load(url, e.to_string()))
    }
}

#[async_trait]
impl DocumentLoader for UrlLoader {
    #[instrument(skip(self))]
    async fn load(&self, url: &str) -> Result<Vec<Document>, DomainError> {
        Url::parse(url).map_err(|e| DomainError::validation(format!("invalid URL {url}: {e}")))?;

        match SourceKind::classify(url) {
            SourceKind::Pdf => self.load_pdf(url).await,
            SourceKind::Html => self.load_html(url).await,
        }
    }
}
