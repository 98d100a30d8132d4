use crate::domain::{errors::DomainError, Document};
use async_trait::async_trait;

/// Fetches one URL and turns it into zero or more documents.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Vec<Document>, DomainError>;
}
