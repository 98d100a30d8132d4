use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::domain::{ports::IndexStore, DomainError, VectorIndex};

/// Persists the vector index as a single serialized blob at a fixed path.
/// Saving replaces the previous index wholesale.
pub struct FileIndexStore {
    path: PathBuf,
}

impl FileIndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IndexStore for FileIndexStore {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn save(&self, index: &VectorIndex) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::internal(format!("failed to create index dir: {e}")))?;
        }

        let blob = serde_json::to_vec(index)
            .map_err(|e| DomainError::internal(format!("failed to serialize index: {e}")))?;
        tokio::fs::write(&self.path, blob)
            .await
            .map_err(|e| DomainError::internal(format!("failed to write index: {e}")))?;

        info!(chunks = index.len(), "Index saved");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn load(&self) -> Result<VectorIndex, DomainError> {
        let blob = match tokio::fs::read(&self.path).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DomainError::IndexNotBuilt);
            }
            Err(e) => {
                return Err(DomainError::internal(format!("failed to read index: {e}")));
            }
        };

        serde_json::from_slice(&blob)
            .map_err(|e| DomainError::internal(format!("failed to deserialize index: {e}")))
    }
}
