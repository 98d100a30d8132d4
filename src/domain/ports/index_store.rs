use crate::domain::{errors::DomainError, VectorIndex};
use async_trait::async_trait;

/// Persistence handle for the vector index.
///
/// `save` replaces whatever index was stored before; `load` returns
/// `DomainError::IndexNotBuilt` when no index has been saved yet.
#[async_trait]
pub trait IndexStore: Send + Sync {
    async fn save(&self, index: &VectorIndex) -> Result<(), DomainError>;
    async fn load(&self) -> Result<VectorIndex, DomainError>;
}
