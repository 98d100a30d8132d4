mod bert;
mod hashed;

pub use bert::{resolve_model_dir, BertEmbedding};
pub use hashed::HashedEmbedding;

use std::sync::Arc;
use tracing::info;

use crate::domain::ports::EmbeddingService;
use crate::infrastructure::config::EmbeddingConfig;

const DEFAULT_MODEL_DIR: &str = "models/all-MiniLM-L6-v2";

/// Builds the embedder named by the config: "local" loads candle weights,
/// "hashed" needs no model files.
pub fn build_embedding(config: &EmbeddingConfig) -> anyhow::Result<Arc<dyn EmbeddingService>> {
    match config.provider.as_str() {
        "hashed" => {
            info!(dimension = config.dimension, "Using hashed embedder");
            Ok(Arc::new(HashedEmbedding::new(config.dimension)))
        }
        "local" => {
            let dir = bert::resolve_model_dir(config.model_dir.as_deref(), DEFAULT_MODEL_DIR)?;
            Ok(Arc::new(BertEmbedding::load(&dir, config.dimension)?))
        }
        other => anyhow::bail!("unknown embedding provider: {other}"),
    }
}
