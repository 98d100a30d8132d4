mod flan;

pub use flan::FlanT5Llm;

use std::sync::Arc;

use crate::domain::ports::LlmService;
use crate::infrastructure::config::LlmConfig;
use crate::infrastructure::embedding::resolve_model_dir;

const DEFAULT_MODEL_DIR: &str = "models/flan-t5-small";

pub fn build_llm(config: &LlmConfig) -> anyhow::Result<Arc<dyn LlmService>> {
    let dir = resolve_model_dir(config.model_dir.as_deref(), DEFAULT_MODEL_DIR)?;
    Ok(Arc::new(FlanT5Llm::load(&dir, config.max_new_tokens)?))
}
