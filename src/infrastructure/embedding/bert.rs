use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;
use tracing::info;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};

const MAX_TOKENS: usize = 256;

/// Sentence embedder backed by a local BERT-style encoder (MiniLM weights
/// by default). Embeddings are attention-masked mean pools of the final
/// hidden states, L2-normalized.
pub struct BertEmbedding {
    inner: Arc<BertInner>,
    dimension: usize,
}

struct BertInner {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl BertEmbedding {
    /// Loads tokenizer.json, config.json and pytorch_model.bin from
    /// `model_dir`.
    pub fn load(model_dir: &Path, dimension: usize) -> anyhow::Result<Self> {
        let device = Device::Cpu;
        info!(dir = %model_dir.display(), "Loading embedding model");

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

        let config_text = std::fs::read_to_string(model_dir.join("config.json"))?;
        let config: BertConfig = serde_json::from_str(&config_text)?;

        let weights = candle_core::pickle::read_all(model_dir.join("pytorch_model.bin"))?;
        let weights_map: std::collections::HashMap<String, Tensor> =
            weights.into_iter().collect();
        let vb = VarBuilder::from_tensors(weights_map, DTYPE, &device);
        let model = BertModel::load(vb, &config)?;

        Ok(Self {
            inner: Arc::new(BertInner {
                model,
                tokenizer,
                device,
            }),
            dimension,
        })
    }
}

impl BertInner {
    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("tokenization failed: {e}"))?;

        let mut ids = encoding.get_ids().to_vec();
        let mut mask = encoding.get_attention_mask().to_vec();
        ids.truncate(MAX_TOKENS);
        mask.truncate(MAX_TOKENS);

        let len = ids.len();
        let input_ids = Tensor::new(ids.as_slice(), &self.device)?.reshape((1, len))?;
        let attention_mask = Tensor::new(mask.as_slice(), &self.device)?.reshape((1, len))?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Masked mean pool over the sequence, then L2 normalize.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let mean = summed.broadcast_div(&counts)?;

        let norm = mean.sqr()?.sum_keepdim(1)?.sqrt()?;
        let normalized = mean.broadcast_div(&norm)?;

        Ok(normalized.squeeze(0)?.to_vec1()?)
    }
}

#[async_trait]
impl EmbeddingService for BertEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let inner = self.inner.clone();
        let text = text.to_string();
        let vector = tokio::task::spawn_blocking(move || inner.embed_one(&text))
            .await
            .map_err(|e| DomainError::internal(format!("embedding task failed: {e}")))?
            .map_err(|e| DomainError::model(format!("embedding failed: {e}")))?;
        Ok(Embedding::new(vector))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        let inner = self.inner.clone();
        let texts: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let vectors = tokio::task::spawn_blocking(move || {
            texts
                .iter()
                .map(|text| inner.embed_one(text))
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .await
        .map_err(|e| DomainError::internal(format!("embedding task failed: {e}")))?
        .map_err(|e| DomainError::model(format!("embedding failed: {e}")))?;

        Ok(vectors.into_iter().map(Embedding::new).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Resolves the embedding model directory: explicit config first, then the
/// conventional local path.
pub fn resolve_model_dir(configured: Option<&Path>, default_dir: &str) -> anyhow::Result<PathBuf> {
    if let Some(dir) = configured {
        if dir.exists() {
            return Ok(dir.to_path_buf());
        }
        anyhow::bail!("configured model directory {} does not exist", dir.display());
    }
    let fallback = PathBuf::from(default_dir);
    if fallback.exists() {
        return Ok(fallback);
    }
    anyhow::bail!(
        "no model directory found; download the model to {default_dir} or set the model dir explicitly"
    )
}
