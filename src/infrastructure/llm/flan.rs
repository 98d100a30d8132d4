use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};
use tokenizers::Tokenizer;
use tracing::info;

use crate::domain::{ports::LlmService, DomainError};

const MAX_INPUT_TOKENS: usize = 512;

/// Local sequence-to-sequence generator (FLAN-T5 weights by default) with
/// greedy decoding.
pub struct FlanT5Llm {
    inner: Arc<Mutex<T5Inner>>,
    tokenizer: Arc<Tokenizer>,
    max_new_tokens: usize,
}

struct T5Inner {
    model: T5ForConditionalGeneration,
    config: T5Config,
    device: Device,
}

impl FlanT5Llm {
    /// Loads tokenizer.json, config.json and pytorch_model.bin from
    /// `model_dir`.
    pub fn load(model_dir: &Path, max_new_tokens: usize) -> anyhow::Result<Self> {
        let device = Device::Cpu;
        info!(dir = %model_dir.display(), "Loading generation model");

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

        let config_text = std::fs::read_to_string(model_dir.join("config.json"))?;
        let config: T5Config = serde_json::from_str(&config_text)?;

        let weights = candle_core::pickle::read_all(model_dir.join("pytorch_model.bin"))?;
        let weights_map: std::collections::HashMap<String, Tensor> =
            weights.into_iter().collect();
        let vb = VarBuilder::from_tensors(weights_map, candle_core::DType::F32, &device);
        let model = T5ForConditionalGeneration::load(vb, &config)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(T5Inner {
                model,
                config,
                device,
            })),
            tokenizer: Arc::new(tokenizer),
            max_new_tokens,
        })
    }
}

impl T5Inner {
    fn generate(&mut self, input_ids: &[u32], max_new_tokens: usize) -> anyhow::Result<Vec<u32>> {
        self.model.clear_kv_cache();

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input)?;

        let start_token = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;
        let mut output_ids = vec![start_token];
        let mut logits_processor = LogitsProcessor::new(0, None, None);

        for step in 0..max_new_tokens {
            let decoder_ids = if step == 0 || !self.config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = &output_ids[output_ids.len() - 1..];
                Tensor::new(last, &self.device)?.unsqueeze(0)?
            };

            let logits = self
                .model
                .decode(&decoder_ids, &encoder_output)?
                .squeeze(0)?;
            let next = logits_processor.sample(&logits)?;
            if next as usize == self.config.eos_token_id {
                break;
            }
            output_ids.push(next);
        }

        Ok(output_ids.split_off(1))
    }
}

#[async_trait]
impl LlmService for FlanT5Llm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| DomainError::model(format!("tokenization failed: {e}")))?;
        let mut input_ids = encoding.get_ids().to_vec();
        input_ids.truncate(MAX_INPUT_TOKENS);

        let inner = self.inner.clone();
        let tokenizer = self.tokenizer.clone();
        let max_new_tokens = self.max_new_tokens;
        tokio::task::spawn_blocking(move || {
            let mut inner = inner
                .lock()
                .map_err(|_| DomainError::internal("generation model lock poisoned"))?;
            let output_ids = inner
                .generate(&input_ids, max_new_tokens)
                .map_err(|e| DomainError::model(format!("generation failed: {e}")))?;
            tokenizer
                .decode(&output_ids, true)
                .map(|text| text.trim().to_string())
                .map_err(|e| DomainError::model(format!("detokenization failed: {e}")))
        })
        .await
        .map_err(|e| DomainError::internal(format!("generation task failed: {e}")))?
    }
}
