use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::DomainError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub index: IndexConfig,
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    pub window: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// "local" loads candle weights from `model_dir`; "hashed" selects the
    /// deterministic model-free embedder.
    pub provider: String,
    pub model_dir: Option<PathBuf>,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model_dir: Option<PathBuf>,
    pub max_new_tokens: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            index: IndexConfig {
                path: PathBuf::from("data/index.json"),
            },
            chunking: ChunkingConfig {
                window: 1000,
                overlap: 100,
            },
            embedding: EmbeddingConfig {
                provider: "local".to_string(),
                model_dir: None,
                dimension: 384,
            },
            llm: LlmConfig {
                model_dir: None,
                max_new_tokens: 256,
            },
            rag: RagConfig { top_k: 4 },
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.server.port = parse_env("SERVER_PORT", &port)?;
        }
        if let Ok(path) = std::env::var("INDEX_PATH") {
            config.index.path = PathBuf::from(path);
        }
        if let Ok(window) = std::env::var("CHUNK_WINDOW") {
            config.chunking.window = parse_env("CHUNK_WINDOW", &window)?;
        }
        if let Ok(overlap) = std::env::var("CHUNK_OVERLAP") {
            config.chunking.overlap = parse_env("CHUNK_OVERLAP", &overlap)?;
        }
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Ok(dir) = std::env::var("EMBEDDING_MODEL_DIR") {
            config.embedding.model_dir = Some(PathBuf::from(dir));
        }
        if let Ok(dim) = std::env::var("EMBEDDING_DIMENSION") {
            config.embedding.dimension = parse_env("EMBEDDING_DIMENSION", &dim)?;
        }
        if let Ok(dir) = std::env::var("LLM_MODEL_DIR") {
            config.llm.model_dir = Some(PathBuf::from(dir));
        }
        if let Ok(max) = std::env::var("LLM_MAX_NEW_TOKENS") {
            config.llm.max_new_tokens = parse_env("LLM_MAX_NEW_TOKENS", &max)?;
        }
        if let Ok(top_k) = std::env::var("RAG_TOP_K") {
            config.rag.top_k = parse_env("RAG_TOP_K", &top_k)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunking.window == 0 {
            return Err(DomainError::validation("chunk window must be non-zero"));
        }
        if self.chunking.overlap >= self.chunking.window {
            return Err(DomainError::validation(
                "chunk overlap must be smaller than the window",
            ));
        }
        if self.rag.top_k == 0 {
            return Err(DomainError::validation("top_k must be non-zero"));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::validation(format!("invalid value for {name}: {value}")))
}
