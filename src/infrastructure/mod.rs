pub mod config;
pub mod embedding;
pub mod index_store;
pub mod llm;
pub mod loader;

pub use config::Config;
pub use embedding::{build_embedding, BertEmbedding, HashedEmbedding};
pub use index_store::FileIndexStore;
pub use llm::{build_llm, FlanT5Llm};
pub use loader::UrlLoader;
