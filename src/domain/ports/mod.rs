mod embedding;
mod index_store;
mod llm;
mod loader;

pub use embedding::EmbeddingService;
pub use index_store::IndexStore;
pub use llm::LlmService;
pub use loader::DocumentLoader;
