pub mod embedding;
pub mod storage;

pub use embedding::EmbeddingProvider;
pub use storage::{MemoryStorage, StorageStats};
