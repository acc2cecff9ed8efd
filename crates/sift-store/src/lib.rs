//! Embedding and vector-store clients.
//!
//! [`Embedder`] turns text into vectors, [`VectorStore`] keeps indexed
//! records and answers nearest-neighbour queries. Both are object-safe
//! traits returning boxed futures so callers can hold `Arc<dyn ...>`.

pub mod chroma;
pub mod embeddings;
pub mod error;
pub mod http;
pub mod in_memory;
pub mod vector_store;

pub use chroma::ChromaStore;
pub use embeddings::{Embedder, OllamaEmbedder};
pub use error::{Result, StoreError};
pub use in_memory::InMemoryVectorStore;
pub use vector_store::{IndexRecord, RecordMetadata, SearchHit, TypeFilter, VectorStore};
