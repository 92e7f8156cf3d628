//! Async seams to the external collaborators: Vector Store, Graph Store,
//! and Embedding Service. All three are consumed as trait objects so tests
//! and deployments can swap backends freely.

mod embedding;
mod graph_store;
mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use graph_store::{IGraphStore, Row};
pub use vector_store::IVectorStore;
