//! # mailgraph-embeddings
//!
//! The embedding-generation boundary. One HTTP provider against an
//! OpenAI-shaped embeddings endpoint, with retry, exponential backoff, and
//! an availability latch. Embedding failure is fatal for the query that
//! needed it; there is no silent fallback.

mod api_provider;

pub use api_provider::ApiEmbeddingProvider;
