//! # mailgraph-retrieval
//!
//! The query engine: parallel fan-out over the Vector Store and Graph
//! Store with a fallback path, then graph-enhanced re-ranking.
//!
//! ## Architecture
//!
//! ```text
//! SearchEngine
//! ├── FilterExtractor (mailgraph-extract)
//! ├── IEmbeddingProvider (fatal on failure)
//! ├── HybridRetriever
//! │   ├── Vector query (filters, doubled top_k, per-call timeout)
//! │   └── Graph fallback (time/vendor/product candidates → hydrate by id)
//! ├── GraphService (related entities ∥ importance rows)
//! └── Ranker (base = max chunk distance, graph = products + recency)
//! ```
//!
//! Every external call is a caught failure: a dead store degrades that
//! source to empty and the caller still receives a well-formed result.

pub mod engine;
pub mod format;
pub mod ranking;
pub mod retriever;

pub use engine::SearchEngine;
pub use retriever::HybridRetriever;
