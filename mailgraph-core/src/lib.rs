//! # mailgraph-core
//!
//! Core types, traits, errors, and config for the mailgraph hybrid
//! retrieval engine: the confidence model, the chunk/document model, the
//! tagged filter union, result shapes, and the async seams to the external
//! Vector Store, Graph Store, and Embedding Service.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{MailgraphError, MailgraphResult};
pub use models::{
    ChunkMetadata, Confidence, DocumentChunk, Filter, FilterField, FilterSet, QueryFilters,
    RelatedEntities, SearchResults, VectorQueryResult,
};
