//! # mailgraph-graph
//!
//! Typed operations over the abstract Graph Store: schema bootstrap,
//! ingestion-time document writes with confidence-gated OFFERS upserts,
//! confidence-filtered reads, aggregates, and the reconciliation pass.
//! All query text lives in [`queries`]; everything else goes through
//! [`GraphService`].

mod ingest;
pub mod queries;
mod reconcile;
mod service;

pub use ingest::{DocumentRecord, GraphIngestor};
pub use reconcile::reconcile_offers;
pub use service::GraphService;
