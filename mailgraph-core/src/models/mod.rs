//! Shared data model: confidence, documents, filters, result shapes.

pub mod confidence;
pub mod document;
pub mod filter;
pub mod graph;
pub mod search;

pub use confidence::Confidence;
pub use document::{ChunkMetadata, DocumentChunk};
pub use filter::{Filter, FilterField, FilterSet, QueryFilters};
pub use graph::{
    EntityCount, GraphSummary, ImportanceRow, LabelCount, RelatedEntities, TimelineEntry,
    VendorProductRow,
};
pub use search::{FormattedHit, FormattedResults, SearchResults, VectorQueryResult};
