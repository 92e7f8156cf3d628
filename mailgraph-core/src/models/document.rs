use serde::{Deserialize, Serialize};

/// Metadata attached to every stored chunk.
///
/// `source_id` groups the chunks of one original document; ranking operates
/// at that granularity. `date` is kept as the raw stored string: it is
/// parsed where needed and an unparseable value degrades to a flat recency
/// boost instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMetadata {
    pub vendor: Option<String>,
    pub products: Vec<String>,
    pub content_types: Vec<String>,
    /// RFC 3339 timestamp of the source document, as stored.
    pub date: Option<String>,
    /// Identifier of the source document this chunk was sliced from.
    pub source_id: Option<String>,
    pub chunk_index: u32,
}

/// The atomic retrievable unit: a slice of a source document plus its
/// metadata and embedding. Produced once by ingestion, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
    pub embedding: Vec<f32>,
}
