use serde::{Deserialize, Serialize};

use super::document::ChunkMetadata;
use super::graph::RelatedEntities;

/// One query's result set from the vector store. The four columns are
/// parallel: entry `i` of each describes the same chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorQueryResult {
    pub documents: Vec<String>,
    pub metadatas: Vec<ChunkMetadata>,
    pub distances: Vec<f64>,
    pub ids: Vec<String>,
}

impl VectorQueryResult {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Distinct source-document ids in first-seen order.
    pub fn source_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for meta in &self.metadatas {
            if let Some(source_id) = &meta.source_id {
                if !ids.contains(source_id) {
                    ids.push(source_id.clone());
                }
            }
        }
        ids
    }
}

/// Final search output. Possibly empty, never an exception: callers branch
/// on data. An empty-but-valid result set is distinct from a hard failure,
/// which surfaces as `Err(MailgraphError)` naming the failed collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub metadatas: Vec<ChunkMetadata>,
    pub distances: Vec<f64>,
    pub ids: Vec<String>,
    pub related_entities: RelatedEntities,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn from_vector(vector: VectorQueryResult, related_entities: RelatedEntities) -> Self {
        Self {
            documents: vector.documents,
            metadatas: vector.metadatas,
            distances: vector.distances,
            ids: vector.ids,
            related_entities,
        }
    }
}

/// One formatted hit for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedHit {
    pub document: String,
    pub metadata: ChunkMetadata,
    pub score: f64,
}

/// API-shaped search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedResults {
    pub results: Vec<FormattedHit>,
    pub related_entities: RelatedEntities,
    pub total_results: usize,
}
