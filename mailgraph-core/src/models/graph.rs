use serde::{Deserialize, Serialize};

/// Aggregated entity count (e.g. "vault mentioned by 3 documents").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCount {
    pub name: String,
    pub count: u64,
}

/// Products and vendors related to a result set, by document count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntities {
    pub products: Vec<EntityCount>,
    pub vendors: Vec<EntityCount>,
}

/// One OFFERS edge as returned by confidence-filtered reads. `confidence`
/// is `"unknown"` when the edge predates confidence recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProductRow {
    pub vendor: String,
    pub product: String,
    pub confidence: String,
}

/// Per-document graph signals consumed by the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRow {
    pub id: String,
    /// Count of distinct ABOUT-linked products.
    pub product_count: u64,
    pub date: Option<String>,
}

/// One timeline entry: a document with its vendor/product context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub document_id: String,
    pub date: String,
    pub content_type: String,
    pub vendor: String,
    pub product: Option<String>,
}

/// Node or edge count for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Graph-wide node/edge counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_counts: Vec<LabelCount>,
    pub edge_counts: Vec<LabelCount>,
}
