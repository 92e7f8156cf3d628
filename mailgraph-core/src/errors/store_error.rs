/// External store errors. The reason string always identifies which
/// collaborator failed; retrieval catches these and degrades to an empty
/// result for that source rather than failing the query.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("vector store unavailable: {reason}")]
    VectorUnavailable { reason: String },

    #[error("graph store unavailable: {reason}")]
    GraphUnavailable { reason: String },

    #[error("graph query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("{collaborator} timed out after {waited_ms}ms")]
    Timeout { collaborator: String, waited_ms: u64 },
}
