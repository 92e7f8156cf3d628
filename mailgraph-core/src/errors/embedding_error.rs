/// Embedding subsystem errors. A missing embedding makes similarity search
/// meaningless, so these are fatal for the query that triggered them and
/// are never downgraded to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },
}
