use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retriever configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of results when the caller does not specify one.
    pub top_k: usize,
    /// The vector store is queried with `top_k * overfetch_factor` to
    /// leave room for re-ranking.
    pub overfetch_factor: usize,
    /// Per-external-call timeout; a timed-out call is a caught failure.
    pub call_timeout_ms: u64,
    /// Day span assumed by the graph fallback when no window was extracted.
    pub fallback_day_span: u32,
    /// Similarity score assigned to fallback-hydrated documents, which
    /// bypass similarity scoring.
    pub placeholder_distance: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            overfetch_factor: defaults::DEFAULT_OVERFETCH_FACTOR,
            call_timeout_ms: defaults::DEFAULT_CALL_TIMEOUT_MS,
            fallback_day_span: defaults::DEFAULT_FALLBACK_DAY_SPAN,
            placeholder_distance: defaults::DEFAULT_PLACEHOLDER_DISTANCE,
        }
    }
}
