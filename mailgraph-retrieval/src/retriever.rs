//! The per-query state machine: vector query first; if it comes back
//! empty and any graph-level filter exists, fall back to graph-selected
//! candidates hydrated from the vector store's key-value lookup. Store
//! failures and timeouts degrade to an empty set for that source; the
//! fallback still runs, and nothing here raises to the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use mailgraph_core::config::RetrievalConfig;
use mailgraph_core::models::{Filter, FilterSet, QueryFilters, VectorQueryResult};
use mailgraph_core::traits::IVectorStore;
use mailgraph_graph::GraphService;

pub struct HybridRetriever {
    vector: Arc<dyn IVectorStore>,
    graph: GraphService,
    config: RetrievalConfig,
}

impl HybridRetriever {
    pub fn new(vector: Arc<dyn IVectorStore>, graph: GraphService, config: RetrievalConfig) -> Self {
        Self {
            vector,
            graph,
            config,
        }
    }

    /// Retrieve candidate chunks for one query. The vector store is asked
    /// for `top_k * overfetch_factor` results to leave room for
    /// re-ranking; an empty result set is a valid outcome, not an error.
    pub async fn retrieve(
        &self,
        embedding: &[f32],
        filters: &QueryFilters,
        top_k: usize,
    ) -> VectorQueryResult {
        let store_filters = normalize_for_vector(&filters.to_store_filters());
        let fetch_k = top_k * self.config.overfetch_factor.max(1);

        let results = match self
            .timed(self.vector.query(embedding, fetch_k, &store_filters))
            .await
        {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                warn!(error = %e, "vector query failed; treating as empty result set");
                VectorQueryResult::default()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.call_timeout_ms,
                    "vector query timed out; treating as empty result set"
                );
                VectorQueryResult::default()
            }
        };

        if results.source_ids().is_empty() && filters.has_graph_filters() {
            return self.fallback(filters, top_k).await;
        }
        results
    }

    /// Graph-driven fallback: select document ids by vendor/product/time,
    /// then hydrate text and metadata directly by id. Hydrated documents
    /// bypass similarity scoring and carry a fixed placeholder distance.
    async fn fallback(&self, filters: &QueryFilters, top_k: usize) -> VectorQueryResult {
        let day_span = filters.day_span.unwrap_or(self.config.fallback_day_span);
        let ids = match self.graph.fallback_candidates(filters, day_span, top_k).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "graph fallback query failed; no candidates");
                return VectorQueryResult::default();
            }
        };
        if ids.is_empty() {
            debug!("graph fallback found no candidate documents");
            return VectorQueryResult::default();
        }

        let hydrated = match self.timed(self.vector.get_by_ids(&ids)).await {
            Ok(Ok(hydrated)) => hydrated,
            Ok(Err(e)) => {
                warn!(error = %e, "hydrating fallback candidates failed");
                return VectorQueryResult::default();
            }
            Err(_) => {
                warn!("hydrating fallback candidates timed out");
                return VectorQueryResult::default();
            }
        };

        debug!(candidates = ids.len(), hydrated = hydrated.len(), "graph fallback hydrated");
        VectorQueryResult {
            distances: vec![self.config.placeholder_distance; hydrated.len()],
            ..hydrated
        }
    }

    async fn timed<F: std::future::Future>(&self, fut: F) -> Result<F::Output, tokio::time::error::Elapsed> {
        tokio::time::timeout(Duration::from_millis(self.config.call_timeout_ms), fut).await
    }
}

/// Downgrade constraints the vector backend cannot express: containment
/// becomes equality rather than failing the whole query.
fn normalize_for_vector(filters: &FilterSet) -> FilterSet {
    filters
        .iter()
        .map(|filter| match filter {
            Filter::Contains { field, value } => {
                debug!(
                    field = field.as_str(),
                    "downgrading containment filter to equality for the vector backend"
                );
                Filter::Equals {
                    field: *field,
                    value: value.clone(),
                }
            }
            other => other.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailgraph_core::models::FilterField;

    #[test]
    fn containment_downgrades_to_equality() {
        let filters = QueryFilters {
            vendor: Some("hashicorp".into()),
            product: Some("vault".into()),
            ..Default::default()
        };
        let normalized = normalize_for_vector(&filters.to_store_filters());
        assert!(normalized.iter().all(|f| matches!(f, Filter::Equals { .. })));
        assert!(normalized
            .iter()
            .any(|f| matches!(f, Filter::Equals { field: FilterField::Product, value } if value == "vault")));
    }
}
