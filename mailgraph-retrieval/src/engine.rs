//! The full search pipeline: extract → embed → hybrid retrieve →
//! graph-enhanced rerank → results. Embedding failure is the one hard
//! error; everything downstream degrades per source.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use mailgraph_core::config::MailgraphConfig;
use mailgraph_core::errors::{MailgraphResult, StoreError};
use mailgraph_core::models::{QueryFilters, SearchResults, VectorQueryResult};
use mailgraph_core::traits::{IEmbeddingProvider, IVectorStore};
use mailgraph_extract::FilterExtractor;
use mailgraph_graph::GraphService;

use crate::ranking;
use crate::retriever::HybridRetriever;

pub struct SearchEngine {
    graph: GraphService,
    embedder: Arc<dyn IEmbeddingProvider>,
    extractor: FilterExtractor,
    retriever: HybridRetriever,
    config: MailgraphConfig,
}

impl SearchEngine {
    pub fn new(
        vector: Arc<dyn IVectorStore>,
        graph: GraphService,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: MailgraphConfig,
    ) -> Self {
        let retriever = HybridRetriever::new(vector, graph.clone(), config.retrieval.clone());
        let extractor = FilterExtractor::new(config.extractor.clone());
        Self {
            graph,
            embedder,
            extractor,
            retriever,
            config,
        }
    }

    /// Search with filters extracted from the query text itself.
    pub async fn search(&self, query_text: &str, top_k: usize) -> MailgraphResult<SearchResults> {
        let filters = self.extractor.extract(query_text);
        self.search_with_filters(query_text, &filters, top_k).await
    }

    /// Search with caller-supplied filters.
    ///
    /// Returns a well-formed (possibly empty) result set unless embedding
    /// generation fails, which is fatal for the query.
    pub async fn search_with_filters(
        &self,
        query_text: &str,
        filters: &QueryFilters,
        top_k: usize,
    ) -> MailgraphResult<SearchResults> {
        let embedding = self.embedder.embed(query_text).await?;

        let vector_results = self.retriever.retrieve(&embedding, filters, top_k).await;
        let source_ids = vector_results.source_ids();

        // Both graph lookups depend only on the id set and run in
        // parallel; each degrades to empty on its own failure.
        let (related_entities, importance) = tokio::join!(
            self.graph.related_entities(&source_ids),
            self.graph.importance_rows(&source_ids),
        );

        let scores = ranking::graph_scores(&importance, Utc::now(), &self.config.ranking);
        let mut reranked = ranking::rerank(&vector_results, &scores);
        truncate(&mut reranked, top_k);

        info!(
            results = reranked.len(),
            sources = source_ids.len(),
            "search complete"
        );
        Ok(SearchResults::from_vector(reranked, related_entities))
    }

    /// Search bounded by a caller deadline. The deadline propagates to all
    /// in-flight store calls by dropping them; exceeding it is a hard
    /// failure distinct from an empty result.
    pub async fn search_with_deadline(
        &self,
        query_text: &str,
        top_k: usize,
        deadline: Duration,
    ) -> MailgraphResult<SearchResults> {
        match tokio::time::timeout(deadline, self.search(query_text, top_k)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(deadline_ms = deadline.as_millis() as u64, "search deadline exceeded");
                Err(StoreError::Timeout {
                    collaborator: "retrieval pipeline".to_string(),
                    waited_ms: deadline.as_millis() as u64,
                }
                .into())
            }
        }
    }

    pub fn extractor(&self) -> &FilterExtractor {
        &self.extractor
    }
}

fn truncate(results: &mut VectorQueryResult, top_k: usize) {
    results.documents.truncate(top_k);
    results.metadatas.truncate(top_k);
    results.distances.truncate(top_k);
    results.ids.truncate(top_k);
}
