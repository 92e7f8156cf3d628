//! Shape search results for API responses.

use mailgraph_core::models::{FormattedHit, FormattedResults, SearchResults};

pub fn format_results(results: &SearchResults) -> FormattedResults {
    let hits: Vec<FormattedHit> = results
        .documents
        .iter()
        .zip(results.metadatas.iter())
        .enumerate()
        .map(|(i, (document, metadata))| FormattedHit {
            document: document.clone(),
            metadata: metadata.clone(),
            score: results.distances.get(i).copied().unwrap_or(0.0),
        })
        .collect();

    FormattedResults {
        total_results: hits.len(),
        results: hits,
        related_entities: results.related_entities.clone(),
    }
}
