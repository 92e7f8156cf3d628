//! Property tests for the re-ranker: never lossy, stable under ties, and
//! chunk order within a document is preserved.

use std::collections::HashMap;

use proptest::prelude::*;

use mailgraph_core::models::{ChunkMetadata, VectorQueryResult};
use mailgraph_retrieval::ranking::rerank;

fn build_results(chunks: &[(u8, f64)]) -> VectorQueryResult {
    let mut results = VectorQueryResult::default();
    for (i, (source, distance)) in chunks.iter().enumerate() {
        results.documents.push(format!("text {i}"));
        results.metadatas.push(ChunkMetadata {
            source_id: Some(format!("doc-{source}")),
            ..Default::default()
        });
        results.distances.push(*distance);
        results.ids.push(format!("chunk-{i}"));
    }
    results
}

proptest! {
    /// Re-ranking is a permutation: every chunk survives exactly once.
    #[test]
    fn rerank_is_never_lossy(
        chunks in prop::collection::vec((0u8..4, 0.0f64..1.0), 0..20),
        boosts in prop::collection::vec(0.0f64..1.0, 4),
    ) {
        let results = build_results(&chunks);
        let scores: HashMap<String, f64> = boosts
            .iter()
            .enumerate()
            .map(|(i, boost)| (format!("doc-{i}"), *boost))
            .collect();

        let reranked = rerank(&results, &scores);

        let mut expected = results.ids.clone();
        let mut actual = reranked.ids.clone();
        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);
    }

    /// Chunks of the same document keep their original relative order.
    #[test]
    fn chunk_order_within_a_document_is_preserved(
        chunks in prop::collection::vec((0u8..3, 0.0f64..1.0), 1..20),
    ) {
        let results = build_results(&chunks);
        let reranked = rerank(&results, &HashMap::new());

        for source in 0..3u8 {
            let source_id = format!("doc-{source}");
            let original: Vec<&String> = results
                .ids
                .iter()
                .zip(&results.metadatas)
                .filter(|(_, m)| m.source_id.as_deref() == Some(source_id.as_str()))
                .map(|(id, _)| id)
                .collect();
            let after: Vec<&String> = reranked
                .ids
                .iter()
                .zip(&reranked.metadatas)
                .filter(|(_, m)| m.source_id.as_deref() == Some(source_id.as_str()))
                .map(|(id, _)| id)
                .collect();
            prop_assert_eq!(original, after);
        }
    }

    /// Distinct documents with equal scores keep their original order.
    #[test]
    fn all_equal_scores_are_a_stable_no_op(count in 1usize..10) {
        let chunks: Vec<(u8, f64)> = (0..count).map(|i| (i as u8, 0.5)).collect();
        let results = build_results(&chunks);
        let reranked = rerank(&results, &HashMap::new());
        prop_assert_eq!(&reranked.ids, &results.ids);
    }
}
