//! Graph-enhanced re-ranking. Scores are computed per distinct source
//! document; output stays at chunk granularity. The sort is stable, so
//! documents with equal combined scores keep their original relative
//! order, and a rerank that matches nothing back returns the input
//! unchanged; ranking is never lossy.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

use mailgraph_core::config::RankingConfig;
use mailgraph_core::models::{ImportanceRow, VectorQueryResult};

/// Graph score per document id: a weight per distinct ABOUT-linked product
/// plus a recency boost that decays linearly with age. An unparseable
/// date earns a small flat boost instead.
pub fn graph_scores(
    rows: &[ImportanceRow],
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> HashMap<String, f64> {
    rows.iter()
        .map(|row| {
            let mut score = row.product_count as f64 * config.product_weight;
            if let Some(date) = &row.date {
                score += match parse_date(date) {
                    Some(parsed) => {
                        let age_days = (now - parsed).num_days().max(0) as f64;
                        (config.recency_max_boost - age_days * config.recency_decay_per_day)
                            .max(0.0)
                    }
                    None => config.unparsed_date_boost,
                };
            }
            (row.id.clone(), score)
        })
        .collect()
}

/// Re-rank chunks by combined score.
///
/// Base score per source document = the best (maximum) distance across its
/// chunks; combined = base + graph score; documents sort descending by
/// combined score and every chunk of a document is re-emitted in its
/// original relative order.
pub fn rerank(results: &VectorQueryResult, scores: &HashMap<String, f64>) -> VectorQueryResult {
    if results.is_empty() {
        return results.clone();
    }

    // Best chunk distance per source document, in first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut base: HashMap<String, f64> = HashMap::new();
    let mut chunk_indices: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, meta) in results.metadatas.iter().enumerate() {
        let Some(source_id) = &meta.source_id else {
            continue;
        };
        let distance = results.distances.get(i).copied().unwrap_or(0.0);
        base.entry(source_id.clone())
            .and_modify(|best| *best = best.max(distance))
            .or_insert_with(|| {
                order.push(source_id.clone());
                distance
            });
        chunk_indices.entry(source_id.clone()).or_default().push(i);
    }

    let mut combined: Vec<(String, f64)> = order
        .into_iter()
        .map(|id| {
            let score = base[&id] + scores.get(&id).copied().unwrap_or(0.0);
            (id, score)
        })
        .collect();
    // Stable: ties keep first-seen order.
    combined.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut reranked = VectorQueryResult::default();
    for (id, _) in &combined {
        for &i in &chunk_indices[id] {
            reranked.documents.push(results.documents[i].clone());
            reranked.metadatas.push(results.metadatas[i].clone());
            reranked
                .distances
                .push(results.distances.get(i).copied().unwrap_or(0.0));
            reranked.ids.push(results.ids[i].clone());
        }
    }

    // Nothing matched back (e.g. no chunk carried a source id): return the
    // original set rather than losing results.
    if reranked.is_empty() {
        return results.clone();
    }
    reranked
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Timezone-less timestamps are treated as UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mailgraph_core::models::ChunkMetadata;

    fn chunk_result(entries: &[(&str, &str, f64)]) -> VectorQueryResult {
        let mut results = VectorQueryResult::default();
        for (i, (id, source, distance)) in entries.iter().enumerate() {
            results.documents.push(format!("doc text {i}"));
            results.metadatas.push(ChunkMetadata {
                source_id: Some(source.to_string()),
                ..Default::default()
            });
            results.distances.push(*distance);
            results.ids.push(id.to_string());
        }
        results
    }

    fn importance(id: &str, product_count: u64, date: Option<&str>) -> ImportanceRow {
        ImportanceRow {
            id: id.to_string(),
            product_count,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn equal_graph_scores_preserve_original_order() {
        let results = chunk_result(&[
            ("c1", "a", 0.5),
            ("c2", "b", 0.5),
            ("c3", "c", 0.5),
        ]);
        let scores = HashMap::new();
        let reranked = rerank(&results, &scores);
        assert_eq!(reranked.ids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn more_products_rank_first() {
        let results = chunk_result(&[("c1", "a", 0.5), ("c2", "b", 0.5)]);
        let config = RankingConfig::default();
        let scores = graph_scores(
            &[importance("a", 0, None), importance("b", 3, None)],
            Utc::now(),
            &config,
        );
        let reranked = rerank(&results, &scores);
        assert_eq!(reranked.ids, vec!["c2", "c1"]);
    }

    #[test]
    fn chunks_of_one_document_stay_contiguous_and_ordered() {
        let results = chunk_result(&[
            ("c1", "a", 0.2),
            ("c2", "b", 0.9),
            ("c3", "a", 0.8),
        ]);
        let reranked = rerank(&results, &HashMap::new());
        // Document "b" (0.9) beats "a" (best chunk 0.8); a's chunks keep
        // their original relative order.
        assert_eq!(reranked.ids, vec!["c2", "c1", "c3"]);
    }

    #[test]
    fn missing_source_ids_fall_back_to_original() {
        let mut results = chunk_result(&[("c1", "a", 0.5)]);
        results.metadatas[0].source_id = None;
        let reranked = rerank(&results, &HashMap::new());
        assert_eq!(reranked, results);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let reranked = rerank(&VectorQueryResult::default(), &HashMap::new());
        assert!(reranked.is_empty());
    }

    #[test]
    fn recency_boost_decays_with_age() {
        let config = RankingConfig::default();
        let now = Utc::now();
        let fresh = (now - Duration::days(1)).to_rfc3339();
        let old = (now - Duration::days(15)).to_rfc3339();
        let scores = graph_scores(
            &[
                importance("fresh", 1, Some(&fresh)),
                importance("old", 1, Some(&old)),
            ],
            now,
            &config,
        );
        assert!(scores["fresh"] > scores["old"]);
    }

    #[test]
    fn ancient_dates_never_go_negative() {
        let config = RankingConfig::default();
        let scores = graph_scores(
            &[importance("a", 0, Some("1999-01-01T00:00:00Z"))],
            Utc::now(),
            &config,
        );
        assert_eq!(scores["a"], 0.0);
    }

    #[test]
    fn unparseable_date_gets_flat_boost() {
        let config = RankingConfig::default();
        let scores = graph_scores(
            &[importance("a", 0, Some("sometime last spring"))],
            Utc::now(),
            &config,
        );
        assert_eq!(scores["a"], config.unparsed_date_boost);
    }

    #[test]
    fn timezone_less_timestamps_parse() {
        assert!(parse_date("2025-04-16T07:35:07").is_some());
        assert!(parse_date("2025-04-16T07:35:07Z").is_some());
        assert!(parse_date("not a date").is_none());
    }
}
