//! Typed graph operations. Reads that sit on hot paths (vendor-product
//! lists, importance rows) are memoized through the shared TTL cache;
//! retrieval-time lookups degrade to empty on store failure instead of
//! failing the query that triggered them.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

use mailgraph_cache::{cache_key, GraphConnectionManager, TtlCache};
use mailgraph_core::config::CacheConfig;
use mailgraph_core::errors::MailgraphResult;
use mailgraph_core::models::{
    Confidence, EntityCount, GraphSummary, ImportanceRow, LabelCount, QueryFilters,
    RelatedEntities, TimelineEntry, VendorProductRow,
};
use mailgraph_core::traits::{IGraphStore, Row};

use crate::queries;

/// Service object holding the connection singleton and cache, injected
/// into the retriever and ingestor instead of module-level globals.
#[derive(Clone)]
pub struct GraphService {
    connection: Arc<GraphConnectionManager>,
    cache: Arc<TtlCache>,
    cache_config: CacheConfig,
}

impl GraphService {
    pub fn new(
        connection: Arc<GraphConnectionManager>,
        cache: Arc<TtlCache>,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            connection,
            cache,
            cache_config,
        }
    }

    async fn run(&self, query: &str, params: Value) -> MailgraphResult<Vec<Row>> {
        let store = self.connection.get().await?;
        store.run(query, params).await
    }

    /// Apply uniqueness constraints and indexes. Idempotent.
    pub async fn ensure_schema(&self) -> MailgraphResult<()> {
        for statement in queries::SCHEMA_STATEMENTS {
            self.run(statement, json!({})).await?;
        }
        Ok(())
    }

    // --- Retrieval-time reads (degrade to empty on failure) ---

    /// Aggregated product/vendor counts over a document-id set. A store
    /// failure yields empty lists; retrieval must still return the
    /// primary documents.
    pub async fn related_entities(&self, ids: &[String]) -> RelatedEntities {
        if ids.is_empty() {
            return RelatedEntities::default();
        }
        let params = json!({ "ids": ids });
        let (products, vendors) = tokio::join!(
            self.run(queries::RELATED_PRODUCTS, params.clone()),
            self.run(queries::RELATED_VENDORS, params),
        );

        RelatedEntities {
            products: entity_counts(products, "product"),
            vendors: entity_counts(vendors, "vendor"),
        }
    }

    /// Per-document graph signals for the ranker, memoized with the
    /// default TTL. A store failure degrades to no signals (scores of
    /// zero), never to a query failure.
    pub async fn importance_rows(&self, ids: &[String]) -> Vec<ImportanceRow> {
        if ids.is_empty() {
            return Vec::new();
        }
        let key = cache_key("importance_rows", &ids);
        let ttl = Duration::from_secs(self.cache_config.default_ttl_secs);
        let result = self
            .cache
            .get_or_insert_with(&key, ttl, || async {
                let rows = self.run(queries::IMPORTANCE_ROWS, json!({ "ids": ids })).await?;
                Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
            })
            .await;

        match result {
            Ok(Value::Array(rows)) => rows
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|row| {
                    Some(ImportanceRow {
                        id: row_str(row, "id")?,
                        product_count: row_u64(row, "product_count"),
                        date: row_str(row, "date"),
                    })
                })
                .collect(),
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "graph importance lookup failed; scores degrade to zero");
                Vec::new()
            }
        }
    }

    /// Document ids matching the graph-level filters, newest first: the
    /// fallback path when similarity search comes back empty.
    pub async fn fallback_candidates(
        &self,
        filters: &QueryFilters,
        day_span: u32,
        limit: usize,
    ) -> MailgraphResult<Vec<String>> {
        let (query, params) = queries::fallback_candidates(filters, day_span, limit);
        let rows = self.run(&query, params).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row_str(row, "document_id"))
            .collect())
    }

    // --- Relationship reads ---

    pub async fn vendor_products(&self, vendor: &str) -> MailgraphResult<Vec<String>> {
        let rows = self
            .run(queries::VENDOR_PRODUCTS, json!({ "vendor": vendor }))
            .await?;
        Ok(rows.iter().filter_map(|row| row_str(row, "product")).collect())
    }

    pub async fn related_vendors(&self, product: &str) -> MailgraphResult<Vec<String>> {
        let rows = self
            .run(queries::VENDORS_FOR_PRODUCT, json!({ "product": product }))
            .await?;
        Ok(rows.iter().filter_map(|row| row_str(row, "vendor")).collect())
    }

    /// OFFERS edges for a vendor at or above `min` confidence, ordered by
    /// confidence descending. `low` returns all three tiers.
    pub async fn vendor_products_by_confidence(
        &self,
        vendor: &str,
        min: Confidence,
    ) -> MailgraphResult<Vec<VendorProductRow>> {
        let rows = self
            .run(
                queries::VENDOR_PRODUCTS_BY_CONFIDENCE,
                json!({
                    "vendor": vendor,
                    "confidence_levels": min.levels_at_or_above(),
                }),
            )
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(VendorProductRow {
                    vendor: row_str(row, "vendor")?,
                    product: row_str(row, "product")?,
                    confidence: row_str(row, "confidence")?,
                })
            })
            .collect())
    }

    /// Vendor products with confidence levels, memoized. Falls back from
    /// the confidence-filtered read to the plain product list (confidence
    /// `"unknown"`); a store failure yields an empty list.
    pub async fn vendor_products_enhanced(&self, vendor: &str) -> Vec<VendorProductRow> {
        let key = cache_key("vendor_products_enhanced", &vendor);
        let ttl = Duration::from_secs(self.cache_config.vendor_products_ttl_secs);
        let result = self
            .cache
            .get_or_insert_with(&key, ttl, || async {
                let with_confidence = self
                    .vendor_products_by_confidence(vendor, Confidence::Low)
                    .await?;
                let rows = if with_confidence.is_empty() {
                    self.vendor_products(vendor)
                        .await?
                        .into_iter()
                        .map(|product| VendorProductRow {
                            vendor: vendor.to_string(),
                            product,
                            confidence: "unknown".to_string(),
                        })
                        .collect()
                } else {
                    with_confidence
                };
                Ok(serde_json::to_value(rows).unwrap_or(Value::Null))
            })
            .await;

        match result {
            Ok(value) => serde_json::from_value(value).unwrap_or_default(),
            Err(e) => {
                warn!(vendor, error = %e, "vendor product lookup failed");
                Vec::new()
            }
        }
    }

    // --- Aggregates ---

    pub async fn count_vendor_documents(&self, vendor: &str) -> MailgraphResult<u64> {
        let rows = self
            .run(queries::COUNT_VENDOR_DOCUMENTS, json!({ "vendor": vendor }))
            .await?;
        Ok(first_count(&rows))
    }

    pub async fn count_recent_documents(
        &self,
        vendor: Option<&str>,
        days: u32,
    ) -> MailgraphResult<u64> {
        let rows = match vendor {
            Some(vendor) => {
                self.run(
                    queries::COUNT_RECENT_VENDOR_DOCUMENTS,
                    json!({ "vendor": vendor, "days": days }),
                )
                .await?
            }
            None => {
                self.run(queries::COUNT_RECENT_DOCUMENTS, json!({ "days": days }))
                    .await?
            }
        };
        Ok(first_count(&rows))
    }

    /// Security/vulnerability documents from the past `days` days.
    pub async fn find_security_documents(&self, days: u32) -> MailgraphResult<Vec<TimelineEntry>> {
        let rows = self
            .run(queries::SECURITY_DOCUMENTS, json!({ "days": days }))
            .await?;
        Ok(rows.iter().filter_map(timeline_entry).collect())
    }

    /// Recent documents for a vendor and/or product, newest first.
    pub async fn document_timeline(
        &self,
        vendor: Option<&str>,
        product: Option<&str>,
        limit: usize,
    ) -> MailgraphResult<Vec<TimelineEntry>> {
        let (query, params) = queries::timeline(vendor, product, limit);
        let rows = self.run(&query, params).await?;
        Ok(rows.iter().filter_map(timeline_entry).collect())
    }

    /// Node/edge counts by label.
    pub async fn graph_summary(&self) -> MailgraphResult<GraphSummary> {
        let nodes = self.run(queries::SUMMARY_NODES, json!({})).await?;
        let edges = self.run(queries::SUMMARY_EDGES, json!({})).await?;
        Ok(GraphSummary {
            node_counts: nodes.iter().filter_map(label_count).collect(),
            edge_counts: edges.iter().filter_map(label_count).collect(),
        })
    }

    // --- Writes (used by the ingestor and reconciliation) ---

    pub(crate) async fn merge(&self, query: &str, params: Value) -> MailgraphResult<()> {
        self.run(query, params).await.map(|_| ())
    }

    /// Currently persisted confidence for a (vendor, product) pair.
    pub async fn offers_confidence(
        &self,
        vendor: &str,
        product: &str,
    ) -> MailgraphResult<Option<Confidence>> {
        let rows = self
            .run(
                queries::OFFERS_CONFIDENCE,
                json!({ "vendor": vendor, "product": product }),
            )
            .await?;
        Ok(rows
            .first()
            .and_then(|row| row_str(row, "confidence"))
            .and_then(|s| Confidence::parse(&s)))
    }

    pub(crate) async fn upsert_offers(
        &self,
        vendor: &str,
        product: &str,
        confidence: Confidence,
    ) -> MailgraphResult<()> {
        self.merge(
            queries::UPSERT_OFFERS,
            json!({
                "vendor": vendor,
                "product": product,
                "confidence": confidence.as_str(),
            }),
        )
        .await
    }

    pub(crate) async fn all_offers(&self) -> MailgraphResult<Vec<VendorProductRow>> {
        let rows = self.run(queries::ALL_OFFERS, json!({})).await?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(VendorProductRow {
                    vendor: row_str(row, "vendor")?,
                    product: row_str(row, "product")?,
                    confidence: row_str(row, "confidence")?,
                })
            })
            .collect())
    }

    pub(crate) async fn delete_offers(&self, vendor: &str, product: &str) -> MailgraphResult<()> {
        self.merge(
            queries::DELETE_OFFERS,
            json!({ "vendor": vendor, "product": product }),
        )
        .await
    }

    /// Full reset: delete every node and edge. The only destructive
    /// operation outside reconciliation.
    pub async fn reset(&self) -> MailgraphResult<()> {
        self.merge(queries::RESET, json!({})).await
    }
}

// --- Row parsing helpers ---

fn row_str(row: &Row, key: &str) -> Option<String> {
    row.get(key).and_then(Value::as_str).map(str::to_string)
}

fn row_u64(row: &Row, key: &str) -> u64 {
    row.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn first_count(rows: &[Row]) -> u64 {
    rows.first().map(|row| row_u64(row, "count")).unwrap_or(0)
}

fn entity_counts(rows: MailgraphResult<Vec<Row>>, name_key: &str) -> Vec<EntityCount> {
    match rows {
        Ok(rows) => rows
            .iter()
            .filter_map(|row| {
                Some(EntityCount {
                    name: row_str(row, name_key)?,
                    count: row_u64(row, "count"),
                })
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "related-entity lookup failed; returning empty list");
            Vec::new()
        }
    }
}

fn timeline_entry(row: &Row) -> Option<TimelineEntry> {
    Some(TimelineEntry {
        document_id: row_str(row, "document_id")?,
        date: row_str(row, "date").unwrap_or_default(),
        content_type: row_str(row, "type").unwrap_or_default(),
        vendor: row_str(row, "vendor").unwrap_or_default(),
        product: row_str(row, "product"),
    })
}

/// `labels(n)` comes back as a list; `type(r)` as a string. Accept both.
fn label_count(row: &Row) -> Option<LabelCount> {
    let label = match row.get("label") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(":"),
        _ => return None,
    };
    Some(LabelCount {
        label,
        count: row_u64(row, "count"),
    })
}
