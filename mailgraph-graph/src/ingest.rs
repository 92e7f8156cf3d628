//! Ingestion-time graph writes. Structural FROM/ABOUT edges are written
//! unconditionally; OFFERS edges are derived through the confidence
//! validator and persisted only at Medium or High, keeping the maximum
//! level ever observed for a pair.

use tracing::{debug, info};

use mailgraph_core::errors::MailgraphResult;
use mailgraph_core::models::{ChunkMetadata, DocumentChunk};
use mailgraph_validation::ConfidenceValidator;
use serde_json::json;

use crate::queries;
use crate::service::GraphService;

/// One source document as seen by the graph: metadata plus optional full
/// text for relationship analysis.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub id: String,
    pub vendor: String,
    pub products: Vec<String>,
    pub content_type: String,
    pub date: String,
    pub text: Option<String>,
}

impl DocumentRecord {
    /// Build a record from chunk metadata. Missing attributes fall back to
    /// `"unknown"` / the epoch, mirroring what ingestion stores.
    pub fn from_metadata(source_id: &str, meta: &ChunkMetadata, text: Option<String>) -> Self {
        Self {
            id: source_id.to_string(),
            vendor: meta.vendor.clone().unwrap_or_else(|| "unknown".to_string()),
            products: meta.products.clone(),
            content_type: if meta.content_types.is_empty() {
                "unknown".to_string()
            } else {
                meta.content_types.join(", ")
            },
            date: meta.date.clone().unwrap_or_else(|| "1970-01-01".to_string()),
            text,
        }
    }

    /// Group ingested chunks by source document, in first-seen order. The
    /// first chunk of each source contributes the metadata and the text
    /// sample used for relationship analysis.
    pub fn group_chunks(chunks: &[DocumentChunk]) -> Vec<DocumentRecord> {
        let mut records: Vec<DocumentRecord> = Vec::new();
        for chunk in chunks {
            let Some(source_id) = &chunk.metadata.source_id else {
                continue;
            };
            if records.iter().any(|r| &r.id == source_id) {
                continue;
            }
            records.push(Self::from_metadata(
                source_id,
                &chunk.metadata,
                Some(chunk.text.clone()),
            ));
        }
        records
    }
}

/// Writes documents into the relationship graph.
pub struct GraphIngestor {
    service: GraphService,
    validator: ConfidenceValidator,
}

impl GraphIngestor {
    pub fn new(service: GraphService, validator: ConfidenceValidator) -> Self {
        Self { service, validator }
    }

    /// Merge a document and its relationships into the graph.
    ///
    /// Nodes and structural edges merge by key, so repeated imports never
    /// duplicate. The OFFERS upsert keeps the maximum confidence observed
    /// across writes; a weaker later signal leaves the edge untouched.
    pub async fn add_document(&self, record: &DocumentRecord) -> MailgraphResult<()> {
        self.service
            .merge(queries::MERGE_VENDOR, json!({ "vendor": record.vendor }))
            .await?;
        self.service
            .merge(
                queries::MERGE_DOCUMENT,
                json!({
                    "id": record.id,
                    "date": record.date,
                    "type": record.content_type,
                }),
            )
            .await?;
        self.service
            .merge(
                queries::MERGE_FROM,
                json!({ "id": record.id, "vendor": record.vendor }),
            )
            .await?;

        for product in record.products.iter().filter(|p| !p.is_empty()) {
            self.service
                .merge(queries::MERGE_PRODUCT, json!({ "product": product }))
                .await?;
            self.service
                .merge(
                    queries::MERGE_ABOUT,
                    json!({ "id": record.id, "product": product }),
                )
                .await?;

            let confidence =
                self.validator
                    .validate(&record.vendor, product, record.text.as_deref());
            match confidence {
                Some(confidence) if confidence.is_persistable() => {
                    let existing = self
                        .service
                        .offers_confidence(&record.vendor, product)
                        .await?;
                    if existing.is_some_and(|e| e >= confidence) {
                        debug!(
                            vendor = %record.vendor,
                            product = %product,
                            existing = %existing.unwrap_or(confidence),
                            "keeping stronger existing OFFERS confidence"
                        );
                    } else {
                        self.service
                            .upsert_offers(&record.vendor, product, confidence)
                            .await?;
                        info!(
                            vendor = %record.vendor,
                            product = %product,
                            confidence = %confidence,
                            "persisted OFFERS relationship"
                        );
                    }
                }
                _ => {
                    debug!(
                        vendor = %record.vendor,
                        product = %product,
                        ?confidence,
                        "skipping OFFERS below persistence threshold"
                    );
                }
            }
        }

        info!(document_id = %record.id, "added document to graph");
        Ok(())
    }
}
