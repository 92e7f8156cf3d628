//! Every graph query this crate issues, as consts and builders. Mocks in
//! tests match on these by identity, and keeping the text in one place
//! keeps the schema assumptions auditable.

use serde_json::{json, Value};

use mailgraph_core::models::QueryFilters;

/// Uniqueness constraints and indexes, applied in order at startup.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT vendor_name IF NOT EXISTS FOR (v:Vendor) REQUIRE v.name IS UNIQUE",
    "CREATE CONSTRAINT product_name IF NOT EXISTS FOR (p:Product) REQUIRE p.name IS UNIQUE",
    "CREATE CONSTRAINT document_id IF NOT EXISTS FOR (d:Document) REQUIRE d.id IS UNIQUE",
    "CREATE INDEX document_date IF NOT EXISTS FOR (d:Document) ON (d.date)",
    "CREATE INDEX document_type IF NOT EXISTS FOR (d:Document) ON (d.type)",
];

// --- Ingestion writes (merge-by-key; repeated imports never duplicate) ---

pub const MERGE_VENDOR: &str = "MERGE (v:Vendor {name: $vendor})";

pub const MERGE_DOCUMENT: &str =
    "MERGE (d:Document {id: $id}) SET d.date = $date, d.type = $type";

pub const MERGE_FROM: &str = "MATCH (d:Document {id: $id}) \
     MATCH (v:Vendor {name: $vendor}) \
     MERGE (d)-[:FROM]->(v)";

pub const MERGE_PRODUCT: &str = "MERGE (p:Product {name: $product})";

pub const MERGE_ABOUT: &str = "MATCH (d:Document {id: $id}) \
     MATCH (p:Product {name: $product}) \
     MERGE (d)-[:ABOUT]->(p)";

pub const OFFERS_CONFIDENCE: &str =
    "MATCH (v:Vendor {name: $vendor})-[r:OFFERS]->(p:Product {name: $product}) \
     RETURN r.confidence AS confidence";

pub const UPSERT_OFFERS: &str = "MATCH (v:Vendor {name: $vendor}) \
     MATCH (p:Product {name: $product}) \
     MERGE (v)-[r:OFFERS]->(p) \
     SET r.confidence = $confidence";

// --- Retrieval-time reads ---

pub const RELATED_PRODUCTS: &str = "MATCH (d:Document)-[:ABOUT]->(p:Product) \
     WHERE d.id IN $ids \
     RETURN p.name AS product, count(d) AS count \
     ORDER BY count DESC";

pub const RELATED_VENDORS: &str = "MATCH (d:Document)-[:FROM]->(v:Vendor) \
     WHERE d.id IN $ids \
     RETURN v.name AS vendor, count(d) AS count \
     ORDER BY count DESC";

pub const IMPORTANCE_ROWS: &str = "MATCH (d:Document) \
     WHERE d.id IN $ids \
     OPTIONAL MATCH (d)-[:ABOUT]->(p:Product) \
     WITH d, count(DISTINCT p) AS product_count \
     RETURN d.id AS id, product_count, d.date AS date";

// --- Relationship reads ---

pub const VENDOR_PRODUCTS: &str =
    "MATCH (v:Vendor {name: $vendor})-[:OFFERS]->(p:Product) \
     RETURN p.name AS product";

pub const VENDORS_FOR_PRODUCT: &str =
    "MATCH (p:Product {name: $product})<-[:OFFERS]-(v:Vendor) \
     RETURN v.name AS vendor";

pub const VENDOR_PRODUCTS_BY_CONFIDENCE: &str =
    "MATCH (v:Vendor)-[r:OFFERS]->(p:Product) \
     WHERE toLower(v.name) CONTAINS toLower($vendor) \
     AND r.confidence IN $confidence_levels \
     RETURN v.name AS vendor, p.name AS product, r.confidence AS confidence \
     ORDER BY r.confidence DESC";

// --- Aggregates ---

pub const COUNT_VENDOR_DOCUMENTS: &str =
    "MATCH (d:Document)-[:FROM]->(v:Vendor {name: $vendor}) \
     RETURN count(d) AS count";

pub const COUNT_RECENT_DOCUMENTS: &str = "MATCH (d:Document)-[:FROM]->(v:Vendor) \
     WHERE d.date > datetime() - duration({days: $days}) \
     RETURN count(d) AS count";

pub const COUNT_RECENT_VENDOR_DOCUMENTS: &str = "MATCH (d:Document)-[:FROM]->(v:Vendor) \
     WHERE v.name = $vendor \
     AND d.date > datetime() - duration({days: $days}) \
     RETURN count(d) AS count";

pub const SECURITY_DOCUMENTS: &str =
    "MATCH (d:Document)-[:FROM]->(v:Vendor), (d)-[:ABOUT]->(p:Product) \
     WHERE (d.type CONTAINS 'security' OR d.type CONTAINS 'vulnerability') \
     AND d.date > datetime() - duration({days: $days}) \
     RETURN DISTINCT d.id AS document_id, d.date AS date, v.name AS vendor, \
            p.name AS product, d.type AS type \
     ORDER BY d.date DESC";

pub const SUMMARY_NODES: &str = "MATCH (n) \
     WITH labels(n) AS label, count(n) AS count \
     RETURN label, count \
     ORDER BY count DESC";

pub const SUMMARY_EDGES: &str = "MATCH ()-[r]->() \
     WITH type(r) AS label, count(r) AS count \
     RETURN label, count \
     ORDER BY count DESC";

// --- Maintenance ---

pub const ALL_OFFERS: &str = "MATCH (v:Vendor)-[r:OFFERS]->(p:Product) \
     RETURN v.name AS vendor, p.name AS product, r.confidence AS confidence";

pub const DELETE_OFFERS: &str =
    "MATCH (v:Vendor {name: $vendor})-[r:OFFERS]->(p:Product {name: $product}) \
     DELETE r";

pub const RESET: &str = "MATCH (n) DETACH DELETE n";

/// Build the fallback candidate query: document ids filtered by time
/// window, vendor, and product, newest first.
pub fn fallback_candidates(filters: &QueryFilters, day_span: u32, limit: usize) -> (String, Value) {
    let mut query = String::from("MATCH (d:Document)\n");
    let mut clauses = vec!["d.date > datetime() - duration({days: $days})".to_string()];
    let mut params = json!({ "days": day_span, "limit": limit });

    if let Some(vendor) = &filters.vendor {
        query.push_str("MATCH (d)-[:FROM]->(v:Vendor)\n");
        clauses.push("v.name = $vendor".to_string());
        params["vendor"] = json!(vendor);
    }
    if let Some(product) = &filters.product {
        query.push_str("MATCH (d)-[:ABOUT]->(p:Product)\n");
        clauses.push("p.name CONTAINS $product".to_string());
        params["product"] = json!(product);
    }

    query.push_str("WHERE ");
    query.push_str(&clauses.join(" AND "));
    query.push_str(
        "\nRETURN DISTINCT d.id AS document_id, d.date AS date, d.type AS type\n\
         ORDER BY d.date DESC\nLIMIT $limit",
    );
    (query, params)
}

/// Build the timeline query: recent documents for a vendor and/or product.
pub fn timeline(vendor: Option<&str>, product: Option<&str>, limit: usize) -> (String, Value) {
    let mut clauses = Vec::new();
    let mut params = json!({ "limit": limit });

    if let Some(vendor) = vendor {
        clauses.push("v.name = $vendor");
        params["vendor"] = json!(vendor);
    }
    if let Some(product) = product {
        clauses.push("p.name = $product");
        params["product"] = json!(product);
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}\n", clauses.join(" AND "))
    };

    let query = format!(
        "MATCH (d:Document)-[:FROM]->(v:Vendor), (d)-[:ABOUT]->(p:Product)\n\
         {where_clause}RETURN d.id AS document_id, d.date AS date, d.type AS type, \
         v.name AS vendor, p.name AS product\n\
         ORDER BY d.date DESC\nLIMIT $limit"
    );
    (query, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_query_with_all_filters() {
        let filters = QueryFilters {
            vendor: Some("hashicorp".into()),
            product: Some("vault".into()),
            content_type: None,
            day_span: Some(30),
        };
        let (query, params) = fallback_candidates(&filters, 30, 5);
        assert!(query.contains("[:FROM]"));
        assert!(query.contains("[:ABOUT]"));
        assert!(query.contains("v.name = $vendor"));
        assert!(query.contains("p.name CONTAINS $product"));
        assert_eq!(params["days"], 30);
        assert_eq!(params["vendor"], "hashicorp");
    }

    #[test]
    fn fallback_query_with_time_window_only() {
        let filters = QueryFilters {
            day_span: Some(7),
            ..Default::default()
        };
        let (query, params) = fallback_candidates(&filters, 7, 10);
        assert!(!query.contains("[:FROM]"));
        assert!(!query.contains("[:ABOUT]"));
        assert!(query.contains("d.date > datetime()"));
        assert_eq!(params["days"], 7);
        assert_eq!(params["limit"], 10);
    }

    #[test]
    fn timeline_without_filters_has_no_where() {
        let (query, _) = timeline(None, None, 10);
        assert!(!query.contains("WHERE"));
    }
}
