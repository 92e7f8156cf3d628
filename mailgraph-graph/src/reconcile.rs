//! Reconciliation of stale OFFERS edges against the current catalog.
//!
//! Queries never prune; staleness is corrected only by this explicit,
//! separately schedulable pass. Only High edges are candidates: their
//! evidence was the catalog, so a catalog change can invalidate them.
//! Medium edges rest on document text and are left alone.

use tracing::info;

use mailgraph_core::errors::MailgraphResult;
use mailgraph_validation::VendorCatalog;

use crate::service::GraphService;

/// Delete OFFERS edges recorded at High confidence whose pair no longer
/// matches the catalog. Returns the number of edges removed.
pub async fn reconcile_offers(
    service: &GraphService,
    catalog: &VendorCatalog,
) -> MailgraphResult<usize> {
    let edges = service.all_offers().await?;
    let mut removed = 0;

    for edge in &edges {
        if edge.confidence == "high" && !catalog.contains(&edge.vendor, &edge.product) {
            service.delete_offers(&edge.vendor, &edge.product).await?;
            removed += 1;
            info!(
                vendor = %edge.vendor,
                product = %edge.product,
                "removed OFFERS edge no longer backed by the catalog"
            );
        }
    }

    info!(removed, total = edges.len(), "reconciliation pass complete");
    Ok(removed)
}
