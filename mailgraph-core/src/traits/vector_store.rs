use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::MailgraphResult;
use crate::models::{FilterSet, VectorQueryResult};

/// A service indexing embedding vectors with associated metadata,
/// supporting nearest-neighbor queries and direct id lookup.
///
/// The filter set is a conjunction of constraints over the metadata fields
/// (vendor, product, type, source id). Backends that only support equality
/// receive `Contains` constraints downgraded to `Equals` by the retriever
/// before the call reaches them.
#[async_trait]
pub trait IVectorStore: Send + Sync {
    /// Nearest-neighbor query. Parallel columns; `distances[i]` belongs to
    /// `documents[i]`.
    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        filter: &FilterSet,
    ) -> MailgraphResult<VectorQueryResult>;

    /// Direct lookup by source-document id, bypassing similarity scoring.
    /// Returns every chunk belonging to the given source documents; the
    /// `distances` column is left empty.
    async fn get_by_ids(&self, ids: &[String]) -> MailgraphResult<VectorQueryResult>;
}

/// `Arc<T>` delegates to the inner store, so `Arc<MyStore>` can be used
/// anywhere a `dyn IVectorStore` is expected.
#[async_trait]
impl<T: IVectorStore + ?Sized> IVectorStore for Arc<T> {
    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        filter: &FilterSet,
    ) -> MailgraphResult<VectorQueryResult> {
        (**self).query(embedding, top_k, filter).await
    }

    async fn get_by_ids(&self, ids: &[String]) -> MailgraphResult<VectorQueryResult> {
        (**self).get_by_ids(ids).await
    }
}
