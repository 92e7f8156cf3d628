use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MailgraphResult;

/// Row returned by a graph query: column name → value.
pub type Row = serde_json::Map<String, Value>;

/// A service holding typed nodes/edges queryable via a declarative graph
/// query language. All relationship reads and writes go through `run`.
#[async_trait]
pub trait IGraphStore: Send + Sync {
    /// Run a query with named parameters (`params` is a JSON object).
    async fn run(&self, query: &str, params: Value) -> MailgraphResult<Vec<Row>>;
}

#[async_trait]
impl<T: IGraphStore + ?Sized> IGraphStore for Arc<T> {
    async fn run(&self, query: &str, params: Value) -> MailgraphResult<Vec<Row>> {
        (**self).run(query, params).await
    }
}
