//! Process-lifetime Graph Store handle with guarded lazy initialization.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use mailgraph_core::errors::MailgraphResult;
use mailgraph_core::traits::IGraphStore;

type ConnectFuture = Pin<Box<dyn Future<Output = MailgraphResult<Arc<dyn IGraphStore>>> + Send>>;
type Connector = Box<dyn Fn() -> ConnectFuture + Send + Sync>;

/// Singleton reusable Graph Store handle.
///
/// Lazily created on first use and shared by every subsequent caller; no
/// explicit close until process shutdown. Concurrent first callers are
/// serialized by the cell, so the connector runs at most once per
/// successful connect. A failed connect is not memoized; the next caller
/// retries.
pub struct GraphConnectionManager {
    cell: OnceCell<Arc<dyn IGraphStore>>,
    connect: Connector,
}

impl GraphConnectionManager {
    pub fn new<F, Fut>(connect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = MailgraphResult<Arc<dyn IGraphStore>>> + Send + 'static,
    {
        Self {
            cell: OnceCell::new(),
            connect: Box::new(move || Box::pin(connect())),
        }
    }

    /// A manager wrapping an already-connected store (tests, embedded use).
    pub fn from_store(store: Arc<dyn IGraphStore>) -> Self {
        let cell = OnceCell::new();
        cell.set(Arc::clone(&store)).ok();
        Self {
            cell,
            connect: Box::new(move || {
                let store = Arc::clone(&store);
                Box::pin(async move { Ok(store) })
            }),
        }
    }

    /// The shared handle, connecting on first use.
    pub async fn get(&self) -> MailgraphResult<Arc<dyn IGraphStore>> {
        let store = self
            .cell
            .get_or_try_init(|| async {
                info!("opening graph store connection");
                (self.connect)().await
            })
            .await?;
        Ok(Arc::clone(store))
    }

    /// Whether a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicU32, Ordering};

    use mailgraph_core::errors::StoreError;
    use mailgraph_core::traits::Row;

    struct NullStore;

    #[async_trait]
    impl IGraphStore for NullStore {
        async fn run(&self, _query: &str, _params: Value) -> MailgraphResult<Vec<Row>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn connector_runs_once_for_concurrent_callers() {
        let connects = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&connects);
        let manager = Arc::new(GraphConnectionManager::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(NullStore) as Arc<dyn IGraphStore>)
            }
        }));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let manager = Arc::clone(&manager);
            handles.push(tokio::spawn(async move { manager.get().await.is_ok() }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_connect_is_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);
        let manager = GraphConnectionManager::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(StoreError::GraphUnavailable {
                        reason: "first attempt refused".into(),
                    }
                    .into())
                } else {
                    Ok(Arc::new(NullStore) as Arc<dyn IGraphStore>)
                }
            }
        });

        assert!(manager.get().await.is_err());
        assert!(!manager.is_connected());
        assert!(manager.get().await.is_ok());
        assert!(manager.is_connected());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn from_store_is_preconnected() {
        let manager = GraphConnectionManager::from_store(Arc::new(NullStore));
        assert!(manager.is_connected());
        assert!(manager.get().await.is_ok());
    }
}
