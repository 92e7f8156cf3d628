use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::MailgraphResult;

/// Embedding generation boundary. Fixed dimensionality per deployment.
/// Failures propagate as a hard error to the caller; similarity search is
/// meaningless without a query vector, so there is no silent fallback.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> MailgraphResult<Vec<f32>>;

    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;
}

#[async_trait]
impl<T: IEmbeddingProvider + ?Sized> IEmbeddingProvider for Arc<T> {
    async fn embed(&self, text: &str) -> MailgraphResult<Vec<f32>> {
        (**self).embed(text).await
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
