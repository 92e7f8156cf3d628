//! Workspace error types. One enum per subsystem, aggregated into
//! [`MailgraphError`].

pub mod embedding_error;
pub mod store_error;

pub use embedding_error::EmbeddingError;
pub use store_error::StoreError;

/// Top-level error for the mailgraph workspace.
#[derive(Debug, thiserror::Error)]
pub enum MailgraphError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("config error: {reason}")]
    Config { reason: String },
}

pub type MailgraphResult<T> = Result<T, MailgraphError>;
