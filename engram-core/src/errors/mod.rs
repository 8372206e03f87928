pub mod abstraction_error;
pub mod embedding_error;
pub mod storage_error;
pub mod validation_error;

pub use abstraction_error::AbstractionError;
pub use embedding_error::EmbeddingError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Top-level error type aggregating all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EngramError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Abstraction(#[from] AbstractionError),

    #[error("config error: {0}")]
    Config(String),
}

/// Result alias used throughout the workspace.
pub type EngramResult<T> = Result<T, EngramError>;
