use thiserror::Error;

use intake_engine::error::EngineError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("ETag mismatch (expected {expected}, got {actual})")]
    ETagMismatch { expected: String, actual: String },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
