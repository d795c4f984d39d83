//! Batch driver errors.

use super::error_code::{self, ValadataErrorCode};
use super::{ConfigError, StorageError, VersionError};

/// Errors that can occur while the batch driver processes an entity.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Entity not found: {entity}")]
    EntityNotFound { entity: String },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    #[error("Batch cancelled")]
    Cancelled,
}

impl ValadataErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EntityNotFound { .. } => error_code::ENTITY_NOT_FOUND,
            Self::Provider { .. } => error_code::PROVIDER_ERROR,
            Self::Storage(e) => e.error_code(),
            Self::Version(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::WorkerPool { .. } => error_code::WORKER_POOL_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
