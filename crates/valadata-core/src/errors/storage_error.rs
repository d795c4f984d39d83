//! Storage errors.

use super::error_code::{self, ValadataErrorCode};

/// Errors raised by score store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Corrupt record for {entity}@{version}: {message}")]
    CorruptRecord {
        entity: String,
        version: String,
        message: String,
    },
}

impl ValadataErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::CorruptRecord { .. } => error_code::CORRUPT_RECORD,
        }
    }
}
