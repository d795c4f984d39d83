//! # valadata-storage
//!
//! [`ScoreStore`](valadata_core::traits::ScoreStore) implementations.
//!
//! [`SqliteScoreStore`] keeps one row per (entity, version) in each of
//! `composite_scores` and `tag_scores`; every write is an atomic
//! `INSERT … ON CONFLICT DO UPDATE` through a single writer connection.
//! [`InMemoryScoreStore`] offers the same contract without a database.

pub mod connection;
pub mod memory_store;
pub mod migrations;
pub mod queries;
pub mod sqlite_store;

pub use connection::DatabaseManager;
pub use memory_store::InMemoryScoreStore;
pub use sqlite_store::SqliteScoreStore;

use valadata_core::errors::StorageError;

pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
