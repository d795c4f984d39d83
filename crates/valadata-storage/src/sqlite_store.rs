//! SQLite-backed [`ScoreStore`].

use std::path::Path;

use valadata_core::config::StorageConfig;
use valadata_core::errors::StorageError;
use valadata_core::traits::ScoreStore;
use valadata_core::{
    CompositeScoreRecord, CompositeVersion, EntityRef, StoredRecord, TagScoreRecord, TagVersion,
};

use crate::connection::pool::DEFAULT_POOL_SIZE;
use crate::connection::DatabaseManager;
use crate::{now_rfc3339, queries};

pub struct SqliteScoreStore {
    db: DatabaseManager,
}

impl SqliteScoreStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_pool(path, DEFAULT_POOL_SIZE)
    }

    pub fn open_with_pool(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path, read_pool_size)?;
        tracing::debug!(path = %path.display(), "opened score store");
        Ok(Self { db })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::open_with_pool(
            &config.effective_database_path(),
            config.effective_read_pool_size(),
        )
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    /// Entities with a `version` tag row computed against a composite
    /// version other than `composite_version`.
    pub fn stale_tag_entities(
        &self,
        version: &TagVersion,
        composite_version: &CompositeVersion,
    ) -> Result<Vec<EntityRef>, StorageError> {
        self.db.with_reader(|conn| {
            queries::tags::stale_entities(conn, version, composite_version.as_str())
        })
    }
}

impl ScoreStore for SqliteScoreStore {
    fn upsert_composite(&self, record: &CompositeScoreRecord) -> Result<(), StorageError> {
        let computed_at = now_rfc3339();
        self.db
            .with_writer(|conn| queries::composite::upsert(conn, record, &computed_at))
    }

    fn get_composite(
        &self,
        entity: &EntityRef,
        version: &CompositeVersion,
    ) -> Result<Option<StoredRecord<CompositeScoreRecord>>, StorageError> {
        self.db
            .with_reader(|conn| queries::composite::get(conn, entity, version))
    }

    fn count_composite(&self, version: &CompositeVersion) -> Result<usize, StorageError> {
        self.db.with_reader(|conn| queries::composite::count(conn, version))
    }

    fn upsert_tags(&self, record: &TagScoreRecord) -> Result<(), StorageError> {
        let computed_at = now_rfc3339();
        self.db
            .with_writer(|conn| queries::tags::upsert(conn, record, &computed_at))
    }

    fn get_tags(
        &self,
        entity: &EntityRef,
        version: &TagVersion,
    ) -> Result<Option<StoredRecord<TagScoreRecord>>, StorageError> {
        self.db
            .with_reader(|conn| queries::tags::get(conn, entity, version))
    }

    fn count_tags(&self, version: &TagVersion) -> Result<usize, StorageError> {
        self.db.with_reader(|conn| queries::tags::count(conn, version))
    }
}
