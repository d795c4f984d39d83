//! In-memory [`ScoreStore`] for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use valadata_core::errors::StorageError;
use valadata_core::traits::ScoreStore;
use valadata_core::{
    CompositeScoreRecord, CompositeVersion, EntityRef, StoredRecord, TagScoreRecord, TagVersion,
};

use crate::now_rfc3339;

type Key = (EntityRef, String);

#[derive(Default)]
pub struct InMemoryScoreStore {
    composite: Mutex<BTreeMap<Key, StoredRecord<CompositeScoreRecord>>>,
    tags: Mutex<BTreeMap<Key, StoredRecord<TagScoreRecord>>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    m.lock().map_err(|_| StorageError::SqliteError {
        message: "in-memory store lock poisoned".to_string(),
    })
}

impl ScoreStore for InMemoryScoreStore {
    fn upsert_composite(&self, record: &CompositeScoreRecord) -> Result<(), StorageError> {
        let key = (record.entity.clone(), record.version.as_str().to_string());
        lock(&self.composite)?.insert(
            key,
            StoredRecord {
                record: record.clone(),
                computed_at: now_rfc3339(),
            },
        );
        Ok(())
    }

    fn get_composite(
        &self,
        entity: &EntityRef,
        version: &CompositeVersion,
    ) -> Result<Option<StoredRecord<CompositeScoreRecord>>, StorageError> {
        let key = (entity.clone(), version.as_str().to_string());
        Ok(lock(&self.composite)?.get(&key).cloned())
    }

    fn count_composite(&self, version: &CompositeVersion) -> Result<usize, StorageError> {
        Ok(lock(&self.composite)?
            .keys()
            .filter(|(_, v)| v == version.as_str())
            .count())
    }

    fn upsert_tags(&self, record: &TagScoreRecord) -> Result<(), StorageError> {
        let key = (record.entity.clone(), record.version.as_str().to_string());
        lock(&self.tags)?.insert(
            key,
            StoredRecord {
                record: record.clone(),
                computed_at: now_rfc3339(),
            },
        );
        Ok(())
    }

    fn get_tags(
        &self,
        entity: &EntityRef,
        version: &TagVersion,
    ) -> Result<Option<StoredRecord<TagScoreRecord>>, StorageError> {
        let key = (entity.clone(), version.as_str().to_string());
        Ok(lock(&self.tags)?.get(&key).cloned())
    }

    fn count_tags(&self, version: &TagVersion) -> Result<usize, StorageError> {
        Ok(lock(&self.tags)?
            .keys()
            .filter(|(_, v)| v == version.as_str())
            .count())
    }
}
