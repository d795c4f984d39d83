use crate::errors::StorageError;
use crate::types::{CompositeScoreRecord, EntityRef, StoredRecord, TagScoreRecord};
use crate::version::{CompositeVersion, TagVersion};

/// Versioned score persistence keyed by (entity, version).
///
/// Upserts fully replace any prior record for the same key; they never
/// merge. Implementations must serialize concurrent writes to the same key
/// so a reader never observes a partial record.
pub trait ScoreStore: Send + Sync {
    // --- Composite ---
    fn upsert_composite(&self, record: &CompositeScoreRecord) -> Result<(), StorageError>;
    fn get_composite(
        &self,
        entity: &EntityRef,
        version: &CompositeVersion,
    ) -> Result<Option<StoredRecord<CompositeScoreRecord>>, StorageError>;
    fn count_composite(&self, version: &CompositeVersion) -> Result<usize, StorageError>;

    // --- Tags ---
    fn upsert_tags(&self, record: &TagScoreRecord) -> Result<(), StorageError>;
    fn get_tags(
        &self,
        entity: &EntityRef,
        version: &TagVersion,
    ) -> Result<Option<StoredRecord<TagScoreRecord>>, StorageError>;
    fn count_tags(&self, version: &TagVersion) -> Result<usize, StorageError>;
}
