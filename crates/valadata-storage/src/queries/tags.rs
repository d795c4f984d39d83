//! Queries for `tag_scores`.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension};
use valadata_core::errors::StorageError;
use valadata_core::{EntityRef, StoredRecord, Tag, TagScoreRecord, TagVersion};

use crate::sqlite_err;

/// Insert or fully replace the row for (entity, version).
pub fn upsert(
    conn: &Connection,
    record: &TagScoreRecord,
    computed_at: &str,
) -> Result<(), StorageError> {
    let scores = serde_json::to_string(&record.scores).map_err(|e| StorageError::CorruptRecord {
        entity: record.entity.to_string(),
        version: record.version.to_string(),
        message: e.to_string(),
    })?;
    conn.prepare_cached(
        "INSERT INTO tag_scores
            (entity_id, version, scores, confidence, depends_on_composite_version, computed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT (entity_id, version) DO UPDATE SET
            scores = excluded.scores,
            confidence = excluded.confidence,
            depends_on_composite_version = excluded.depends_on_composite_version,
            computed_at = excluded.computed_at",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            record.entity.as_str(),
            record.version.as_str(),
            scores,
            record.confidence,
            record.depends_on_composite_version,
            computed_at,
        ])
    })
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn get(
    conn: &Connection,
    entity: &EntityRef,
    version: &TagVersion,
) -> Result<Option<StoredRecord<TagScoreRecord>>, StorageError> {
    let row = conn
        .prepare_cached(
            "SELECT scores, confidence, depends_on_composite_version, computed_at
             FROM tag_scores WHERE entity_id = ?1 AND version = ?2",
        )
        .and_then(|mut stmt| {
            stmt.query_row(params![entity.as_str(), version.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .optional()
        })
        .map_err(sqlite_err)?;

    let Some((scores, confidence, depends_on_composite_version, computed_at)) = row else {
        return Ok(None);
    };
    let scores: BTreeMap<Tag, f64> =
        serde_json::from_str(&scores).map_err(|e| StorageError::CorruptRecord {
            entity: entity.to_string(),
            version: version.to_string(),
            message: e.to_string(),
        })?;

    Ok(Some(StoredRecord {
        record: TagScoreRecord {
            entity: entity.clone(),
            version: version.clone(),
            scores,
            confidence,
            depends_on_composite_version,
        },
        computed_at,
    }))
}

pub fn count(conn: &Connection, version: &TagVersion) -> Result<usize, StorageError> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM tag_scores WHERE version = ?1",
            params![version.as_str()],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(n as usize)
}

/// Entities whose `version` row was computed against a composite version
/// other than `composite_version`.
pub fn stale_entities(
    conn: &Connection,
    version: &TagVersion,
    composite_version: &str,
) -> Result<Vec<EntityRef>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT entity_id FROM tag_scores
             WHERE version = ?1 AND depends_on_composite_version <> ?2
             ORDER BY entity_id",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![version.as_str(), composite_version], |row| {
            row.get::<_, String>(0)
        })
        .map_err(sqlite_err)?;
    rows.map(|r| r.map(EntityRef::new).map_err(sqlite_err))
        .collect()
}
