//! Queries for `composite_scores`.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension};
use valadata_core::errors::StorageError;
use valadata_core::{
    ComponentName, ComponentReading, CompositeScoreRecord, CompositeVersion, EntityRef,
    StoredRecord,
};

use crate::sqlite_err;

/// Insert or fully replace the row for (entity, version).
pub fn upsert(
    conn: &Connection,
    record: &CompositeScoreRecord,
    computed_at: &str,
) -> Result<(), StorageError> {
    let components = serde_json::to_string(&record.components).map_err(|e| {
        StorageError::CorruptRecord {
            entity: record.entity.to_string(),
            version: record.version.to_string(),
            message: e.to_string(),
        }
    })?;
    conn.prepare_cached(
        "INSERT INTO composite_scores
            (entity_id, version, overall, confidence, components, computed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT (entity_id, version) DO UPDATE SET
            overall = excluded.overall,
            confidence = excluded.confidence,
            components = excluded.components,
            computed_at = excluded.computed_at",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            record.entity.as_str(),
            record.version.as_str(),
            record.overall,
            record.confidence,
            components,
            computed_at,
        ])
    })
    .map_err(sqlite_err)?;
    Ok(())
}

/// Fetch the row for (entity, version), if any.
pub fn get(
    conn: &Connection,
    entity: &EntityRef,
    version: &CompositeVersion,
) -> Result<Option<StoredRecord<CompositeScoreRecord>>, StorageError> {
    let row = conn
        .prepare_cached(
            "SELECT overall, confidence, components, computed_at
             FROM composite_scores WHERE entity_id = ?1 AND version = ?2",
        )
        .and_then(|mut stmt| {
            stmt.query_row(params![entity.as_str(), version.as_str()], |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .optional()
        })
        .map_err(sqlite_err)?;

    let Some((overall, confidence, components, computed_at)) = row else {
        return Ok(None);
    };
    let components: BTreeMap<ComponentName, ComponentReading> = serde_json::from_str(&components)
        .map_err(|e| StorageError::CorruptRecord {
            entity: entity.to_string(),
            version: version.to_string(),
            message: e.to_string(),
        })?;

    Ok(Some(StoredRecord {
        record: CompositeScoreRecord {
            entity: entity.clone(),
            version: version.clone(),
            overall,
            confidence,
            components,
        },
        computed_at,
    }))
}

/// Number of rows stored for `version`.
pub fn count(conn: &Connection, version: &CompositeVersion) -> Result<usize, StorageError> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM composite_scores WHERE version = ?1",
            params![version.as_str()],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(n as usize)
}
