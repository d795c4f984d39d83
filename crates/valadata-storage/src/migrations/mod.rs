//! Schema migrations tracked in `PRAGMA user_version`.

pub mod v001_scores;

use rusqlite::Connection;
use valadata_core::errors::StorageError;

/// Ordered migrations: (target version, SQL).
const MIGRATIONS: &[(u32, &str)] = &[(1, v001_scores::MIGRATION_SQL)];

/// Schema version after all migrations have run.
pub const LATEST_VERSION: u32 = 1;

/// Current `user_version` of the database.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Apply every migration newer than the database's `user_version`. Each
/// migration runs in its own transaction together with the version bump.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current = current_version(conn)?;
    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let fail = |e: rusqlite::Error| StorageError::MigrationFailed {
            version: *version,
            message: e.to_string(),
        };
        conn.execute_batch("BEGIN IMMEDIATE;").map_err(fail)?;
        let applied = conn
            .execute_batch(sql)
            .and_then(|()| conn.pragma_update(None, "user_version", version));
        match applied {
            Ok(()) => conn.execute_batch("COMMIT;").map_err(fail)?,
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK;");
                return Err(fail(e));
            }
        }
        tracing::info!(version, "applied migration");
    }
    Ok(())
}
