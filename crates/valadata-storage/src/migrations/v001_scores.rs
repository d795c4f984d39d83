//! V001 migration: composite and tag score tables.
//!
//! One row per (entity_id, version) in each table. Component readings and
//! tag scores are stored as JSON objects so new components or tags do not
//! need a schema change.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS composite_scores (
    entity_id TEXT NOT NULL,
    version TEXT NOT NULL,
    overall REAL NOT NULL,
    confidence REAL NOT NULL,
    components TEXT NOT NULL,
    computed_at TEXT NOT NULL,
    UNIQUE (entity_id, version)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_composite_scores_version ON composite_scores(version);

CREATE TABLE IF NOT EXISTS tag_scores (
    entity_id TEXT NOT NULL,
    version TEXT NOT NULL,
    scores TEXT NOT NULL,
    confidence REAL NOT NULL,
    depends_on_composite_version TEXT NOT NULL,
    computed_at TEXT NOT NULL,
    UNIQUE (entity_id, version)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_tag_scores_version ON tag_scores(version);
CREATE INDEX IF NOT EXISTS idx_tag_scores_dependency ON tag_scores(depends_on_composite_version);
"#;
