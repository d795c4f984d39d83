//! Shared value types: entities, provenance, three-state field values,
//! normalized bags, resolved facts, and score records.

pub mod entity;
pub mod facts;
pub mod field;
pub mod provenance;
pub mod scores;

pub use entity::EntityRef;
pub use facts::{CanonicalFactSet, ConflictEntry, ConflictLedger, NormalizedBag, Resolution};
pub use field::{FieldValue, ServiceField};
pub use provenance::{ProvenanceSource, UnknownSourceError};
pub use scores::{
    ComponentName, ComponentReading, CompositeScoreRecord, StoredRecord, Tag, TagScoreRecord,
};
