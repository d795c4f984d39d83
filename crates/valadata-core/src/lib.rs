//! # valadata-core
//!
//! Foundation crate for the Valadata fact-reconciliation and scoring engine.
//! Defines the shared value types, score versions, the store trait, errors,
//! config, pipeline events, and tracing setup. Every other crate in the
//! workspace depends on this one; it depends on none of them.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;
pub mod version;

// Re-export the most commonly used types at the crate root.
pub use config::ValadataConfig;
pub use types::{
    CanonicalFactSet, ComponentName, ComponentReading, CompositeScoreRecord, ConflictEntry,
    ConflictLedger, EntityRef, FieldValue, NormalizedBag, ProvenanceSource, Resolution,
    ServiceField, StoredRecord, Tag, TagScoreRecord,
};
pub use version::{CompositeVersion, TagVersion, VersionRegistry};
