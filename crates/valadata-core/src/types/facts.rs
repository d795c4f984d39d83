//! Normalized per-source bags, resolved canonical facts, and the conflict ledger.
//!
//! All maps are ordered so that serialized output is byte-identical for
//! identical input.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::field::{FieldValue, ServiceField};
use super::provenance::ProvenanceSource;

/// Canonical field → value for one (entity, source) pair.
///
/// Absent fields have no key. Setting a field to [`FieldValue::Absent`]
/// removes it; reading a missing field yields `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedBag {
    values: BTreeMap<ServiceField, FieldValue>,
}

impl NormalizedBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ServiceField) -> FieldValue {
        self.values.get(&field).copied().unwrap_or(FieldValue::Absent)
    }

    pub fn set(&mut self, field: ServiceField, value: FieldValue) {
        if value.is_absent() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Builder form of [`Self::set`].
    pub fn with(mut self, field: ServiceField, value: impl Into<FieldValue>) -> Self {
        self.set(field, value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceField, FieldValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ServiceField, FieldValue)> for NormalizedBag {
    fn from_iter<I: IntoIterator<Item = (ServiceField, FieldValue)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (field, value) in iter {
            bag.set(field, value);
        }
        bag
    }
}

/// Canonical field → resolved boolean. Unresolvable fields have no key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalFactSet {
    facts: BTreeMap<ServiceField, bool>,
}

impl CanonicalFactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ServiceField) -> Option<bool> {
        self.facts.get(&field).copied()
    }

    pub fn insert(&mut self, field: ServiceField, value: bool) {
        self.facts.insert(field, value);
    }

    pub fn contains(&self, field: ServiceField) -> bool {
        self.facts.contains_key(&field)
    }

    /// True only when the field resolved to `true`.
    pub fn is_true(&self, field: ServiceField) -> bool {
        self.get(field).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceField, bool)> + '_ {
        self.facts.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Disagreement between two or more informative sources on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    /// Every informative source, highest priority first.
    pub sources: Vec<ProvenanceSource>,
    /// Value held by each of `sources`, and only those.
    pub values: BTreeMap<ProvenanceSource, bool>,
}

impl ConflictEntry {
    /// The source whose value became canonical.
    pub fn winner(&self) -> Option<ProvenanceSource> {
        self.sources.first().copied()
    }
}

/// Canonical field → conflict entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictLedger {
    entries: BTreeMap<ServiceField, ConflictEntry>,
}

impl ConflictLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ServiceField) -> Option<&ConflictEntry> {
        self.entries.get(&field)
    }

    pub fn insert(&mut self, field: ServiceField, entry: ConflictEntry) {
        self.entries.insert(field, entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceField, &ConflictEntry)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the canonical fact resolver for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub canonical: CanonicalFactSet,
    pub conflicts: ConflictLedger,
    /// Fields for which sources only asserted "unknown".
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unknown: BTreeSet<ServiceField>,
}
