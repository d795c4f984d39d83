//! Canonical fact resolver.
//!
//! Merges per-source bags into one canonical fact set. Each field is
//! resolved independently:
//!
//! 1. sources holding `Absent` are ignored; if none remain the field is
//!    left out of every output;
//! 2. `ExplicitUnknown` never contributes a value or a conflict; a field
//!    with only unknowns is listed in [`Resolution::unknown`];
//! 3. when the informative sources agree, their value is canonical;
//! 4. when they disagree, the highest-priority source wins and a
//!    [`ConflictEntry`] records every informative source in priority order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use valadata_core::{
    CanonicalFactSet, ConflictEntry, ConflictLedger, FieldValue, NormalizedBag,
    ProvenanceSource, Resolution, ServiceField,
};

use crate::normalize::normalize;

/// Resolve normalized bags into canonical facts and conflicts.
///
/// Input order carries no meaning. When a source appears more than once,
/// the first bag for it is used.
pub fn resolve(inputs: &[(ProvenanceSource, NormalizedBag)]) -> Resolution {
    let mut by_source: BTreeMap<ProvenanceSource, &NormalizedBag> = BTreeMap::new();
    for (source, bag) in inputs {
        by_source.entry(*source).or_insert(bag);
    }

    let mut resolution = Resolution::default();
    for field in ServiceField::ALL {
        resolve_field(field, &by_source, &mut resolution);
    }

    tracing::debug!(
        sources = by_source.len(),
        canonical = resolution.canonical.len(),
        conflicts = resolution.conflicts.len(),
        "resolved facts"
    );
    resolution
}

fn resolve_field(
    field: ServiceField,
    by_source: &BTreeMap<ProvenanceSource, &NormalizedBag>,
    out: &mut Resolution,
) {
    // BTreeMap iteration is priority order.
    let mut informative: Vec<(ProvenanceSource, bool)> = Vec::new();
    let mut any_unknown = false;
    for (source, bag) in by_source {
        match bag.get(field) {
            FieldValue::Present(b) => informative.push((*source, b)),
            FieldValue::ExplicitUnknown => any_unknown = true,
            FieldValue::Absent => {}
        }
    }

    let Some(&(_, winner)) = informative.first() else {
        if any_unknown {
            out.unknown.insert(field);
        }
        return;
    };

    out.canonical.insert(field, winner);
    if informative.iter().any(|(_, b)| *b != winner) {
        out.conflicts.insert(
            field,
            ConflictEntry {
                sources: informative.iter().map(|(s, _)| *s).collect(),
                values: informative.into_iter().collect(),
            },
        );
    }
}

/// Normalize then resolve raw provider objects.
pub fn resolve_raw(inputs: &[(ProvenanceSource, &Value)]) -> Resolution {
    let bags: Vec<(ProvenanceSource, NormalizedBag)> = inputs
        .iter()
        .map(|(source, raw)| (*source, normalize(raw, *source)))
        .collect();
    resolve(&bags)
}

/// Service facts as served to API consumers.
///
/// `{ "facts": { "service": {...} }, "conflicts": { "service": {...} } }`.
/// Both inner objects are always present, empty when nothing resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFactsPayload {
    pub facts: ServiceSection<CanonicalFactSet>,
    pub conflicts: ServiceSection<ConflictLedger>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSection<T> {
    pub service: T,
}

impl ServiceFactsPayload {
    /// Build the payload from the three optional provider objects.
    pub fn build(primary: Option<&Value>, crawl: Option<&Value>, manual: Option<&Value>) -> Self {
        let inputs: Vec<(ProvenanceSource, &Value)> = [
            (ProvenanceSource::PrimaryApi, primary),
            (ProvenanceSource::Crawl, crawl),
            (ProvenanceSource::Manual, manual),
        ]
        .into_iter()
        .filter_map(|(source, raw)| raw.map(|r| (source, r)))
        .collect();
        Self::from_resolution(resolve_raw(&inputs))
    }

    pub fn from_resolution(resolution: Resolution) -> Self {
        Self {
            facts: ServiceSection {
                service: resolution.canonical,
            },
            conflicts: ServiceSection {
                service: resolution.conflicts,
            },
        }
    }
}
