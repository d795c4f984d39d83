//! Composite and tag score records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityRef;
use crate::version::{CompositeVersion, TagVersion};

/// The four fixed composite sub-signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentName {
    Popularity,
    Language,
    Flags,
    Sensory,
}

impl ComponentName {
    pub const ALL: [ComponentName; 4] =
        [Self::Popularity, Self::Language, Self::Flags, Self::Sensory];

    pub fn name(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Language => "language",
            Self::Flags => "flags",
            Self::Sensory => "sensory",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Echo of one component input, so a stored record is self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentReading {
    /// The input as supplied. Out-of-range values are echoed unclamped.
    pub value: Option<f64>,
    pub present: bool,
}

impl ComponentReading {
    pub fn present(value: f64) -> Self {
        Self {
            value: Some(value),
            present: true,
        }
    }

    pub fn absent() -> Self {
        Self {
            value: None,
            present: false,
        }
    }
}

/// Composite ("energy") score for one (entity, version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScoreRecord {
    pub entity: EntityRef,
    pub version: CompositeVersion,
    /// In [0, 100].
    pub overall: f64,
    /// In [0, 1].
    pub confidence: f64,
    /// One reading per [`ComponentName`].
    pub components: BTreeMap<ComponentName, ComponentReading>,
}

impl CompositeScoreRecord {
    pub fn component(&self, name: ComponentName) -> ComponentReading {
        self.components
            .get(&name)
            .copied()
            .unwrap_or_else(ComponentReading::absent)
    }
}

/// Categorical tags scored from the same raw signals plus a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Cozy,
    DateNight,
    LateNight,
    AfterWork,
    Scene,
}

impl Tag {
    pub const ALL: [Tag; 5] = [
        Self::Cozy,
        Self::DateNight,
        Self::LateNight,
        Self::AfterWork,
        Self::Scene,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cozy => "cozy",
            Self::DateNight => "date_night",
            Self::LateNight => "late_night",
            Self::AfterWork => "after_work",
            Self::Scene => "scene",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag scores for one (entity, version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagScoreRecord {
    pub entity: EntityRef,
    pub version: TagVersion,
    /// Each in [0, 1].
    pub scores: BTreeMap<Tag, f64>,
    /// Confidence of the composite record the tags were computed against.
    pub confidence: f64,
    /// Composite version string used, verbatim.
    pub depends_on_composite_version: String,
}

impl TagScoreRecord {
    pub fn score(&self, tag: Tag) -> Option<f64> {
        self.scores.get(&tag).copied()
    }

    /// True when this row was computed against a composite version other
    /// than `current`.
    pub fn is_stale_against(&self, current: &CompositeVersion) -> bool {
        self.depends_on_composite_version != current.as_str()
    }
}

/// A record as held by a store, with the time the store wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord<T> {
    pub record: T,
    /// RFC 3339 timestamp assigned by the store.
    pub computed_at: String,
}
