//! Derived tag scorer.
//!
//! Each tag is a [`TagRule`] that sees only a [`TagContext`]: the venue's
//! about text, its raw signals and the composite it is scored against. No
//! rule can observe another rule's output.

pub mod rules;

use std::collections::BTreeMap;

use valadata_core::{CompositeScoreRecord, EntityRef, Tag, TagScoreRecord, TagVersion};

use crate::energy::round2;
use crate::signals::RawSignals;

pub use rules::{AfterWork, Cozy, DateNight, LateNight, Scene};

/// Inputs visible to a tag rule.
#[derive(Debug, Clone, Copy)]
pub struct TagContext<'a> {
    pub about_text: &'a str,
    pub signals: &'a RawSignals,
    /// Composite overall in [0, 100].
    pub energy: f64,
    pub confidence: f64,
}

/// Scores one tag.
pub trait TagRule: Send + Sync {
    fn tag(&self) -> Tag;

    /// Raw score; the caller clamps to [0, 1] and rounds.
    fn score(&self, ctx: &TagContext<'_>) -> f64;
}

/// Rules for the current tag set, one per [`Tag`].
pub static RULES: [&dyn TagRule; 5] = [&Cozy, &DateNight, &LateNight, &AfterWork, &Scene];

/// Score every tag for `entity` against `composite`.
pub fn compute(
    entity: &EntityRef,
    version: &TagVersion,
    signals: &RawSignals,
    composite: &CompositeScoreRecord,
) -> TagScoreRecord {
    compute_with(entity, version, signals, composite.overall, composite.confidence)
        .depending_on(composite.version.as_str())
}

/// Partially built record; the composite dependency is attached last.
pub struct PendingTags {
    entity: EntityRef,
    version: TagVersion,
    scores: BTreeMap<Tag, f64>,
    confidence: f64,
}

impl PendingTags {
    pub fn depending_on(self, composite_version: &str) -> TagScoreRecord {
        TagScoreRecord {
            entity: self.entity,
            version: self.version,
            scores: self.scores,
            confidence: self.confidence,
            depends_on_composite_version: composite_version.to_string(),
        }
    }
}

/// Score every tag from an explicit energy and confidence.
///
/// Used when no composite record is available.
pub fn compute_with(
    entity: &EntityRef,
    version: &TagVersion,
    signals: &RawSignals,
    energy: f64,
    confidence: f64,
) -> PendingTags {
    let ctx = TagContext {
        about_text: &signals.about_text,
        signals,
        energy: if energy.is_finite() { energy.clamp(0.0, 100.0) } else { 0.0 },
        confidence,
    };
    let scores = RULES
        .iter()
        .map(|rule| (rule.tag(), finish(rule.score(&ctx))))
        .collect();
    tracing::debug!(entity = %entity, version = %version, "computed tags");
    PendingTags {
        entity: entity.clone(),
        version: version.clone(),
        scores,
        confidence,
    }
}

fn finish(raw: f64) -> f64 {
    if raw.is_finite() {
        round2(raw.clamp(0.0, 1.0))
    } else {
        0.0
    }
}
