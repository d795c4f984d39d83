//! Derived tag scorer.

use std::collections::BTreeMap;

use valadata_core::{
    CompositeScoreRecord, CompositeVersion, EntityRef, Tag, TagVersion, VersionRegistry,
};
use valadata_engine::signals::RawSignals;
use valadata_engine::tags::{self, TagContext, RULES};

fn versions() -> (CompositeVersion, TagVersion) {
    let registry = VersionRegistry::default();
    (
        registry.composite("energy_v1").unwrap(),
        registry.tag("tags_v1").unwrap(),
    )
}

fn composite(overall: f64, confidence: f64) -> CompositeScoreRecord {
    CompositeScoreRecord {
        entity: EntityRef::new("venue-1"),
        version: versions().0,
        overall,
        confidence,
        components: BTreeMap::new(),
    }
}

fn signals(text: &str) -> RawSignals {
    RawSignals {
        about_text: text.to_string(),
        ..Default::default()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn scores_at_moderate_energy_without_text() {
    let (_, tag_version) = versions();
    let record = tags::compute(
        &EntityRef::new("venue-1"),
        &tag_version,
        &signals(""),
        &composite(50.0, 0.48),
    );
    assert!(approx(record.score(Tag::Cozy).unwrap(), 0.35));
    assert!(approx(record.score(Tag::DateNight).unwrap(), 0.56));
    assert!(approx(record.score(Tag::LateNight).unwrap(), 0.3));
    assert!(approx(record.score(Tag::AfterWork).unwrap(), 0.36));
    assert!(approx(record.score(Tag::Scene).unwrap(), 0.35));
    assert_eq!(record.confidence, 0.48);
}

#[test]
fn romantic_language_lifts_date_night_and_cozy() {
    let (_, tag_version) = versions();
    let record = tags::compute(
        &EntityRef::new("venue-1"),
        &tag_version,
        &signals("Romantic and candlelit, made for date night"),
        &composite(50.0, 0.3),
    );
    // 0.6 × 0.9375 + 3 × 0.08
    assert!(approx(record.score(Tag::DateNight).unwrap(), 0.8));
    // 0.35 + 2 × 0.05 + 0.1
    assert!(approx(record.score(Tag::Cozy).unwrap(), 0.55));
}

#[test]
fn cozy_counts_terms_shared_with_low_energy_list_twice() {
    let (_, tag_version) = versions();
    let record = tags::compute(
        &EntityRef::new("venue-1"),
        &tag_version,
        &signals("A quiet, intimate spot"),
        &composite(50.0, 0.3),
    );
    // 0.35 + 4 × 0.05 + 0.1
    assert!(approx(record.score(Tag::Cozy).unwrap(), 0.65));
}

#[test]
fn scores_are_clamped_to_one() {
    let (_, tag_version) = versions();
    let record = tags::compute(
        &EntityRef::new("venue-1"),
        &tag_version,
        &signals("quiet calm intimate hushed peaceful relaxed serene cozy nook"),
        &composite(0.0, 0.3),
    );
    assert_eq!(record.score(Tag::Cozy), Some(1.0));
    assert!(record.scores.values().all(|s| (0.0..=1.0).contains(s)));
}

#[test]
fn late_night_override_replaces_energy() {
    let (_, tag_version) = versions();
    let record = tags::compute(
        &EntityRef::new("venue-1"),
        &tag_version,
        &signals("").with_late_night_energy(100.0),
        &composite(0.0, 0.0),
    );
    assert!(approx(record.score(Tag::LateNight).unwrap(), 0.6));
    assert_eq!(record.score(Tag::Scene), Some(0.0));
}

#[test]
fn dependency_echoes_composite_version_verbatim() {
    let mut registry = VersionRegistry::default();
    registry.register_composite("energy_v2-beta.1").unwrap();
    let composite_version = registry.composite("energy_v2-beta.1").unwrap();
    let (_, tag_version) = versions();

    let mut record = composite(60.0, 0.5);
    record.version = composite_version;
    let tags = tags::compute(&record.entity, &tag_version, &signals(""), &record);
    assert_eq!(tags.depends_on_composite_version, "energy_v2-beta.1");
    assert_eq!(tags.version.as_str(), "tags_v1");
}

#[test]
fn every_tag_has_exactly_one_rule() {
    let covered: Vec<Tag> = RULES.iter().map(|r| r.tag()).collect();
    assert_eq!(covered, Tag::ALL.to_vec());
}

#[test]
fn rules_score_from_context_alone() {
    let sig = signals("packed, loud scene with a dj");
    let ctx = TagContext {
        about_text: &sig.about_text,
        signals: &sig,
        energy: 80.0,
        confidence: 0.3,
    };
    let (_, tag_version) = versions();
    let record = tags::compute(&EntityRef::new("v"), &tag_version, &sig, &composite(80.0, 0.3));
    for rule in RULES.iter() {
        let alone = (rule.score(&ctx).clamp(0.0, 1.0) * 100.0).round() / 100.0;
        assert_eq!(record.score(rule.tag()), Some(alone));
    }
}

#[test]
fn neutral_fallback_for_missing_composite() {
    let (_, tag_version) = versions();
    let record = tags::compute_with(&EntityRef::new("v"), &tag_version, &signals(""), 50.0, 0.5)
        .depending_on("energy_v1");
    assert_eq!(record.confidence, 0.5);
    assert_eq!(record.depends_on_composite_version, "energy_v1");
    assert_eq!(record.scores.len(), 5);
}
