//! Batch driver: tally, modes, dry run, cancellation, events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use valadata_core::errors::{PipelineError, StorageError};
use valadata_core::events::{
    BatchCompleteEvent, EntityFailedEvent, EntityScoredEvent, EventDispatcher,
    PipelineEventHandler,
};
use valadata_core::traits::{Cancellable, ScoreStore};
use valadata_core::{
    CompositeScoreRecord, CompositeVersion, EntityRef, ProvenanceSource, StoredRecord, Tag,
    TagScoreRecord, TagVersion, VersionRegistry,
};
use valadata_pipeline::driver::{TAGS_ONLY_FALLBACK_CONFIDENCE, TAGS_ONLY_FALLBACK_OVERALL};
use valadata_pipeline::{
    BatchDriver, BatchMode, BatchRequest, BatchTarget, EntitySnapshot, InMemoryProvider,
};
use valadata_storage::InMemoryScoreStore;

fn versions() -> (CompositeVersion, TagVersion) {
    let registry = VersionRegistry::default();
    (
        registry.composite("energy_v1").unwrap(),
        registry.tag("tags_v1").unwrap(),
    )
}

fn request(target: BatchTarget) -> BatchRequest {
    let (c, t) = versions();
    BatchRequest::new(target, c, t)
}

fn venues() -> InMemoryProvider {
    InMemoryProvider::from_snapshots([
        EntitySnapshot::new("bar-1")
            .with_source(
                ProvenanceSource::PrimaryApi,
                json!({ "liveMusic": true, "takeout": true, "types": ["bar"] }),
            )
            .with_source(ProvenanceSource::Crawl, json!({ "take_out": false }))
            .with_description("Loud and packed, with a DJ every night"),
        EntitySnapshot::new("cafe-2")
            .with_source(ProvenanceSource::PrimaryApi, json!({ "dineIn": true }))
            .with_description("A quiet, candlelit nook")
            .with_category("Restaurant"),
        EntitySnapshot::new("empty-3"),
    ])
}

fn driver(store: Arc<dyn ScoreStore>) -> BatchDriver {
    BatchDriver::new(Arc::new(venues()), store).with_threads(2)
}

// ── Tally ──────────────────────────────────────────────────────────────────

#[test]
fn full_run_scores_every_entity() {
    let store = Arc::new(InMemoryScoreStore::new());
    let report = driver(store.clone()).run(&request(BatchTarget::All)).unwrap();

    assert_eq!(report.ok, 3);
    assert_eq!(report.failed, 0);
    assert!(report.is_clean());

    let (c, t) = versions();
    assert_eq!(store.count_composite(&c).unwrap(), 3);
    assert_eq!(store.count_tags(&t).unwrap(), 3);

    let bar = store
        .get_composite(&EntityRef::new("bar-1"), &c)
        .unwrap()
        .unwrap()
        .record;
    let cafe = store
        .get_composite(&EntityRef::new("cafe-2"), &c)
        .unwrap()
        .unwrap()
        .record;
    assert!(bar.overall > cafe.overall);

    let empty = store
        .get_composite(&EntityRef::new("empty-3"), &c)
        .unwrap()
        .unwrap()
        .record;
    assert_eq!(empty.overall, 0.0);
    assert_eq!(empty.confidence, 0.0);
}

#[test]
fn missing_entities_fail_without_aborting() {
    let store = Arc::new(InMemoryScoreStore::new());
    let target = BatchTarget::Many(vec![
        EntityRef::new("bar-1"),
        EntityRef::new("ghost"),
        EntityRef::new("bar-1"),
    ]);
    let report = driver(store).run(&request(target)).unwrap();

    assert_eq!(report.ok, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].entity, "ghost");
    assert_eq!(report.failures[0].code, "ENTITY_NOT_FOUND");
}

struct FailingStore;

impl ScoreStore for FailingStore {
    fn upsert_composite(&self, _: &CompositeScoreRecord) -> Result<(), StorageError> {
        Err(StorageError::SqliteError {
            message: "disk full".to_string(),
        })
    }
    fn get_composite(
        &self,
        _: &EntityRef,
        _: &CompositeVersion,
    ) -> Result<Option<StoredRecord<CompositeScoreRecord>>, StorageError> {
        Ok(None)
    }
    fn count_composite(&self, _: &CompositeVersion) -> Result<usize, StorageError> {
        Ok(0)
    }
    fn upsert_tags(&self, _: &TagScoreRecord) -> Result<(), StorageError> {
        Ok(())
    }
    fn get_tags(
        &self,
        _: &EntityRef,
        _: &TagVersion,
    ) -> Result<Option<StoredRecord<TagScoreRecord>>, StorageError> {
        Ok(None)
    }
    fn count_tags(&self, _: &TagVersion) -> Result<usize, StorageError> {
        Ok(0)
    }
}

#[test]
fn store_errors_are_counted_per_entity() {
    let report = driver(Arc::new(FailingStore))
        .run(&request(BatchTarget::All))
        .unwrap();
    assert_eq!(report.ok, 0);
    assert_eq!(report.failed, 3);
    assert!(report.failures.iter().all(|f| f.code == "STORAGE_ERROR"));
}

// ── Modes ──────────────────────────────────────────────────────────────────

#[test]
fn dry_run_writes_nothing() {
    let store = Arc::new(InMemoryScoreStore::new());
    let report = driver(store.clone())
        .run(&request(BatchTarget::All).dry_run(true))
        .unwrap();
    assert_eq!(report.ok, 3);

    let (c, t) = versions();
    assert_eq!(store.count_composite(&c).unwrap(), 0);
    assert_eq!(store.count_tags(&t).unwrap(), 0);
}

#[test]
fn energy_only_writes_no_tags() {
    let store = Arc::new(InMemoryScoreStore::new());
    driver(store.clone())
        .run(&request(BatchTarget::All).with_mode(BatchMode::EnergyOnly))
        .unwrap();
    let (c, t) = versions();
    assert_eq!(store.count_composite(&c).unwrap(), 3);
    assert_eq!(store.count_tags(&t).unwrap(), 0);
}

#[test]
fn tags_only_reads_stored_composite() {
    let store = Arc::new(InMemoryScoreStore::new());
    let d = driver(store.clone());
    d.run(&request(BatchTarget::One(EntityRef::new("bar-1"))).with_mode(BatchMode::EnergyOnly))
        .unwrap();

    let report = d
        .run(&request(BatchTarget::One(EntityRef::new("bar-1"))).with_mode(BatchMode::TagsOnly))
        .unwrap();
    assert_eq!(report.ok, 1);

    let (c, t) = versions();
    let composite = store
        .get_composite(&EntityRef::new("bar-1"), &c)
        .unwrap()
        .unwrap()
        .record;
    let tags = store
        .get_tags(&EntityRef::new("bar-1"), &t)
        .unwrap()
        .unwrap()
        .record;
    assert_eq!(tags.confidence, composite.confidence);
    assert_eq!(tags.depends_on_composite_version, "energy_v1");
}

#[test]
fn tags_only_without_composite_uses_fallback() {
    let store = Arc::new(InMemoryScoreStore::new());
    driver(store.clone())
        .run(&request(BatchTarget::One(EntityRef::new("empty-3"))).with_mode(BatchMode::TagsOnly))
        .unwrap();

    let (c, t) = versions();
    assert_eq!(store.count_composite(&c).unwrap(), 0);
    let tags = store
        .get_tags(&EntityRef::new("empty-3"), &t)
        .unwrap()
        .unwrap()
        .record;
    assert_eq!(tags.confidence, TAGS_ONLY_FALLBACK_CONFIDENCE);
    // Scene at E = 50 with no text: 0.7 × 0.5
    let expected_scene = 0.7 * TAGS_ONLY_FALLBACK_OVERALL / 100.0;
    assert!((tags.score(Tag::Scene).unwrap() - expected_scene).abs() < 1e-9);
}

#[test]
fn score_entity_reports_conflicts() {
    let store = Arc::new(InMemoryScoreStore::new());
    let scores = driver(store)
        .score_entity(&request(BatchTarget::All).dry_run(true), &EntityRef::new("bar-1"))
        .unwrap();
    // takeout: PRIMARY_API true vs CRAWL false
    assert_eq!(scores.conflict_count, 1);
    let composite = scores.composite.unwrap();
    assert!(composite.component(valadata_core::ComponentName::Flags).present);
}

// ── Cancellation & deadline ────────────────────────────────────────────────

#[test]
fn cancelled_driver_refuses_to_start() {
    let d = driver(Arc::new(InMemoryScoreStore::new()));
    d.cancellation_token().cancel();
    assert!(matches!(
        d.run(&request(BatchTarget::All)),
        Err(PipelineError::Cancelled)
    ));
}

#[test]
fn expired_deadline_skips_remaining_entities() {
    let store = Arc::new(InMemoryScoreStore::new());
    let report = driver(store.clone())
        .run(&request(BatchTarget::All).with_deadline(Duration::ZERO))
        .unwrap();
    assert_eq!(report.skipped, 3);
    assert_eq!(report.ok, 0);
    assert_eq!(report.total(), 3);
}

// ── Events ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    scored: AtomicUsize,
    failed: AtomicUsize,
    complete: Mutex<Option<(usize, usize)>>,
}

impl PipelineEventHandler for Recorder {
    fn on_entity_scored(&self, _: &EntityScoredEvent) {
        self.scored.fetch_add(1, Ordering::SeqCst);
    }
    fn on_entity_failed(&self, _: &EntityFailedEvent) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
    fn on_batch_complete(&self, event: &BatchCompleteEvent) {
        *self.complete.lock().unwrap() = Some((event.ok, event.failed));
    }
}

#[test]
fn events_reach_registered_handlers() {
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());

    let target = BatchTarget::Many(vec![EntityRef::new("cafe-2"), EntityRef::new("ghost")]);
    driver(Arc::new(InMemoryScoreStore::new()))
        .with_dispatcher(dispatcher)
        .run(&request(target))
        .unwrap();

    assert_eq!(recorder.scored.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.failed.load(Ordering::SeqCst), 1);
    assert_eq!(*recorder.complete.lock().unwrap(), Some((1, 1)));
}
