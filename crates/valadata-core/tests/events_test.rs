//! Event dispatcher and error code tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use valadata_core::errors::{
    ConfigError, PipelineError, StorageError, ValadataErrorCode, VersionError,
};
use valadata_core::events::{
    BatchStartedEvent, EntityScoredEvent, EventDispatcher, PipelineEventHandler,
};
use valadata_core::EntityRef;

#[derive(Default)]
struct Counter {
    started: AtomicUsize,
    scored: AtomicUsize,
}

impl PipelineEventHandler for Counter {
    fn on_batch_started(&self, _: &BatchStartedEvent) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }
    fn on_entity_scored(&self, _: &EntityScoredEvent) {
        self.scored.fetch_add(1, Ordering::SeqCst);
    }
}

/// Relies on the no-op defaults.
struct Silent;
impl PipelineEventHandler for Silent {}

#[test]
fn dispatcher_fans_out_to_every_handler() {
    let a = Arc::new(Counter::default());
    let b = Arc::new(Counter::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());
    dispatcher.register(Arc::new(Silent));
    assert_eq!(dispatcher.handler_count(), 3);

    dispatcher.emit_batch_started(&BatchStartedEvent {
        total_entities: 2,
        composite_version: "energy_v1".to_string(),
        tag_version: None,
        dry_run: true,
    });
    dispatcher.emit_entity_scored(&EntityScoredEvent {
        entity: EntityRef::new("v"),
        overall: Some(40.0),
        confidence: Some(0.3),
        conflict_count: 0,
    });

    for c in [&a, &b] {
        assert_eq!(c.started.load(Ordering::SeqCst), 1);
        assert_eq!(c.scored.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn empty_dispatcher_is_fine() {
    let dispatcher = EventDispatcher::new();
    dispatcher.emit_entity_scored(&EntityScoredEvent {
        entity: EntityRef::new("v"),
        overall: None,
        confidence: None,
        conflict_count: 0,
    });
    assert_eq!(format!("{dispatcher:?}"), "EventDispatcher { handlers: 0 }");
}

#[test]
fn pipeline_errors_keep_subsystem_codes() {
    let storage: PipelineError = StorageError::SqliteError {
        message: "locked".to_string(),
    }
    .into();
    assert_eq!(storage.error_code(), "STORAGE_ERROR");

    let version: PipelineError = VersionError::Unknown {
        kind: "tag",
        version: "tags_v9".to_string(),
    }
    .into();
    assert_eq!(version.error_code(), "VERSION_ERROR");

    let config: PipelineError = ConfigError::ValidationFailed {
        field: "pipeline.threads".to_string(),
        message: "must be greater than 0".to_string(),
    }
    .into();
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let missing = PipelineError::EntityNotFound {
        entity: "ghost".to_string(),
    };
    assert_eq!(missing.coded_string(), "[ENTITY_NOT_FOUND] Entity not found: ghost");
}
