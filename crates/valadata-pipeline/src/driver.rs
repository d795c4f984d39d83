//! The batch driver.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use valadata_core::errors::{PipelineError, ValadataErrorCode};
use valadata_core::events::{
    BatchCompleteEvent, BatchStartedEvent, EntityFailedEvent, EntityScoredEvent, EventDispatcher,
};
use valadata_core::traits::{Cancellable, CancellationToken, ScoreStore};
use valadata_core::{CompositeScoreRecord, EntityRef, TagScoreRecord};
use valadata_engine::{energy, resolve_raw, tags, RawSignals};

use crate::provider::EntityProvider;
use crate::report::{BatchReport, EntityFailure};
use crate::request::{BatchMode, BatchRequest, BatchTarget};

/// Composite overall assumed by a tags-only run when no composite record
/// is stored for the entity.
pub const TAGS_ONLY_FALLBACK_OVERALL: f64 = 50.0;
pub const TAGS_ONLY_FALLBACK_CONFIDENCE: f64 = 0.5;

/// What one entity produced.
#[derive(Debug, Clone)]
pub struct EntityScores {
    pub composite: Option<CompositeScoreRecord>,
    pub tags: Option<TagScoreRecord>,
    pub conflict_count: usize,
}

enum Outcome {
    Scored,
    Failed(EntityFailure),
    Skipped,
}

pub struct BatchDriver {
    provider: Arc<dyn EntityProvider>,
    store: Arc<dyn ScoreStore>,
    dispatcher: EventDispatcher,
    threads: usize,
    cancel: CancellationToken,
}

impl BatchDriver {
    pub fn new(provider: Arc<dyn EntityProvider>, store: Arc<dyn ScoreStore>) -> Self {
        Self {
            provider,
            store,
            dispatcher: EventDispatcher::new(),
            threads: valadata_core::constants::DEFAULT_PIPELINE_THREADS,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.clamp(1, valadata_core::constants::MAX_PIPELINE_THREADS);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Shares state with the driver: cancelling it stops the batch from
    /// starting further entities.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run a batch. Per-entity failures are tallied in the report; only a
    /// failure to enumerate the target or start workers is an `Err`.
    pub fn run(&self, request: &BatchRequest) -> Result<BatchReport, PipelineError> {
        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let entities = self.target_entities(&request.target)?;
        let started = Instant::now();

        tracing::info!(
            engine = valadata_core::constants::VERSION,
            entities = entities.len(),
            composite_version = %request.composite_version,
            tag_version = %request.tag_version,
            mode = ?request.mode,
            dry_run = request.dry_run,
            threads = self.threads,
            "batch started"
        );
        self.dispatcher.emit_batch_started(&BatchStartedEvent {
            total_entities: entities.len(),
            composite_version: request.composite_version.to_string(),
            tag_version: request
                .mode
                .writes_tags()
                .then(|| request.tag_version.to_string()),
            dry_run: request.dry_run,
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| PipelineError::WorkerPool {
                message: e.to_string(),
            })?;

        let outcomes: Vec<Outcome> = pool.install(|| {
            entities
                .par_iter()
                .map(|entity| self.process(request, entity, started))
                .collect()
        });

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Scored => report.ok += 1,
                Outcome::Failed(failure) => {
                    report.failed += 1;
                    report.failures.push(failure);
                }
                Outcome::Skipped => report.skipped += 1,
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            ok = report.ok,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms,
            "batch complete"
        );
        self.dispatcher.emit_batch_complete(&BatchCompleteEvent {
            ok: report.ok,
            failed: report.failed,
            skipped: report.skipped,
            duration_ms,
        });
        Ok(report)
    }

    fn target_entities(&self, target: &BatchTarget) -> Result<Vec<EntityRef>, PipelineError> {
        Ok(match target {
            BatchTarget::One(entity) => vec![entity.clone()],
            BatchTarget::Many(entities) => {
                let mut unique: Vec<EntityRef> = Vec::with_capacity(entities.len());
                for entity in entities {
                    if !unique.contains(entity) {
                        unique.push(entity.clone());
                    }
                }
                unique
            }
            BatchTarget::All => self.provider.all_entities()?,
        })
    }

    fn process(&self, request: &BatchRequest, entity: &EntityRef, started: Instant) -> Outcome {
        if self.cancel.is_cancelled() {
            return Outcome::Skipped;
        }
        if let Some(deadline) = request.deadline {
            if started.elapsed() >= deadline {
                return Outcome::Skipped;
            }
        }

        match self.score_entity(request, entity) {
            Ok(scores) => {
                self.dispatcher.emit_entity_scored(&EntityScoredEvent {
                    entity: entity.clone(),
                    overall: scores.composite.as_ref().map(|c| c.overall),
                    confidence: scores.composite.as_ref().map(|c| c.confidence),
                    conflict_count: scores.conflict_count,
                });
                Outcome::Scored
            }
            Err(e) => {
                tracing::warn!(entity = %entity, error = %e, "entity failed");
                self.dispatcher.emit_entity_failed(&EntityFailedEvent {
                    entity: entity.clone(),
                    error_code: e.error_code(),
                    message: e.to_string(),
                });
                Outcome::Failed(EntityFailure {
                    entity: entity.to_string(),
                    code: e.error_code().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Score one entity and, unless the request is a dry run, store the
    /// records the request's mode produces.
    pub fn score_entity(
        &self,
        request: &BatchRequest,
        entity: &EntityRef,
    ) -> Result<EntityScores, PipelineError> {
        let snapshot = self
            .provider
            .entity(entity)?
            .ok_or_else(|| PipelineError::EntityNotFound {
                entity: entity.to_string(),
            })?;

        let resolution = resolve_raw(&snapshot.provider_inputs());
        let place_types = snapshot.effective_place_types();
        let signals = RawSignals::extract(
            &snapshot.venue_text(&place_types),
            &resolution.canonical,
            snapshot.popularity,
        );

        let composite = match request.mode {
            BatchMode::Full | BatchMode::EnergyOnly => {
                let components = energy::derive(&signals);
                let record = energy::compute_record(entity, &request.composite_version, &components);
                if !request.dry_run {
                    self.store.upsert_composite(&record)?;
                }
                Some(record)
            }
            BatchMode::TagsOnly => None,
        };

        let tags = match (request.mode, &composite) {
            (BatchMode::EnergyOnly, _) => None,
            (_, Some(record)) => Some(tags::compute(entity, &request.tag_version, &signals, record)),
            (_, None) => Some(self.tags_from_stored(request, entity, &signals)?),
        };
        if let (Some(record), false) = (&tags, request.dry_run) {
            self.store.upsert_tags(record)?;
        }

        Ok(EntityScores {
            composite,
            tags,
            conflict_count: resolution.conflicts.len(),
        })
    }

    fn tags_from_stored(
        &self,
        request: &BatchRequest,
        entity: &EntityRef,
        signals: &RawSignals,
    ) -> Result<TagScoreRecord, PipelineError> {
        match self.store.get_composite(entity, &request.composite_version)? {
            Some(stored) => Ok(tags::compute(entity, &request.tag_version, signals, &stored.record)),
            None => {
                tracing::debug!(entity = %entity, "no stored composite; using fallback");
                Ok(tags::compute_with(
                    entity,
                    &request.tag_version,
                    signals,
                    TAGS_ONLY_FALLBACK_OVERALL,
                    TAGS_ONLY_FALLBACK_CONFIDENCE,
                )
                .depending_on(request.composite_version.as_str()))
            }
        }
    }
}
