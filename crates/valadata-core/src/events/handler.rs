//! PipelineEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing batch runs.
///
/// Handlers override only the events they care about. `Send + Sync` is
/// required because entities are processed on a worker pool.
pub trait PipelineEventHandler: Send + Sync {
    fn on_batch_started(&self, _event: &BatchStartedEvent) {}
    fn on_entity_scored(&self, _event: &EntityScoredEvent) {}
    fn on_entity_failed(&self, _event: &EntityFailedEvent) {}
    fn on_batch_complete(&self, _event: &BatchCompleteEvent) {}
}
