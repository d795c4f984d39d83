//! Fan-out of pipeline events to registered handlers.

use std::sync::Arc;

use super::handler::PipelineEventHandler;
use super::types::*;

/// Synchronous dispatcher. Emitting with no handlers registered is free.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn PipelineEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn PipelineEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn emit_batch_started(&self, event: &BatchStartedEvent) {
        for h in &self.handlers {
            h.on_batch_started(event);
        }
    }

    pub fn emit_entity_scored(&self, event: &EntityScoredEvent) {
        for h in &self.handlers {
            h.on_entity_scored(event);
        }
    }

    pub fn emit_entity_failed(&self, event: &EntityFailedEvent) {
        for h in &self.handlers {
            h.on_entity_failed(event);
        }
    }

    pub fn emit_batch_complete(&self, event: &BatchCompleteEvent) {
        for h in &self.handlers {
            h.on_batch_complete(event);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
