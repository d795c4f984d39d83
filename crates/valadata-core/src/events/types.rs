//! Event payloads emitted by the batch driver.

use crate::types::EntityRef;

#[derive(Debug, Clone)]
pub struct BatchStartedEvent {
    pub total_entities: usize,
    pub composite_version: String,
    pub tag_version: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct EntityScoredEvent {
    pub entity: EntityRef,
    pub overall: Option<f64>,
    pub confidence: Option<f64>,
    pub conflict_count: usize,
}

#[derive(Debug, Clone)]
pub struct EntityFailedEvent {
    pub entity: EntityRef,
    pub error_code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct BatchCompleteEvent {
    pub ok: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}
