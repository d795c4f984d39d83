//! Batch driver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PIPELINE_THREADS, MAX_PIPELINE_THREADS};

/// Configuration for the batch driver.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads. Default: 4, capped at 64.
    pub threads: Option<usize>,
    /// Wall-clock budget for a batch in seconds. Entities not started
    /// before the budget runs out are skipped. Default: unbounded.
    pub deadline_secs: Option<u64>,
    /// Compute without writing. Default: false.
    pub dry_run: Option<bool>,
}

impl PipelineConfig {
    pub fn effective_threads(&self) -> usize {
        self.threads
            .unwrap_or(DEFAULT_PIPELINE_THREADS)
            .clamp(1, MAX_PIPELINE_THREADS)
    }

    pub fn effective_deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn effective_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }
}
