//! Batch outcome tally.

use serde::{Deserialize, Serialize};

/// `{ ok, failed, skipped }` plus the reason for each failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub ok: usize,
    pub failed: usize,
    pub skipped: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<EntityFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFailure {
    pub entity: String,
    pub code: String,
    pub message: String,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.ok + self.failed + self.skipped
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
