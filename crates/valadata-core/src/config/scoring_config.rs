//! Scoring configuration: which score versions a run targets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COMPOSITE_VERSION, DEFAULT_TAG_VERSION};

/// Configuration for the scoring subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Composite version written by a run. Default: "energy_v1".
    pub composite_version: Option<String>,
    /// Tag version written by a run. Default: "tags_v1".
    pub tag_version: Option<String>,
    /// Composite versions registered in addition to the built-in ones.
    #[serde(default)]
    pub extra_composite_versions: Vec<String>,
    /// Tag versions registered in addition to the built-in ones, mapped to
    /// the composite version each depends on.
    #[serde(default)]
    pub extra_tag_versions: BTreeMap<String, String>,
}

impl ScoringConfig {
    pub fn effective_composite_version(&self) -> &str {
        self.composite_version
            .as_deref()
            .unwrap_or(DEFAULT_COMPOSITE_VERSION)
    }

    pub fn effective_tag_version(&self) -> &str {
        self.tag_version.as_deref().unwrap_or(DEFAULT_TAG_VERSION)
    }
}
