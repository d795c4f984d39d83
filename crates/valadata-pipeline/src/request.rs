//! What a batch run should do.

use std::time::Duration;

use valadata_core::errors::PipelineError;
use valadata_core::{CompositeVersion, EntityRef, TagVersion, ValadataConfig, VersionRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchTarget {
    One(EntityRef),
    Many(Vec<EntityRef>),
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// Composite, then tags from the fresh composite.
    #[default]
    Full,
    /// Composite only.
    EnergyOnly,
    /// Tags only, from the stored composite for the composite version.
    TagsOnly,
}

impl BatchMode {
    pub fn writes_composite(self) -> bool {
        !matches!(self, Self::TagsOnly)
    }

    pub fn writes_tags(self) -> bool {
        !matches!(self, Self::EnergyOnly)
    }
}

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub target: BatchTarget,
    pub mode: BatchMode,
    pub composite_version: CompositeVersion,
    pub tag_version: TagVersion,
    pub dry_run: bool,
    /// Entities not started within this budget are skipped.
    pub deadline: Option<Duration>,
}

impl BatchRequest {
    pub fn new(target: BatchTarget, composite_version: CompositeVersion, tag_version: TagVersion) -> Self {
        Self {
            target,
            mode: BatchMode::Full,
            composite_version,
            tag_version,
            dry_run: false,
            deadline: None,
        }
    }

    /// Build a request from resolved config. Versions are checked against
    /// `registry`.
    pub fn from_config(
        config: &ValadataConfig,
        registry: &VersionRegistry,
        target: BatchTarget,
        mode: BatchMode,
    ) -> Result<Self, PipelineError> {
        let composite_version = registry.composite(config.scoring.effective_composite_version())?;
        let tag_version = registry.tag(config.scoring.effective_tag_version())?;
        if let Some(declared) = registry.declared_dependency(&tag_version) {
            if declared != composite_version && mode.writes_tags() {
                tracing::warn!(
                    tag_version = %tag_version,
                    declared = %declared,
                    composite_version = %composite_version,
                    "tag version declares a different composite version"
                );
            }
        }
        Ok(Self {
            target,
            mode,
            composite_version,
            tag_version,
            dry_run: config.pipeline.effective_dry_run(),
            deadline: config.pipeline.effective_deadline(),
        })
    }

    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}
