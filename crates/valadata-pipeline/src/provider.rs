//! Where entity snapshots come from.

use std::collections::BTreeMap;
use std::path::Path;

use valadata_core::errors::PipelineError;
use valadata_core::EntityRef;

use crate::snapshot::EntitySnapshot;

/// Supplies snapshots to the batch driver.
pub trait EntityProvider: Send + Sync {
    /// `Ok(None)` when the entity is unknown.
    fn entity(&self, entity: &EntityRef) -> Result<Option<EntitySnapshot>, PipelineError>;

    /// Every known entity, in a stable order.
    fn all_entities(&self) -> Result<Vec<EntityRef>, PipelineError>;
}

/// Snapshots held in memory, keyed by entity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    snapshots: BTreeMap<EntityRef, EntitySnapshot>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later snapshots for the same entity replace earlier ones.
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = EntitySnapshot>) -> Self {
        let snapshots = snapshots
            .into_iter()
            .map(|s| (s.entity.clone(), s))
            .collect();
        Self { snapshots }
    }

    /// Parse a JSON array of snapshots.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let snapshots: Vec<EntitySnapshot> =
            serde_json::from_str(json).map_err(|e| PipelineError::Provider {
                message: format!("invalid snapshot JSON: {e}"),
            })?;
        Ok(Self::from_snapshots(snapshots))
    }

    pub fn load_json(path: &Path) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path).map_err(|e| PipelineError::Provider {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, snapshot: EntitySnapshot) {
        self.snapshots.insert(snapshot.entity.clone(), snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl EntityProvider for InMemoryProvider {
    fn entity(&self, entity: &EntityRef) -> Result<Option<EntitySnapshot>, PipelineError> {
        Ok(self.snapshots.get(entity).cloned())
    }

    fn all_entities(&self) -> Result<Vec<EntityRef>, PipelineError> {
        Ok(self.snapshots.keys().cloned().collect())
    }
}
