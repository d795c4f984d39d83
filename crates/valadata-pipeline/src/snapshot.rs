//! Everything the driver knows about one venue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use valadata_core::{EntityRef, ProvenanceSource};
use valadata_engine::VenueText;

/// Raw provider objects plus the venue's text fields.
///
/// When `place_types` is empty, the `types` array of the primary provider
/// object is used instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity: EntityRef,
    #[serde(default)]
    pub sources: BTreeMap<ProvenanceSource, Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub about_copy: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub place_types: Vec<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl EntitySnapshot {
    pub fn new(entity: impl Into<EntityRef>) -> Self {
        Self {
            entity: entity.into(),
            sources: BTreeMap::new(),
            description: None,
            about_copy: None,
            category: None,
            place_types: Vec::new(),
            popularity: None,
        }
    }

    pub fn with_source(mut self, source: ProvenanceSource, raw: Value) -> Self {
        self.sources.insert(source, raw);
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Provider objects in priority order.
    pub fn provider_inputs(&self) -> Vec<(ProvenanceSource, &Value)> {
        self.sources.iter().map(|(s, v)| (*s, v)).collect()
    }

    pub fn effective_place_types(&self) -> Vec<String> {
        if !self.place_types.is_empty() {
            return self.place_types.clone();
        }
        self.sources
            .get(&ProvenanceSource::PrimaryApi)
            .and_then(|raw| raw.get("types"))
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn venue_text<'a>(&'a self, place_types: &'a [String]) -> VenueText<'a> {
        VenueText {
            description: self.description.as_deref(),
            about_copy: self.about_copy.as_deref(),
            category: self.category.as_deref(),
            place_types,
        }
    }
}
