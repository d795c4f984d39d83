//! Composite ("energy") score.
//!
//! Four optional components, each bounded by a [`Cap`], are combined into an
//! `overall` score in [0, 100] and a coverage `confidence` in [0, 1].
//!
//! Each present component is scaled by its cap maximum, so a component at
//! its maximum contributes 1.0 and negative values subtract. The base
//! weights of the present components are renormalized to sum to 1, which
//! keeps a partial signal set on the same scale as a complete one.
//! Confidence is the base-weight mass of the present components, so adding
//! a component never lowers it.

pub mod components;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use valadata_core::{
    ComponentName, ComponentReading, CompositeScoreRecord, CompositeVersion, EntityRef,
};

pub use components::{derive, EnergyComponents};

/// `overall` when no component is present.
pub const NEUTRAL_OVERALL: f64 = 0.0;
/// `confidence` when no component is present.
pub const NEUTRAL_CONFIDENCE: f64 = 0.0;

/// Inclusive bounds of a component value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cap {
    pub min: f64,
    pub max: f64,
}

impl Cap {
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub const POPULARITY_CAP: Cap = Cap { min: 0.0, max: 50.0 };
pub const LANGUAGE_CAP: Cap = Cap { min: -25.0, max: 25.0 };
pub const FLAGS_CAP: Cap = Cap { min: 0.0, max: 15.0 };
pub const SENSORY_CAP: Cap = Cap { min: -5.0, max: 10.0 };

pub fn cap(name: ComponentName) -> Cap {
    match name {
        ComponentName::Popularity => POPULARITY_CAP,
        ComponentName::Language => LANGUAGE_CAP,
        ComponentName::Flags => FLAGS_CAP,
        ComponentName::Sensory => SENSORY_CAP,
    }
}

/// Base weights; they sum to 1.
pub fn base_weight(name: ComponentName) -> f64 {
    match name {
        ComponentName::Popularity => 0.40,
        ComponentName::Language => 0.30,
        ComponentName::Flags => 0.18,
        ComponentName::Sensory => 0.12,
    }
}

/// Result of [`compute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyScore {
    pub overall: f64,
    pub confidence: f64,
    pub components: BTreeMap<ComponentName, ComponentReading>,
}

/// How one component fed into `overall`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentContribution {
    pub name: ComponentName,
    /// The caller's value, before clamping.
    pub value: Option<f64>,
    /// Value clamped to its cap, divided by the cap maximum.
    pub scaled: f64,
    /// Renormalized weight; 0 when absent.
    pub effective_weight: f64,
    /// `100 × effective_weight × scaled`, before clamping and rounding.
    pub contribution: f64,
}

/// Per-component weights and contributions, in [`ComponentName::ALL`] order.
pub fn breakdown(components: &EnergyComponents) -> Vec<ComponentContribution> {
    let present_mass = present_weight_mass(components);
    ComponentName::ALL
        .into_iter()
        .map(|name| {
            let value = usable(components, name);
            let scaled = value
                .map(|v| cap(name).clamp(v) / cap(name).max)
                .unwrap_or(0.0);
            let effective_weight = match value {
                Some(_) if present_mass > 0.0 => base_weight(name) / present_mass,
                _ => 0.0,
            };
            ComponentContribution {
                name,
                value,
                scaled,
                effective_weight,
                contribution: 100.0 * effective_weight * scaled,
            }
        })
        .collect()
}

/// Combine components into an [`EnergyScore`].
pub fn compute(components: &EnergyComponents) -> EnergyScore {
    let parts = breakdown(components);
    let echoed = parts
        .iter()
        .map(|p| {
            let reading = match p.value {
                Some(v) => ComponentReading::present(v),
                None => ComponentReading::absent(),
            };
            (p.name, reading)
        })
        .collect();

    let present_mass = present_weight_mass(components);
    if present_mass <= 0.0 {
        return EnergyScore {
            overall: NEUTRAL_OVERALL,
            confidence: NEUTRAL_CONFIDENCE,
            components: echoed,
        };
    }

    let raw: f64 = parts.iter().map(|p| p.contribution).sum();
    EnergyScore {
        overall: raw.clamp(0.0, 100.0).round(),
        confidence: round2(present_mass.clamp(0.0, 1.0)),
        components: echoed,
    }
}

/// [`compute`] wrapped into a record for `entity` at `version`.
pub fn compute_record(
    entity: &EntityRef,
    version: &CompositeVersion,
    components: &EnergyComponents,
) -> CompositeScoreRecord {
    let score = compute(components);
    tracing::debug!(
        entity = %entity,
        version = %version,
        overall = score.overall,
        confidence = score.confidence,
        "computed composite"
    );
    CompositeScoreRecord {
        entity: entity.clone(),
        version: version.clone(),
        overall: score.overall,
        confidence: score.confidence,
        components: score.components,
    }
}

fn present_weight_mass(components: &EnergyComponents) -> f64 {
    ComponentName::ALL
        .into_iter()
        .filter(|name| usable(components, *name).is_some())
        .map(base_weight)
        .sum()
}

/// Non-finite values count as absent.
fn usable(components: &EnergyComponents, name: ComponentName) -> Option<f64> {
    components.get(name).filter(|v| v.is_finite())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
