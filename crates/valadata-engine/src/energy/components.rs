//! Component derivation from raw signals.

use serde::{Deserialize, Serialize};
use valadata_core::ComponentName;

use super::{FLAGS_CAP, LANGUAGE_CAP, SENSORY_CAP};
use crate::lexicon::{ENERGY_HIGH, ENERGY_LOW, SIGHT_HIGH, SIGHT_LOW, SMELL, SOUND_HIGH, SOUND_LOW};
use crate::signals::RawSignals;

const LANGUAGE_POINTS_PER_HIT: f64 = 3.0;
const LIVE_MUSIC_POINTS: f64 = 10.0;
const BAR_FORWARD_POINTS: f64 = 5.0;
const GOOD_FOR_GROUPS_POINTS: f64 = 5.0;

/// The four composite inputs. `None` means absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyComponents {
    pub popularity: Option<f64>,
    pub language: Option<f64>,
    pub flags: Option<f64>,
    pub sensory: Option<f64>,
}

impl EnergyComponents {
    pub fn get(&self, name: ComponentName) -> Option<f64> {
        match name {
            ComponentName::Popularity => self.popularity,
            ComponentName::Language => self.language,
            ComponentName::Flags => self.flags,
            ComponentName::Sensory => self.sensory,
        }
    }

    pub fn set(&mut self, name: ComponentName, value: Option<f64>) {
        let slot = match name {
            ComponentName::Popularity => &mut self.popularity,
            ComponentName::Language => &mut self.language,
            ComponentName::Flags => &mut self.flags,
            ComponentName::Sensory => &mut self.sensory,
        };
        *slot = value;
    }

    pub fn with(mut self, name: ComponentName, value: f64) -> Self {
        self.set(name, Some(value));
        self
    }

    pub fn present_count(&self) -> usize {
        ComponentName::ALL
            .into_iter()
            .filter(|n| self.get(*n).is_some())
            .count()
    }
}

/// Derive all four components from `signals`.
pub fn derive(signals: &RawSignals) -> EnergyComponents {
    let text = signals.about_text.as_str();
    EnergyComponents {
        popularity: signals.popularity,
        language: language(text),
        flags: flags(signals),
        sensory: sensory(text),
    }
}

/// `3 × (high hits − low hits)`. Present iff the text is non-blank.
pub fn language(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        return None;
    }
    let net = ENERGY_HIGH.hits(text) as f64 - ENERGY_LOW.hits(text) as f64;
    Some(LANGUAGE_CAP.clamp(net * LANGUAGE_POINTS_PER_HIT))
}

/// Present iff at least one flag is set.
pub fn flags(signals: &RawSignals) -> Option<f64> {
    let mut points = 0.0;
    if signals.live_music {
        points += LIVE_MUSIC_POINTS;
    }
    if signals.bar_forward {
        points += BAR_FORWARD_POINTS;
    }
    if signals.good_for_groups {
        points += GOOD_FOR_GROUPS_POINTS;
    }
    let any = signals.live_music || signals.bar_forward || signals.good_for_groups;
    any.then(|| FLAGS_CAP.clamp(points))
}

/// Sound, sight and smell terms. Present iff the text is non-blank; text
/// with no sensory term scores 0.
pub fn sensory(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        return None;
    }
    let sound_high = SOUND_HIGH.hits(text) as f64;
    let sound_low = SOUND_LOW.hits(text) as f64;
    let sight_high = SIGHT_HIGH.hits(text) as f64;
    let sight_low = SIGHT_LOW.hits(text) as f64;
    let smell = SMELL.hits(text) as f64;

    let score = (1.5 * sound_high).min(3.0) - sound_low.min(2.0) + sight_high.min(2.0)
        - sight_low.min(2.0)
        + (1.5 * smell).min(3.0);
    Some(SENSORY_CAP.clamp(score))
}
