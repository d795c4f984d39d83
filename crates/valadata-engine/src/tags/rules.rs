//! The five tag rules. `hits` is the number of lexicon entries found in
//! the about text; `E` is the composite overall.

use valadata_core::Tag;

use super::{TagContext, TagRule};
use crate::lexicon;

/// `0.7 × (1 − E/100) + min(0.3, 0.05 × hits) + 0.1` when any term hits.
#[derive(Debug, Clone, Copy)]
pub struct Cozy;

impl TagRule for Cozy {
    fn tag(&self) -> Tag {
        Tag::Cozy
    }

    fn score(&self, ctx: &TagContext<'_>) -> f64 {
        let hits = lexicon::COZY.hits(ctx.about_text) as f64;
        let bonus = if hits > 0.0 { 0.1 } else { 0.0 };
        0.7 * (1.0 - ctx.energy / 100.0) + (0.05 * hits).min(0.3) + bonus
    }
}

/// Peaks at moderate energy (E = 45) inside [20, 70].
#[derive(Debug, Clone, Copy)]
pub struct DateNight;

impl TagRule for DateNight {
    fn tag(&self) -> Tag {
        Tag::DateNight
    }

    fn score(&self, ctx: &TagContext<'_>) -> f64 {
        let e = ctx.energy;
        let base = if (20.0..=70.0).contains(&e) {
            0.5 + (40.0 - (e - 45.0).abs()) / 80.0
        } else {
            0.3
        };
        let hits = lexicon::DATE_NIGHT.hits(ctx.about_text) as f64;
        0.6 * base + (0.08 * hits).min(0.4)
    }
}

/// Uses the late-night energy override when one is set.
#[derive(Debug, Clone, Copy)]
pub struct LateNight;

impl TagRule for LateNight {
    fn tag(&self) -> Tag {
        Tag::LateNight
    }

    fn score(&self, ctx: &TagContext<'_>) -> f64 {
        let energy = ctx.signals.late_night_energy.unwrap_or(ctx.energy);
        let hits = lexicon::LATE_NIGHT.hits(ctx.about_text) as f64;
        0.6 * (energy / 100.0) + (0.1 * hits).min(0.5)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AfterWork;

impl TagRule for AfterWork {
    fn tag(&self) -> Tag {
        Tag::AfterWork
    }

    fn score(&self, ctx: &TagContext<'_>) -> f64 {
        let base = if (40.0..=80.0).contains(&ctx.energy) {
            0.6
        } else {
            0.2
        };
        let hits = lexicon::AFTER_WORK.hits(ctx.about_text) as f64;
        0.6 * base + (0.1 * hits).min(0.4)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scene;

impl TagRule for Scene {
    fn tag(&self) -> Tag {
        Tag::Scene
    }

    fn score(&self, ctx: &TagContext<'_>) -> f64 {
        let hits = lexicon::SCENE.hits(ctx.about_text) as f64;
        0.7 * (ctx.energy / 100.0) + (0.08 * hits).min(0.4)
    }
}
