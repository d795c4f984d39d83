//! Raw scoring signals extracted from a venue.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use valadata_core::{CanonicalFactSet, ServiceField};

use crate::energy::POPULARITY_CAP;

static BAR_CATEGORY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)bar|wine bar|cocktail|pub").ok());
static BAR_PLACE_TYPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"bar|cafe|night_club").ok());

/// Free-text and classification fields of a venue.
#[derive(Debug, Clone, Copy, Default)]
pub struct VenueText<'a> {
    pub description: Option<&'a str>,
    pub about_copy: Option<&'a str>,
    pub category: Option<&'a str>,
    pub place_types: &'a [String],
}

/// Everything the energy and tag scorers read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSignals {
    pub about_text: String,
    pub live_music: bool,
    pub good_for_groups: bool,
    pub bar_forward: bool,
    /// Popularity points in [0, 50], when a provider supplies them.
    pub popularity: Option<f64>,
    /// Overrides the composite overall in the late-night tag.
    pub late_night_energy: Option<f64>,
}

impl RawSignals {
    pub fn extract(text: &VenueText<'_>, facts: &CanonicalFactSet, popularity: Option<f64>) -> Self {
        Self {
            about_text: about_text(text.description, text.about_copy),
            live_music: facts.is_true(ServiceField::LiveMusic),
            good_for_groups: facts.is_true(ServiceField::GoodForGroups),
            bar_forward: is_bar_forward(text.category, text.place_types),
            popularity: sanitize_popularity(popularity),
            late_night_energy: None,
        }
    }

    pub fn with_late_night_energy(mut self, energy: f64) -> Self {
        self.late_night_energy = Some(energy);
        self
    }
}

/// Description and about copy joined by a blank line, skipping empty parts.
pub fn about_text(description: Option<&str>, about_copy: Option<&str>) -> String {
    [description, about_copy]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// True for bars, pubs, cocktail and wine bars, cafes and night clubs.
pub fn is_bar_forward(category: Option<&str>, place_types: &[String]) -> bool {
    if let (Some(category), Some(re)) = (category, BAR_CATEGORY.as_ref()) {
        if re.is_match(category) {
            return true;
        }
    }
    match BAR_PLACE_TYPE.as_ref() {
        Some(re) => place_types.iter().any(|t| re.is_match(t)),
        None => false,
    }
}

/// Negative or non-finite popularity is treated as missing.
fn sanitize_popularity(popularity: Option<f64>) -> Option<f64> {
    popularity
        .filter(|p| p.is_finite() && *p >= 0.0)
        .map(|p| p.min(POPULARITY_CAP.max))
}
