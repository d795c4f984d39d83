//! Term lexicons and hit counting.
//!
//! A hit is a lexicon entry that occurs anywhere in the text as an ASCII
//! case-insensitive substring. Each entry counts at most once no matter how
//! often it occurs, and overlapping terms ("live music", "music") both count.
//! A term listed twice is two entries and counts twice.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

/// A compiled term list.
pub struct Lexicon {
    entries: Vec<&'static str>,
    patterns: Vec<&'static str>,
    multiplicity: Vec<usize>,
    matcher: Option<AhoCorasick>,
}

impl Lexicon {
    /// Compile `terms`. Empty terms are dropped; repeated terms keep their weight.
    pub fn new<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        let entries: Vec<&'static str> = terms.into_iter().filter(|t| !t.is_empty()).collect();
        let mut patterns: Vec<&'static str> = Vec::new();
        let mut multiplicity: Vec<usize> = Vec::new();
        for term in &entries {
            match patterns.iter().position(|p| p == term) {
                Some(idx) => multiplicity[idx] += 1,
                None => {
                    patterns.push(*term);
                    multiplicity.push(1);
                }
            }
        }
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .ok();
        if matcher.is_none() {
            tracing::warn!(terms = patterns.len(), "lexicon failed to compile; it will never match");
        }
        Self {
            entries,
            patterns,
            multiplicity,
            matcher,
        }
    }

    fn seen(&self, text: &str) -> Vec<bool> {
        let mut seen = vec![false; self.patterns.len()];
        if let Some(matcher) = &self.matcher {
            for m in matcher.find_overlapping_iter(text) {
                seen[m.pattern().as_usize()] = true;
            }
        }
        seen
    }

    /// Number of entries present in `text`.
    pub fn hits(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.seen(text)
            .into_iter()
            .zip(&self.multiplicity)
            .filter_map(|(hit, n)| hit.then_some(*n))
            .sum()
    }

    /// The distinct terms that occur in `text`, in first-listed order.
    pub fn matched_terms(&self, text: &str) -> Vec<&'static str> {
        self.patterns
            .iter()
            .zip(self.seen(text))
            .filter_map(|(term, hit)| hit.then_some(*term))
            .collect()
    }

    /// Every entry as listed, repeats included.
    pub fn terms(&self) -> &[&'static str] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon")
            .field("terms", &self.entries)
            .finish()
    }
}

macro_rules! lexicon {
    ($name:ident, [$($term:expr),* $(,)?]) => {
        pub static $name: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::new([$($term),*]));
    };
}

// ── Energy: language ───────────────────────────────────────────────────────
pub const ENERGY_HIGH_TERMS: &[&str] = &[
    "bustling", "packed", "loud", "buzzing", "electric", "lively", "raucous", "scene", "party",
    "roaring", "pumping", "chaotic", "wild",
];
pub const ENERGY_LOW_TERMS: &[&str] = &[
    "quiet", "calm", "intimate", "hushed", "peaceful", "low-key", "relaxed", "serene", "gentle",
    "whisper", "subdued", "mellow",
];

pub static ENERGY_HIGH: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::new(ENERGY_HIGH_TERMS.iter().copied()));
pub static ENERGY_LOW: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::new(ENERGY_LOW_TERMS.iter().copied()));

// ── Energy: sensory ────────────────────────────────────────────────────────
lexicon!(SOUND_HIGH, ["dj", "live band", "live music", "dj night", "dj nights", "acoustic", "band"]);
lexicon!(SOUND_LOW, ["no music", "ambient playlist", "quiet background", "silent"]);
lexicon!(SIGHT_HIGH, ["neon", "vibrant", "bright", "warm lighting", "lit"]);
lexicon!(SIGHT_LOW, ["dim", "dark", "candlelit", "muted", "moody"]);
lexicon!(
    SMELL,
    [
        "open kitchen", "wood-fire", "wood fire", "charcoal", "live cooking", "bakery",
        "coffee roaster", "roaster", "smoker", "grill",
    ]
);

// ── Tags ───────────────────────────────────────────────────────────────────
pub static COZY: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(ENERGY_LOW_TERMS.iter().copied().chain([
        "intimate", "warm", "romantic", "cozy", "nook", "fireplace", "candlelit", "soft",
        "low-key", "quiet", "hushed",
    ]))
});
lexicon!(
    DATE_NIGHT,
    [
        "romantic", "intimate", "date night", "special occasion", "anniversary", "candlelit",
        "dim", "quiet", "cozy", "white tablecloth", "elegant",
    ]
);
lexicon!(
    LATE_NIGHT,
    [
        "late night", "late-night", "open late", "after midnight", "last call", "dj",
        "live music", "nightlife", "bar", "cocktails", "scene",
    ]
);
lexicon!(
    AFTER_WORK,
    [
        "happy hour", "after work", "work crowd", "casual", "bar", "drinks", "patio", "outdoor",
        "lively", "bustling", "good for groups",
    ]
);
lexicon!(
    SCENE,
    [
        "scene", "see and be seen", "trendy", "hot spot", "party", "loud", "dj", "live music",
        "packed", "bustling", "electric", "vibrant",
    ]
);
