//! Provenance sources and their fixed trust ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Origin of a fact.
///
/// Priority is held as data in [`ProvenanceSource::PRIORITY`]; `Ord` follows
/// it, so sorting a list of sources yields highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvenanceSource {
    /// Human curator override.
    Manual,
    /// Web-crawl extractor.
    Crawl,
    /// Structured data provider.
    PrimaryApi,
}

impl ProvenanceSource {
    /// Total trust order, highest first.
    pub const PRIORITY: [ProvenanceSource; 3] = [Self::Manual, Self::Crawl, Self::PrimaryApi];

    /// Position in [`Self::PRIORITY`]; lower is more trusted.
    pub fn rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|s| *s == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// True if `self` is trusted over `other`.
    pub fn outranks(self, other: Self) -> bool {
        self.rank() < other.rank()
    }

    /// Wire name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Crawl => "CRAWL",
            Self::PrimaryApi => "PRIMARY_API",
        }
    }
}

impl Ord for ProvenanceSource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for ProvenanceSource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ProvenanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source name that matches no provenance source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provenance source: {0}")]
pub struct UnknownSourceError(pub String);

impl FromStr for ProvenanceSource {
    type Err = UnknownSourceError;

    /// Accepts wire names in any case plus the legacy provider labels
    /// (`google`, `scrape`) still present in older exports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "crawl" | "scrape" => Ok(Self::Crawl),
            "primary_api" | "google" => Ok(Self::PrimaryApi),
            _ => Err(UnknownSourceError(s.to_string())),
        }
    }
}
