//! Score versions and the closed registry that issues them.
//!
//! A version string only becomes a [`CompositeVersion`] or [`TagVersion`]
//! after the registry accepts it, so every scorer output carries a version
//! that was validated at the boundary.
//!
//! Deserialization is the exception: records read back from a store carry
//! whatever version string was written, which may predate the current
//! registry. Use [`VersionRegistry::recognizes_composite`] and
//! [`VersionRegistry::recognizes_tag`] to check them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::constants::{DEFAULT_COMPOSITE_VERSION, DEFAULT_TAG_VERSION};
use crate::errors::VersionError;
use crate::types::TagScoreRecord;

const COMPOSITE_KIND: &str = "composite";
const TAG_KIND: &str = "tag";

/// A registered composite ("energy") score version. Deserialized values are
/// taken as written; see the module docs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeVersion(String);

impl CompositeVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered tag score version. Deserialized values are taken as
/// written; see the module docs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagVersion(String);

impl TagVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of known score versions.
///
/// Each tag version declares the composite version it is designed to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRegistry {
    composite: BTreeSet<String>,
    tags: BTreeMap<String, String>,
}

impl Default for VersionRegistry {
    fn default() -> Self {
        let mut composite = BTreeSet::new();
        composite.insert(DEFAULT_COMPOSITE_VERSION.to_string());
        let mut tags = BTreeMap::new();
        tags.insert(
            DEFAULT_TAG_VERSION.to_string(),
            DEFAULT_COMPOSITE_VERSION.to_string(),
        );
        Self { composite, tags }
    }
}

impl VersionRegistry {
    /// An empty registry. Most callers want [`VersionRegistry::default`].
    pub fn empty() -> Self {
        Self {
            composite: BTreeSet::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Default versions plus any extra versions declared in config.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, VersionError> {
        let mut registry = Self::default();
        for version in &config.extra_composite_versions {
            registry.register_composite(version)?;
        }
        for (tag_version, composite_version) in &config.extra_tag_versions {
            registry.register_tag(tag_version, composite_version)?;
        }
        Ok(registry)
    }

    pub fn register_composite(&mut self, version: &str) -> Result<(), VersionError> {
        validate_shape(COMPOSITE_KIND, version)?;
        self.composite.insert(version.to_string());
        Ok(())
    }

    pub fn register_tag(&mut self, version: &str, depends_on: &str) -> Result<(), VersionError> {
        validate_shape(TAG_KIND, version)?;
        if !self.composite.contains(depends_on) {
            return Err(VersionError::UnknownDependency {
                tag_version: version.to_string(),
                composite_version: depends_on.to_string(),
            });
        }
        self.tags.insert(version.to_string(), depends_on.to_string());
        Ok(())
    }

    pub fn composite(&self, version: &str) -> Result<CompositeVersion, VersionError> {
        if self.composite.contains(version) {
            Ok(CompositeVersion(version.to_string()))
        } else {
            Err(VersionError::Unknown {
                kind: COMPOSITE_KIND,
                version: version.to_string(),
            })
        }
    }

    pub fn tag(&self, version: &str) -> Result<TagVersion, VersionError> {
        if self.tags.contains_key(version) {
            Ok(TagVersion(version.to_string()))
        } else {
            Err(VersionError::Unknown {
                kind: TAG_KIND,
                version: version.to_string(),
            })
        }
    }

    /// Whether `version` is registered here. False for a version read back
    /// from storage that this registry does not know.
    pub fn recognizes_composite(&self, version: &CompositeVersion) -> bool {
        self.composite.contains(version.as_str())
    }

    pub fn recognizes_tag(&self, version: &TagVersion) -> bool {
        self.tags.contains_key(version.as_str())
    }

    /// The composite version a tag version declares it reads.
    pub fn declared_dependency(&self, tag: &TagVersion) -> Option<CompositeVersion> {
        self.tags
            .get(tag.as_str())
            .map(|c| CompositeVersion(c.clone()))
    }

    /// True when `record` was computed against a composite version other
    /// than the one its tag version declares. Unregistered tag versions are
    /// always stale.
    pub fn is_stale(&self, record: &TagScoreRecord) -> bool {
        match self.declared_dependency(&record.version) {
            Some(declared) => record.is_stale_against(&declared),
            None => true,
        }
    }

    pub fn composite_versions(&self) -> impl Iterator<Item = &str> {
        self.composite.iter().map(String::as_str)
    }

    pub fn tag_versions(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}

fn validate_shape(kind: &'static str, version: &str) -> Result<(), VersionError> {
    let invalid = |reason: &str| VersionError::Invalid {
        kind,
        version: version.to_string(),
        reason: reason.to_string(),
    };
    if version.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if !version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(invalid("only ASCII letters, digits, '_', '-' and '.' are allowed"));
    }
    Ok(())
}
