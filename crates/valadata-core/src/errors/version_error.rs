//! Score version errors.

use super::error_code::{self, ValadataErrorCode};

/// Errors raised when a score version string fails registry validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("Unknown {kind} version: {version}")]
    Unknown { kind: &'static str, version: String },

    #[error("Invalid {kind} version {version:?}: {reason}")]
    Invalid {
        kind: &'static str,
        version: String,
        reason: String,
    },

    #[error("Tag version {tag_version} depends on unregistered composite version {composite_version}")]
    UnknownDependency {
        tag_version: String,
        composite_version: String,
    },
}

impl ValadataErrorCode for VersionError {
    fn error_code(&self) -> &'static str {
        error_code::VERSION_ERROR
    }
}
