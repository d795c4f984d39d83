//! Error handling for Valadata.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Malformed provider input is never an error: the engine degrades it to
//! absent or empty output. These enums cover the adapters around the engine.

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod storage_error;
pub mod version_error;

pub use config_error::ConfigError;
pub use error_code::ValadataErrorCode;
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;
pub use version_error::VersionError;
