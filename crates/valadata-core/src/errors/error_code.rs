//! ValadataErrorCode trait for structured error reporting.

/// Trait for mapping Valadata errors to stable error code strings.
/// Every error enum implements this so batch reports and the CLI can
/// surface a machine-readable code next to the message.
pub trait ValadataErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CORRUPT_RECORD: &str = "CORRUPT_RECORD";
pub const VERSION_ERROR: &str = "VERSION_ERROR";
pub const ENTITY_NOT_FOUND: &str = "ENTITY_NOT_FOUND";
pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
pub const WORKER_POOL_ERROR: &str = "WORKER_POOL_ERROR";
pub const CANCELLED: &str = "CANCELLED";
