/// Valadata system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Composite ("energy") score version registered by default.
pub const DEFAULT_COMPOSITE_VERSION: &str = "energy_v1";

/// Tag score version registered by default.
pub const DEFAULT_TAG_VERSION: &str = "tags_v1";

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "valadata.toml";

/// Database file used when no path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "valadata.db";

/// Worker threads used by the batch driver when none are configured.
pub const DEFAULT_PIPELINE_THREADS: usize = 4;

/// Upper bound on batch driver worker threads.
pub const MAX_PIPELINE_THREADS: usize = 64;
