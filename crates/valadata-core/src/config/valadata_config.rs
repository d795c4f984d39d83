//! Top-level Valadata configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{PipelineConfig, ScoringConfig, StorageConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VALADATA_*`)
/// 3. Project config (`valadata.toml` in project root, or an explicit file)
/// 4. User config (`~/.valadata/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValadataConfig {
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub pipeline: PipelineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub composite_version: Option<String>,
    pub tag_version: Option<String>,
    pub database_path: Option<String>,
    pub threads: Option<usize>,
    pub deadline_secs: Option<u64>,
    pub dry_run: Option<bool>,
}

impl ValadataConfig {
    /// Load configuration with 4-layer resolution, reading the project
    /// layer from `valadata.toml` in `root` when it exists.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let project = project_config_path
            .exists()
            .then_some(project_config_path.as_path());
        Self::load_layers(project, cli_overrides)
    }

    /// Load configuration using `path` as the project layer. The file must
    /// exist.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::load_layers(Some(path), cli_overrides)
    }

    fn load_layers(
        project: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        if let Some(path) = project {
            Self::merge_toml_file(&mut config, path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ValadataConfig) -> Result<(), ConfigError> {
        if let Some(ref v) = config.scoring.composite_version {
            if v.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.composite_version".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(ref v) = config.scoring.tag_version {
            if v.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.tag_version".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        let registry = crate::version::VersionRegistry::from_config(&config.scoring).map_err(|e| {
            ConfigError::ValidationFailed {
                field: "scoring".to_string(),
                message: e.to_string(),
            }
        })?;
        registry
            .composite(config.scoring.effective_composite_version())
            .map_err(|e| ConfigError::ValidationFailed {
                field: "scoring.composite_version".to_string(),
                message: e.to_string(),
            })?;
        registry
            .tag(config.scoring.effective_tag_version())
            .map_err(|e| ConfigError::ValidationFailed {
                field: "scoring.tag_version".to_string(),
                message: e.to_string(),
            })?;
        if config.pipeline.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.pipeline.deadline_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.deadline_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref path) = config.storage.database_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.database_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.valadata/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".valadata").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ValadataConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ValadataConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut ValadataConfig, other: &ValadataConfig) {
        // Scoring
        if other.scoring.composite_version.is_some() {
            base.scoring.composite_version = other.scoring.composite_version.clone();
        }
        if other.scoring.tag_version.is_some() {
            base.scoring.tag_version = other.scoring.tag_version.clone();
        }
        if !other.scoring.extra_composite_versions.is_empty() {
            base.scoring.extra_composite_versions =
                other.scoring.extra_composite_versions.clone();
        }
        if !other.scoring.extra_tag_versions.is_empty() {
            base.scoring.extra_tag_versions = other.scoring.extra_tag_versions.clone();
        }

        // Storage
        if other.storage.database_path.is_some() {
            base.storage.database_path = other.storage.database_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }

        // Pipeline
        if other.pipeline.threads.is_some() {
            base.pipeline.threads = other.pipeline.threads;
        }
        if other.pipeline.deadline_secs.is_some() {
            base.pipeline.deadline_secs = other.pipeline.deadline_secs;
        }
        if other.pipeline.dry_run.is_some() {
            base.pipeline.dry_run = other.pipeline.dry_run;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VALADATA_COMPOSITE_VERSION`, `VALADATA_THREADS`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut ValadataConfig) {
        if let Ok(val) = std::env::var("VALADATA_COMPOSITE_VERSION") {
            config.scoring.composite_version = Some(val);
        }
        if let Ok(val) = std::env::var("VALADATA_TAG_VERSION") {
            config.scoring.tag_version = Some(val);
        }
        if let Ok(val) = std::env::var("VALADATA_DB_PATH") {
            config.storage.database_path = Some(val);
        }
        if let Ok(val) = std::env::var("VALADATA_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.pipeline.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VALADATA_DEADLINE_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.pipeline.deadline_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VALADATA_DRY_RUN") {
            if let Ok(v) = val.parse::<bool>() {
                config.pipeline.dry_run = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ValadataConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.composite_version {
            config.scoring.composite_version = Some(v.clone());
        }
        if let Some(ref v) = cli.tag_version {
            config.scoring.tag_version = Some(v.clone());
        }
        if let Some(ref v) = cli.database_path {
            config.storage.database_path = Some(v.clone());
        }
        if let Some(v) = cli.threads {
            config.pipeline.threads = Some(v);
        }
        if let Some(v) = cli.deadline_secs {
            config.pipeline.deadline_secs = Some(v);
        }
        if let Some(v) = cli.dry_run {
            config.pipeline.dry_run = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
