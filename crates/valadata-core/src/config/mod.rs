//! Configuration system for Valadata.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod pipeline_config;
pub mod scoring_config;
pub mod storage_config;
pub mod valadata_config;

pub use pipeline_config::PipelineConfig;
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;
pub use valadata_config::{CliOverrides, ValadataConfig};
