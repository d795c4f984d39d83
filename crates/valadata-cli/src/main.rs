use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use valadata_core::config::{CliOverrides, ValadataConfig};
use valadata_core::{EntityRef, VersionRegistry};
use valadata_pipeline::{BatchDriver, BatchMode, BatchRequest, BatchTarget, InMemoryProvider};
use valadata_storage::SqliteScoreStore;

#[derive(Parser, Debug)]
#[command(
    name = "valadata-backfill",
    version,
    about = "Recompute composite (energy) and tag scores for venues"
)]
struct Cli {
    /// JSON array of entity snapshots
    #[arg(long)]
    input: PathBuf,

    /// SQLite score database (default from config, then ./valadata.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Config file used as the project layer instead of ./valadata.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only score this entity; repeat for several
    #[arg(long = "entity", value_name = "ID")]
    entities: Vec<String>,

    #[arg(long)]
    composite_version: Option<String>,

    #[arg(long)]
    tag_version: Option<String>,

    /// Write composite scores only
    #[arg(long, conflicts_with = "tags_only")]
    energy_only: bool,

    /// Write tag scores only, reading stored composite scores
    #[arg(long)]
    tags_only: bool,

    /// Compute without writing
    #[arg(long)]
    dry_run: bool,

    #[arg(long)]
    threads: Option<usize>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            composite_version: self.composite_version.clone(),
            tag_version: self.tag_version.clone(),
            database_path: self.db.as_ref().map(|p| p.display().to_string()),
            threads: self.threads,
            deadline_secs: None,
            dry_run: self.dry_run.then_some(true),
        }
    }

    fn target(&self) -> BatchTarget {
        match self.entities.as_slice() {
            [] => BatchTarget::All,
            [one] => BatchTarget::One(EntityRef::new(one.as_str())),
            many => BatchTarget::Many(many.iter().map(|e| EntityRef::new(e.as_str())).collect()),
        }
    }

    fn mode(&self) -> BatchMode {
        if self.energy_only {
            BatchMode::EnergyOnly
        } else if self.tags_only {
            BatchMode::TagsOnly
        } else {
            BatchMode::Full
        }
    }
}

fn main() -> Result<ExitCode> {
    valadata_core::tracing::init_tracing();
    let cli = Cli::parse();

    let overrides = cli.overrides();
    let config = match &cli.config {
        Some(path) => ValadataConfig::load_file(path, Some(&overrides)),
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            ValadataConfig::load(&cwd, Some(&overrides))
        }
    }
    .context("loading configuration")?;

    let registry = VersionRegistry::from_config(&config.scoring)?;
    let request = BatchRequest::from_config(&config, &registry, cli.target(), cli.mode())?;

    let provider = InMemoryProvider::load_json(&cli.input)
        .with_context(|| format!("loading snapshots from {}", cli.input.display()))?;
    let db_path = config.storage.effective_database_path();
    let store = SqliteScoreStore::from_config(&config.storage)
        .with_context(|| format!("opening score store at {}", db_path.display()))?;

    let driver = BatchDriver::new(Arc::new(provider), Arc::new(store))
        .with_threads(config.pipeline.effective_threads());
    let report = driver.run(&request)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_clean() {
        tracing::warn!(failed = report.failed, "some entities failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
