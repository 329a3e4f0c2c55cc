use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use terrain_optimizer::{optimize, EngineConfig, LandscapeKind, PruneRule};

/// Find the highest-value river and landscape layout for a grid.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(short, long)]
    cols: Option<usize>,

    /// Landscape card: meadow, thicket, mountain, suburb (or 0-3)
    #[arg(short, long)]
    landscape: Option<LandscapeKind>,

    /// Pruning ceiling: tile or neighborhood
    #[arg(long)]
    prune: Option<PruneRule>,

    /// JSON engine config; command-line flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the solution as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(landscape) = self.landscape {
            config.landscape = landscape;
        }
        if let Some(prune) = self.prune {
            config.prune = prune;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;

    info!(
        rows = config.rows,
        cols = config.cols,
        landscape = %config.landscape,
        "optimizing layout"
    );
    let solution = optimize(&config).context("invalid grid configuration")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!();
        print!("{}", solution.grid);
        println!();
        println!(" Value of grid: {}", solution.score);
    }
    Ok(())
}
