use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use gridsnake::{Boundary, GameConfig, GridSize};

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Snake on a square grid")]
struct Cli {
    /// Board side length: 16, 32 or 64
    #[arg(long, default_value = "32", value_parser = parse_grid_size)]
    size: GridSize,

    /// Seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Re-enter on the opposite edge instead of dying at the border
    #[arg(long)]
    wrap: bool,

    /// Write logs to this file (set the level with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_grid_size(s: &str) -> Result<GridSize> {
    let side: u16 = s.parse().with_context(|| format!("'{}' is not a number", s))?;
    Ok(GridSize::try_from(side)?)
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::builder();

    // The board owns the terminal, so stay quiet unless logs go to a file
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Off).parse_default_env();
        }
    }

    builder.init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = GameConfig::new(cli.size);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.wrap {
        config = config.with_boundary(Boundary::Wrap);
    }

    gridsnake::app::run(config).await
}
