use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, played in the terminal")]
struct Cli {
    /// JSON file with `rows`, `cols` and `tick_ms`; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.game_config()?;
    logging::init(&cli.log_file)?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let mut human_mode = HumanMode::new(config, cli.seed);
    human_mode.run().await?;

    Ok(())
}
