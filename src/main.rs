use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::PlayMode;
use grid_snake::storage::{FileStore, HighScoreStore, NoStorage};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a wrapping grid")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial snake length (overrides the config file)
    #[arg(long)]
    start_snake_size: Option<usize>,

    /// Share of the container width used by the board, in percent
    #[arg(long)]
    percentage_width: Option<f64>,

    /// Width of the container the board is sized against
    #[arg(long, default_value = "750")]
    container_width: f64,

    /// File the high score is kept in; without it scores are not saved
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs never go to the terminal the board is drawn on
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = cli.start_snake_size {
        config.start_snake_size = size;
    }
    if let Some(percentage) = cli.percentage_width {
        config.percentage_width = percentage;
    }

    let store: Arc<dyn HighScoreStore> = match cli.high_score_file {
        Some(path) => Arc::new(FileStore::new(path)),
        None => Arc::new(NoStorage),
    };

    PlayMode::new(config, Some(cli.container_width), store)
        .run()
        .await
}
