use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of cells along the horizontal axis
pub const GRID_COLUMNS: u32 = 30;
/// Number of cells along the vertical axis
pub const GRID_ROWS: u32 = 20;

/// Tick interval at the start of every session, in milliseconds
pub const BASE_TICK_MS: f64 = 50.0;
/// Amount the tick interval shrinks on each growth event
pub const TICK_STEP_MS: f64 = 0.5;
/// The tick interval never drops below this
pub const MIN_TICK_MS: f64 = 25.0;

/// Configuration for a snake session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial length of the snake
    pub start_snake_size: usize,
    /// Share of the container width used by the board, in percent
    pub percentage_width: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_snake_size: 6,
            percentage_width: 40.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom starting length
    pub fn new(start_snake_size: usize) -> Self {
        Self {
            start_snake_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a TOML file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config in {:?}", path))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config")
    }

    /// Starting length clamped to a snake that fits in one row of the board
    pub fn effective_snake_size(&self) -> usize {
        self.start_snake_size.clamp(1, GRID_COLUMNS as usize)
    }
}
