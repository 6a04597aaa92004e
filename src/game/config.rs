use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of rows in the grid
    pub rows: usize,
    /// Number of columns in the grid
    pub cols: usize,
    /// Milliseconds between two ticks
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            tick_ms: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(5, 5)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rows > 0, "rows must be at least 1");
        ensure!(self.cols > 0, "cols must be at least 1");
        ensure!(self.tick_ms > 0, "tick_ms must be at least 1");
        ensure!(
            i32::try_from(self.rows).is_ok() && i32::try_from(self.cols).is_ok(),
            "grid of {}x{} is too large",
            self.rows,
            self.cols
        );
        Ok(())
    }
}
