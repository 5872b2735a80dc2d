//! Game configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::grid::MIN_SIDE;
use crate::piece::{GemType, DEFAULT_GEM_TYPES};

/// Board and pacing settings for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Number of distinct gem types (N)
    pub gem_types: GemType,
    /// Ticks a revert waits for moving pieces before it is forced
    pub max_revert_wait_ticks: u32,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            gem_types: DEFAULT_GEM_TYPES,
            max_revert_wait_ticks: 60,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set board size
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_gem_types(mut self, gem_types: GemType) -> Self {
        self.gem_types = gem_types;
        self
    }

    pub fn with_max_revert_wait(mut self, ticks: u32) -> Self {
        self.max_revert_wait_ticks = ticks;
        self
    }

    /// Reject boards that cannot be played
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.gem_types < 2 {
            return Err(GridError::InvalidTypeCount(self.gem_types));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
