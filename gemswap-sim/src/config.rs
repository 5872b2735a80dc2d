//! Configuration types for headless play
//!
//! Level 4 - Utilities and configuration

use gemswap_core::GameConfig;
use serde::{Deserialize, Serialize};

/// Batch simulation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of games to play
    pub games: usize,
    /// Moves after which a game is stopped
    pub max_moves: u32,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed; game `i` uses `seed + i` (None = 42)
    pub seed: Option<u64>,
    /// Board settings shared by every game
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_moves: 200,
            parallel: false,
            seed: None,
            game: GameConfig::default(),
        }
    }
}

impl SimConfig {
    /// Create config for a number of games
    pub fn games(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub(crate) fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}
