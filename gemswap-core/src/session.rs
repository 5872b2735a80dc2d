//! Score and level progression, driven by board events

use serde::{Deserialize, Serialize};

use crate::events::BoardObserver;
use crate::piece::Piece;

/// Points for one removed gem at level 1
pub const POINTS_PER_PIECE: u64 = 10;

/// Level `n` ends once the score reaches `LEVEL_BASE_TARGET * n * n`
pub const LEVEL_BASE_TARGET: u64 = 500;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    score: u64,
    level: u32,
    over: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            over: false,
        }
    }

    /// Resume from saved progress. Level is at least 1.
    pub fn with_progress(score: u64, level: u32) -> Self {
        Self {
            score,
            level: level.max(1),
            over: false,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Score at which the current level ends
    pub fn next_level_target(&self) -> u64 {
        let level = u64::from(self.level);
        LEVEL_BASE_TARGET * level * level
    }

    fn add_piece(&mut self) {
        self.score += POINTS_PER_PIECE * u64::from(self.level);
        while self.score >= self.next_level_target() {
            self.level += 1;
            tracing::info!("level {} reached at score {}", self.level, self.score);
        }
    }
}

impl BoardObserver for Session {
    fn on_piece_removed(&mut self, _piece: &Piece) {
        self.add_piece();
    }

    fn on_no_moves_left(&mut self) {
        if !self.over {
            tracing::info!("game over: score {}, level {}", self.score, self.level);
        }
        self.over = true;
    }
}
