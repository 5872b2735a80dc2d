//! Save and resume a game in progress
//!
//! A save file is a JSON `SaveGame`: board size, progress and the exported
//! cell list.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::engine::Game;
use crate::error::PersistenceError;
use crate::piece::{GemType, Pos};
use crate::selection::SelectionState;
use crate::session::Session;
use crate::state::CellState;

/// Current save file version
pub const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    pub gem_types: GemType,
    pub score: u64,
    pub level: u32,
    pub cells: Vec<CellState>,
}

impl SaveGame {
    /// Snapshot of a running game
    ///
    /// A swap still waiting to be reverted is saved as already reverted, so
    /// the unproductive move never outlives the save.
    pub fn capture(game: &Game<Session>) -> Self {
        let grid = game.grid();
        let session = game.observer();
        let mut cells = game.export_state();
        if let SelectionState::AwaitingRevert(pending) = game.selection().state() {
            undo_swap(&mut cells, pending.a, pending.b);
        }
        Self {
            version: SAVE_VERSION,
            width: grid.width(),
            height: grid.height(),
            gem_types: grid.gem_types(),
            score: session.score(),
            level: session.level(),
            cells,
        }
    }

    /// Write to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("saved game to {}", path.display());
        Ok(())
    }

    /// Read a JSON file written by `save`
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let content = std::fs::read_to_string(path)?;
        let save: SaveGame = serde_json::from_str(&content)?;

        if save.version != SAVE_VERSION {
            tracing::warn!(
                "rejecting save {} with version {}",
                path.display(),
                save.version
            );
            return Err(PersistenceError::Version {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(save)
    }

    /// Rebuild the game. Size and type count come from the save; pacing and
    /// seed come from `config`.
    pub fn restore(&self, config: GameConfig) -> Result<Game<Session>, PersistenceError> {
        let config = config
            .with_size(self.width, self.height)
            .with_gem_types(self.gem_types);
        let session = Session::with_progress(self.score, self.level);
        let game = Game::import_state(&self.cells, config, session)?;
        tracing::info!(
            "resumed {}x{} game at score {}, level {}",
            self.width,
            self.height,
            self.score,
            self.level
        );
        Ok(game)
    }
}

fn undo_swap(cells: &mut [CellState], a: Pos, b: Pos) {
    for cell in cells.iter_mut() {
        let pos = Pos::new(cell.x, cell.y);
        let target = if pos == a {
            b
        } else if pos == b {
            a
        } else {
            continue;
        };
        cell.x = target.x;
        cell.y = target.y;
    }
}
