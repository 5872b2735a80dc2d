//! The game facade: one board, one selection, one observer
//!
//! `Game` is the entry point for a front end. It takes the commands a UI
//! sends (`pick`, `tick`, `click_outside_board`) and reports what happened
//! through its observer.

use crate::board_text;
use crate::cascade::{cascade, CascadeReport};
use crate::config::GameConfig;
use crate::error::{BoardParseError, GridError, StateError};
use crate::events::BoardObserver;
use crate::grid::Grid;
use crate::piece::{Piece, Pos};
use crate::selection::{PickOutcome, SelectionController, Settled, TickOutcome, TransitionProbe};
use crate::solver;
use crate::state::{self, CellState};

#[derive(Debug)]
pub struct Game<O: BoardObserver = ()> {
    grid: Grid,
    selection: SelectionController,
    config: GameConfig,
    observer: O,
    /// `on_no_moves_left` already fired for the current board
    stuck: bool,
}

impl<O: BoardObserver> Game<O> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh random board. It may contain runs; the first tick clears them.
    pub fn new_board(config: GameConfig, observer: O) -> Result<Self, GridError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height, config.gem_types, config.seed)?;
        tracing::info!(
            "new {}x{} board with {} gem types",
            grid.width(),
            grid.height(),
            grid.gem_types()
        );
        Ok(Self::from_grid(grid, config, observer))
    }

    /// Board from text; the board's own size overrides the configured one
    pub fn load_board(
        source: &str,
        config: GameConfig,
        observer: O,
    ) -> Result<Self, BoardParseError> {
        let grid = board_text::load_board(source, config.gem_types, config.seed)?;
        Ok(Self::from_grid(grid, config, observer))
    }

    /// Board from exported cells, sized by the config
    pub fn import_state(
        cells: &[CellState],
        config: GameConfig,
        observer: O,
    ) -> Result<Self, StateError> {
        let grid = state::import_state(
            config.width,
            config.height,
            config.gem_types,
            cells,
            config.seed,
        )?;
        Ok(Self::from_grid(grid, config, observer))
    }

    pub fn from_grid(grid: Grid, config: GameConfig, observer: O) -> Self {
        let config = config
            .with_size(grid.width(), grid.height())
            .with_gem_types(grid.gem_types());
        Self {
            selection: SelectionController::new(config.max_revert_wait_ticks),
            grid,
            config,
            observer,
            stuck: false,
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Select the cell at (x, y)
    pub fn pick(&mut self, x: usize, y: usize) -> Result<PickOutcome, GridError> {
        let outcome = self
            .selection
            .pick(&mut self.grid, Pos::new(x, y), &mut self.observer)?;
        if let PickOutcome::Matched(_) = outcome {
            self.stuck = false;
        }
        Ok(outcome)
    }

    /// One simulation step.
    ///
    /// With a revert pending this advances the revert. Otherwise it clears
    /// any runs already on the board and then checks that a move is left,
    /// notifying the observer once when none is.
    pub fn tick<P: TransitionProbe + ?Sized>(&mut self, probe: &P) -> TickOutcome {
        if self.selection.is_awaiting_revert() {
            return self
                .selection
                .tick(&mut self.grid, probe, &mut self.observer);
        }

        let report = cascade(&mut self.grid, &mut self.observer);
        if !report.is_empty() {
            self.stuck = false;
            return TickOutcome::Cascaded(report);
        }

        if solver::any_move_exists(&self.grid) {
            self.stuck = false;
            return TickOutcome::Idle;
        }

        if !self.stuck {
            self.stuck = true;
            tracing::info!("no moves left");
            self.observer.on_no_moves_left();
        }
        TickOutcome::OutOfMoves
    }

    /// Tick with nothing animating until the board is quiet.
    /// Returns `Idle` or `OutOfMoves` plus everything cleared on the way.
    pub fn settle(&mut self) -> (TickOutcome, CascadeReport) {
        let mut total = CascadeReport::default();
        loop {
            match self.tick(&Settled) {
                TickOutcome::Cascaded(report) => {
                    total.waves += report.waves;
                    total.removed += report.removed;
                    total.spawned += report.spawned;
                }
                outcome @ (TickOutcome::Idle | TickOutcome::OutOfMoves) => {
                    return (outcome, total);
                }
                _ => {}
            }
        }
    }

    pub fn click_outside_board(&mut self) {
        self.selection.click_outside_board();
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Suggested swap, or None when the board is stuck
    pub fn hint(&self) -> Option<(Piece, Piece)> {
        solver::find_move(&self.grid)
    }

    pub fn any_move_exists(&self) -> bool {
        solver::any_move_exists(&self.grid)
    }

    pub fn export_state(&self) -> Vec<CellState> {
        state::export_state(&self.grid)
    }

    /// True once a tick has found the board without moves
    pub fn is_out_of_moves(&self) -> bool {
        self.stuck
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}
