//! Selection state machine: picks become swaps, unproductive swaps are undone
//!
//! ```text
//! Empty --pick--> OneSelected --pick (adjacent, no combo)--> AwaitingRevert
//!   ^                  |                                          |
//!   +---- pick (not adjacent) / pick (combo) / click outside      |
//!   +------------------------------- tick (pieces settled) -------+
//! ```

use crate::cascade::{cascade, CascadeReport};
use crate::error::GridError;
use crate::events::BoardObserver;
use crate::grid::Grid;
use crate::piece::{PieceId, Pos};

// ============================================================================
// TRANSITION PROBE
// ============================================================================

/// Tells the controller whether a piece is still moving on screen
pub trait TransitionProbe {
    fn in_transition(&self, piece: PieceId) -> bool;
}

impl<F: Fn(PieceId) -> bool> TransitionProbe for F {
    fn in_transition(&self, piece: PieceId) -> bool {
        self(piece)
    }
}

/// Probe for headless play: nothing is ever animating
#[derive(Clone, Copy, Debug, Default)]
pub struct Settled;

impl TransitionProbe for Settled {
    fn in_transition(&self, _piece: PieceId) -> bool {
        false
    }
}

// ============================================================================
// STATE
// ============================================================================

/// A swap kept provisionally until both pieces stop moving
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRevert {
    pub a: Pos,
    pub b: Pos,
    /// Pieces now sitting at `a` and `b`
    pub pieces: [Option<PieceId>; 2],
    /// Ticks spent waiting so far
    pub waited: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    OneSelected(Pos),
    AwaitingRevert(PendingRevert),
}

/// What a pick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// First piece of a pair selected
    Selected(Pos),
    /// Second piece was not adjacent; selection dropped, board untouched
    Discarded,
    /// Swap produced combos, which have been removed and settled
    Matched(CascadeReport),
    /// Swap produced nothing and will be undone on a later tick
    RevertPending { a: Pos, b: Pos },
    /// A revert is still pending; the pick was ignored
    Busy,
}

/// What a tick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do
    Idle,
    /// Revert held back by a moving piece
    Waiting { waited: u32 },
    /// Revert performed; `forced` when the wait limit ran out
    Reverted { forced: bool },
    /// Runs already on the board were cleared
    Cascaded(CascadeReport),
    /// No swap can make a combo
    OutOfMoves,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    max_wait_ticks: u32,
}

impl SelectionController {
    pub fn new(max_wait_ticks: u32) -> Self {
        Self {
            state: SelectionState::Empty,
            max_wait_ticks,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_awaiting_revert(&self) -> bool {
        matches!(self.state, SelectionState::AwaitingRevert(_))
    }

    /// Currently selected cells (0, 1 or 2 of them)
    pub fn selection(&self) -> Vec<Pos> {
        match self.state {
            SelectionState::Empty => Vec::new(),
            SelectionState::OneSelected(p) => vec![p],
            SelectionState::AwaitingRevert(r) => vec![r.a, r.b],
        }
    }

    /// Add a cell to the selection
    ///
    /// On the second pick the pair is swapped if adjacent. A productive swap
    /// cascades straight away; an unproductive one is scheduled for revert.
    pub fn pick<O: BoardObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        pos: Pos,
        observer: &mut O,
    ) -> Result<PickOutcome, GridError> {
        // Validate before touching state
        grid.get(pos.x, pos.y)?;

        let first = match self.state {
            SelectionState::AwaitingRevert(_) => return Ok(PickOutcome::Busy),
            SelectionState::Empty => {
                self.state = SelectionState::OneSelected(pos);
                return Ok(PickOutcome::Selected(pos));
            }
            SelectionState::OneSelected(first) => first,
        };

        if !first.is_adjacent(pos) {
            self.state = SelectionState::Empty;
            return Ok(PickOutcome::Discarded);
        }

        grid.swap(first, pos)?;
        let report = cascade(grid, observer);

        if !report.is_empty() {
            self.state = SelectionState::Empty;
            return Ok(PickOutcome::Matched(report));
        }

        tracing::debug!(
            "swap ({}, {}) <-> ({}, {}) made no combo, revert pending",
            first.x,
            first.y,
            pos.x,
            pos.y
        );
        self.state = SelectionState::AwaitingRevert(PendingRevert {
            a: first,
            b: pos,
            pieces: [grid.at(first).id, grid.at(pos).id],
            waited: 0,
        });
        Ok(PickOutcome::RevertPending { a: first, b: pos })
    }

    /// Advance a pending revert by one step
    ///
    /// The reversing swap waits while either piece is in transition, up to
    /// the configured number of ticks, then happens regardless.
    pub fn tick<P, O>(&mut self, grid: &mut Grid, probe: &P, observer: &mut O) -> TickOutcome
    where
        P: TransitionProbe + ?Sized,
        O: BoardObserver + ?Sized,
    {
        let SelectionState::AwaitingRevert(mut pending) = self.state else {
            return TickOutcome::Idle;
        };

        let moving = pending
            .pieces
            .iter()
            .flatten()
            .any(|&id| probe.in_transition(id));

        if moving && pending.waited < self.max_wait_ticks {
            pending.waited += 1;
            self.state = SelectionState::AwaitingRevert(pending);
            return TickOutcome::Waiting {
                waited: pending.waited,
            };
        }

        if moving {
            tracing::warn!(
                "forcing revert of ({}, {}) <-> ({}, {}) after {} ticks",
                pending.a.x,
                pending.a.y,
                pending.b.x,
                pending.b.y,
                pending.waited
            );
        }

        // Both cells were validated when the swap was made
        grid.swap_slots(pending.a, pending.b);
        observer.on_revert(pending.a, pending.b);
        self.state = SelectionState::Empty;

        TickOutcome::Reverted { forced: moving }
    }

    /// Drop a live selection. A pending revert is not a selection and stays.
    pub fn click_outside_board(&mut self) {
        if let SelectionState::OneSelected(_) = self.state {
            self.state = SelectionState::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BoardEvent, EventLog};
    use crate::piece::GemType;
    use std::cell::Cell;

    fn background() -> Vec<Vec<GemType>> {
        (0..8)
            .map(|y| (0..8).map(|x| ((x + 2 * y) % 4 + 1) as GemType).collect())
            .collect()
    }

    fn grid_with(overlay: &[(usize, usize, GemType)]) -> Grid {
        let mut rows = background();
        for &(x, y, kind) in overlay {
            rows[y][x] = kind;
        }
        Grid::from_rows(&rows, 7, Some(3)).unwrap()
    }

    /// Pick two cells whose swap makes no combo
    fn schedule_revert(ctl: &mut SelectionController, grid: &mut Grid) {
        ctl.pick(grid, Pos::new(0, 0), &mut ()).unwrap();
        let outcome = ctl.pick(grid, Pos::new(1, 0), &mut ()).unwrap();
        assert_eq!(
            outcome,
            PickOutcome::RevertPending {
                a: Pos::new(0, 0),
                b: Pos::new(1, 0)
            }
        );
    }

    #[test]
    fn test_first_pick_selects() {
        let mut grid = grid_with(&[]);
        let mut ctl = SelectionController::new(5);
        let outcome = ctl.pick(&mut grid, Pos::new(3, 3), &mut ()).unwrap();

        assert_eq!(outcome, PickOutcome::Selected(Pos::new(3, 3)));
        assert_eq!(ctl.state(), SelectionState::OneSelected(Pos::new(3, 3)));
        assert_eq!(ctl.selection(), vec![Pos::new(3, 3)]);
    }

    #[test]
    fn test_non_adjacent_pick_discards_selection() {
        let mut grid = grid_with(&[]);
        let before = grid.cells().to_vec();
        let mut ctl = SelectionController::new(5);
        let mut log = EventLog::new();

        ctl.pick(&mut grid, Pos::new(2, 2), &mut log).unwrap();
        let outcome = ctl.pick(&mut grid, Pos::new(4, 2), &mut log).unwrap();

        assert_eq!(outcome, PickOutcome::Discarded);
        assert_eq!(ctl.state(), SelectionState::Empty);
        assert!(ctl.selection().is_empty());
        assert_eq!(grid.cells(), &before[..]);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_picking_same_cell_twice_discards() {
        let mut grid = grid_with(&[]);
        let mut ctl = SelectionController::new(5);
        ctl.pick(&mut grid, Pos::new(1, 1), &mut ()).unwrap();
        assert_eq!(
            ctl.pick(&mut grid, Pos::new(1, 1), &mut ()).unwrap(),
            PickOutcome::Discarded
        );
    }

    #[test]
    fn test_productive_swap_cascades() {
        let mut grid = grid_with(&[(2, 0, 5), (2, 2, 5), (2, 3, 5)]);
        let mut ctl = SelectionController::new(5);
        let mut log = EventLog::new();

        ctl.pick(&mut grid, Pos::new(2, 1), &mut log).unwrap();
        let outcome = ctl.pick(&mut grid, Pos::new(2, 0), &mut log).unwrap();

        let PickOutcome::Matched(report) = outcome else {
            panic!("expected a match, got {:?}", outcome);
        };
        assert!(report.removed >= 3);
        assert_eq!(log.removed_count(), report.removed);
        assert_eq!(ctl.state(), SelectionState::Empty);
        assert!(grid.is_full());
    }

    #[test]
    fn test_unproductive_swap_is_reverted_on_tick() {
        let mut grid = grid_with(&[]);
        let before = grid.cells().to_vec();
        let mut ctl = SelectionController::new(5);
        let mut log = EventLog::new();

        schedule_revert(&mut ctl, &mut grid);
        assert!(ctl.is_awaiting_revert());
        assert_ne!(grid.cells(), &before[..]);

        let outcome = ctl.tick(&mut grid, &Settled, &mut log);

        assert_eq!(outcome, TickOutcome::Reverted { forced: false });
        assert_eq!(grid.cells(), &before[..]);
        assert_eq!(ctl.state(), SelectionState::Empty);
        assert_eq!(
            log.events(),
            &[BoardEvent::Reverted(Pos::new(0, 0), Pos::new(1, 0))]
        );
    }

    #[test]
    fn test_pick_while_awaiting_revert_is_busy() {
        let mut grid = grid_with(&[]);
        let mut ctl = SelectionController::new(5);
        schedule_revert(&mut ctl, &mut grid);

        assert_eq!(
            ctl.pick(&mut grid, Pos::new(5, 5), &mut ()).unwrap(),
            PickOutcome::Busy
        );
        ctl.click_outside_board();
        assert!(ctl.is_awaiting_revert());
    }

    #[test]
    fn test_revert_waits_for_transition() {
        let mut grid = grid_with(&[]);
        let before = grid.cells().to_vec();
        let mut ctl = SelectionController::new(10);
        schedule_revert(&mut ctl, &mut grid);

        let animating = Cell::new(true);
        let probe = |_: PieceId| animating.get();

        assert_eq!(
            ctl.tick(&mut grid, &probe, &mut ()),
            TickOutcome::Waiting { waited: 1 }
        );
        assert_eq!(
            ctl.tick(&mut grid, &probe, &mut ()),
            TickOutcome::Waiting { waited: 2 }
        );
        assert!(ctl.is_awaiting_revert());

        animating.set(false);
        assert_eq!(
            ctl.tick(&mut grid, &probe, &mut ()),
            TickOutcome::Reverted { forced: false }
        );
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_revert_forced_after_wait_limit() {
        let mut grid = grid_with(&[]);
        let before = grid.cells().to_vec();
        let mut ctl = SelectionController::new(3);
        schedule_revert(&mut ctl, &mut grid);

        let stuck = |_: PieceId| true;
        for waited in 1..=3 {
            assert_eq!(
                ctl.tick(&mut grid, &stuck, &mut ()),
                TickOutcome::Waiting { waited }
            );
        }
        assert_eq!(
            ctl.tick(&mut grid, &stuck, &mut ()),
            TickOutcome::Reverted { forced: true }
        );
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_tick_without_pending_revert_is_idle() {
        let mut grid = grid_with(&[]);
        let mut ctl = SelectionController::new(5);
        assert_eq!(ctl.tick(&mut grid, &Settled, &mut ()), TickOutcome::Idle);
    }

    #[test]
    fn test_click_outside_clears_selection() {
        let mut grid = grid_with(&[]);
        let mut ctl = SelectionController::new(5);
        ctl.pick(&mut grid, Pos::new(0, 0), &mut ()).unwrap();
        ctl.click_outside_board();
        assert_eq!(ctl.state(), SelectionState::Empty);

        // The next pick starts a fresh selection
        assert_eq!(
            ctl.pick(&mut grid, Pos::new(5, 0), &mut ()).unwrap(),
            PickOutcome::Selected(Pos::new(5, 0))
        );
    }

    #[test]
    fn test_out_of_range_pick_leaves_state() {
        let mut grid = grid_with(&[]);
        let mut ctl = SelectionController::new(5);
        ctl.pick(&mut grid, Pos::new(0, 0), &mut ()).unwrap();
        assert!(ctl.pick(&mut grid, Pos::new(8, 0), &mut ()).is_err());
        assert_eq!(ctl.state(), SelectionState::OneSelected(Pos::new(0, 0)));
    }
}
