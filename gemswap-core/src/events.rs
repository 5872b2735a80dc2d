//! Observer hooks fired by the engine
//!
//! Scoring, game-over screens and animation live outside the engine and
//! listen through `BoardObserver`. Every method has a no-op default.

use crate::cascade::CascadeReport;
use crate::piece::{Piece, Pos};

pub trait BoardObserver {
    /// Fired once per piece removed by a combo
    fn on_piece_removed(&mut self, _piece: &Piece) {}

    /// Fired when the solvability scan finds no move
    fn on_no_moves_left(&mut self) {}

    /// Fired after a cascade that removed at least one combo
    fn on_cascade(&mut self, _report: &CascadeReport) {}

    /// Fired when an unproductive swap is undone
    fn on_revert(&mut self, _a: Pos, _b: Pos) {}
}

impl BoardObserver for () {}

impl<T: BoardObserver + ?Sized> BoardObserver for &mut T {
    fn on_piece_removed(&mut self, piece: &Piece) {
        (**self).on_piece_removed(piece);
    }

    fn on_no_moves_left(&mut self) {
        (**self).on_no_moves_left();
    }

    fn on_cascade(&mut self, report: &CascadeReport) {
        (**self).on_cascade(report);
    }

    fn on_revert(&mut self, a: Pos, b: Pos) {
        (**self).on_revert(a, b);
    }
}

/// Fan out to two observers, left first
impl<A: BoardObserver, B: BoardObserver> BoardObserver for (A, B) {
    fn on_piece_removed(&mut self, piece: &Piece) {
        self.0.on_piece_removed(piece);
        self.1.on_piece_removed(piece);
    }

    fn on_no_moves_left(&mut self) {
        self.0.on_no_moves_left();
        self.1.on_no_moves_left();
    }

    fn on_cascade(&mut self, report: &CascadeReport) {
        self.0.on_cascade(report);
        self.1.on_cascade(report);
    }

    fn on_revert(&mut self, a: Pos, b: Pos) {
        self.0.on_revert(a, b);
        self.1.on_revert(a, b);
    }
}

/// Recorded engine event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    PieceRemoved(Piece),
    NoMovesLeft,
    Cascade(CascadeReport),
    Reverted(Pos, Pos),
}

/// Observer that keeps every event in order
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn removed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::PieceRemoved(_)))
            .count()
    }

    pub fn no_moves_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::NoMovesLeft))
            .count()
    }

    /// Drain recorded events
    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

impl BoardObserver for EventLog {
    fn on_piece_removed(&mut self, piece: &Piece) {
        self.events.push(BoardEvent::PieceRemoved(*piece));
    }

    fn on_no_moves_left(&mut self) {
        self.events.push(BoardEvent::NoMovesLeft);
    }

    fn on_cascade(&mut self, report: &CascadeReport) {
        self.events.push(BoardEvent::Cascade(report.clone()));
    }

    fn on_revert(&mut self, a: Pos, b: Pos) {
        self.events.push(BoardEvent::Reverted(a, b));
    }
}
