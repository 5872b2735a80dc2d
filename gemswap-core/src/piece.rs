//! Piece definitions and board coordinates

use serde::{Deserialize, Serialize};

/// Gem type identifier (1..=N, 0 is the empty sentinel)
pub type GemType = u8;

/// Reserved type for empty/removed slots. Never part of a match.
pub const EMPTY_TYPE: GemType = 0;

/// Number of distinct gem types on a standard board
pub const DEFAULT_GEM_TYPES: GemType = 7;

/// Board coordinates: `x` is the column, `y` the row (row 0 is the top)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells
    pub fn distance_to(&self, other: Pos) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// One orthogonal step apart
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.distance_to(other) == 1
    }
}

/// Stable identity of a spawned piece (survives swaps and falls)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Capability tag. Hyper and Explosive only change how a piece is drawn;
/// matching and gravity treat every variant alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    None,
    Hyper,
    Explosive,
}

/// Where a piece is in its life on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    Active,
    PendingRemoval,
    Empty,
}

/// A single board tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: Option<PieceId>,
    pub kind: GemType,
    pub pos: Pos,
    pub variant: Variant,
    pub lifecycle: Lifecycle,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: GemType, pos: Pos) -> Self {
        Self {
            id: Some(id),
            kind,
            pos,
            variant: Variant::None,
            lifecycle: Lifecycle::Active,
        }
    }

    /// The empty sentinel for a slot
    pub(crate) fn empty(pos: Pos) -> Self {
        Self {
            id: None,
            kind: EMPTY_TYPE,
            pos,
            variant: Variant::None,
            lifecycle: Lifecycle::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lifecycle == Lifecycle::Empty
    }

    /// Can this piece start or extend a run?
    pub fn is_matchable(&self) -> bool {
        self.lifecycle == Lifecycle::Active && self.kind != EMPTY_TYPE
    }

    /// Type as seen by the matcher: 0 for anything that cannot match
    pub fn match_kind(&self) -> GemType {
        if self.is_matchable() {
            self.kind
        } else {
            EMPTY_TYPE
        }
    }

    pub fn is_hyper(&self) -> bool {
        self.variant == Variant::Hyper
    }

    pub fn is_explosive(&self) -> bool {
        self.variant == Variant::Explosive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(!p.is_adjacent(p)); // distance 0
        assert!(!p.is_adjacent(Pos::new(4, 4))); // diagonal
        assert!(!p.is_adjacent(Pos::new(3, 5))); // two apart
    }

    #[test]
    fn test_distance() {
        assert_eq!(Pos::new(0, 0).distance_to(Pos::new(0, 0)), 0);
        assert_eq!(Pos::new(0, 0).distance_to(Pos::new(2, 3)), 5);
        assert_eq!(Pos::new(5, 1).distance_to(Pos::new(2, 3)), 5);
    }

    #[test]
    fn test_sentinel_never_matches() {
        let empty = Piece::empty(Pos::new(0, 0));
        assert!(empty.is_empty());
        assert!(!empty.is_matchable());

        let mut gem = Piece::new(PieceId(1), 4, Pos::new(1, 0));
        assert!(gem.is_matchable());
        assert_eq!(gem.match_kind(), 4);

        gem.lifecycle = Lifecycle::PendingRemoval;
        assert_eq!(gem.match_kind(), EMPTY_TYPE);
    }

    #[test]
    fn test_variants() {
        let mut gem = Piece::new(PieceId(1), 2, Pos::new(0, 0));
        assert!(!gem.is_hyper() && !gem.is_explosive());
        gem.variant = Variant::Explosive;
        assert!(gem.is_explosive());
        gem.variant = Variant::Hyper;
        assert!(gem.is_hyper());
    }
}
