//! The board grid: owns every piece and the spawn RNG
//!
//! Cells are stored row-major in a flat vector (`y * width + x`). Every slot
//! always holds a `Piece`; empty slots hold the sentinel with
//! `Lifecycle::Empty`, so upper layers never see a hole.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GridError;
use crate::piece::{GemType, Lifecycle, Piece, PieceId, Pos, EMPTY_TYPE};

/// Smallest playable side length
pub const MIN_SIDE: usize = 3;

/// The board
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    gem_types: GemType,
    cells: Vec<Piece>,
    rng: ChaCha8Rng,
    next_id: u32,
}

impl Grid {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Board filled with uniformly random gems
    pub fn new(
        width: usize,
        height: usize,
        gem_types: GemType,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::empty(width, height, gem_types, seed)?;
        for y in 0..height {
            grid.fill_row(y);
        }
        Ok(grid)
    }

    /// Board with every slot empty
    pub fn empty(
        width: usize,
        height: usize,
        gem_types: GemType,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        validate(width, height, gem_types)?;

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Piece::empty(Pos::new(x, y))))
            .collect();

        Ok(Self {
            width,
            height,
            gem_types,
            cells,
            rng: create_rng(seed),
            next_id: 1,
        })
    }

    /// Board from a row-major type matrix (`rows[y][x]`); type 0 is an empty slot
    pub fn from_rows(
        rows: &[Vec<GemType>],
        gem_types: GemType,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);

        if rows.iter().any(|r| r.len() != width) {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let mut grid = Self::empty(width, height, gem_types, seed)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &kind) in row.iter().enumerate() {
                grid.place(Pos::new(x, y), kind);
            }
        }
        Ok(grid)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of distinct gem types spawned (N)
    pub fn gem_types(&self) -> GemType {
        self.gem_types
    }

    /// Piece at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Result<&Piece, GridError> {
        let idx = self.index(Pos::new(x, y))?;
        Ok(&self.cells[idx])
    }

    /// Piece at an already validated position
    pub(crate) fn at(&self, pos: Pos) -> &Piece {
        &self.cells[pos.y * self.width + pos.x]
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Locate a piece by identity
    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.cells.iter().find(|p| p.id == Some(id))
    }

    /// All slots, row-major, including empty ones
    pub fn cells(&self) -> &[Piece] {
        &self.cells
    }

    /// Occupied slots only
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().filter(|p| !p.is_empty())
    }

    pub fn row(&self, y: usize) -> &[Piece] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn column(&self, x: usize) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().skip(x).step_by(self.width)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|p| p.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Type matrix `rows[y][x]` (0 for empty slots)
    pub fn kind_rows(&self) -> Vec<Vec<GemType>> {
        (0..self.height)
            .map(|y| self.row(y).iter().map(|p| p.kind).collect())
            .collect()
    }

    /// Dense view of matchable types for the solvability scan
    pub fn kinds(&self) -> KindView {
        KindView {
            width: self.width,
            height: self.height,
            kinds: self.cells.iter().map(Piece::match_kind).collect(),
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Exchange two slots. Any two cells may be exchanged; adjacency is the
    /// caller's rule to enforce. Swapping the same pair twice is a no-op.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        self.index(a)?;
        self.index(b)?;
        self.swap_slots(a, b);
        Ok(())
    }

    /// `swap` for cells already known to be on the board
    pub(crate) fn swap_slots(&mut self, a: Pos, b: Pos) {
        debug_assert!(self.contains(a) && self.contains(b));
        let ia = a.y * self.width + a.x;
        let ib = b.y * self.width + b.x;

        self.cells.swap(ia, ib);
        self.cells[ia].pos = a;
        self.cells[ib].pos = b;

        tracing::trace!("swap ({}, {}) <-> ({}, {})", a.x, a.y, b.x, b.y);
    }

    /// Put a fresh random gem (type in 1..=N) into a slot
    pub fn spawn(&mut self, pos: Pos) -> Result<Piece, GridError> {
        let idx = self.index(pos)?;
        let kind = self.rng.gen_range(1..=self.gem_types);
        let piece = Piece::new(self.next_piece_id(), kind, pos);
        self.cells[idx] = piece;
        Ok(piece)
    }

    /// Spawn into every empty slot of a row, returning the new pieces
    pub fn fill_row(&mut self, y: usize) -> Vec<Piece> {
        let mut spawned = Vec::new();
        for x in 0..self.width {
            let pos = Pos::new(x, y);
            if self.at(pos).is_empty() {
                if let Ok(piece) = self.spawn(pos) {
                    spawned.push(piece);
                }
            }
        }
        spawned
    }

    /// Flag a piece for removal; it stops matching immediately
    pub fn mark_pending(&mut self, pos: Pos) -> Result<(), GridError> {
        let idx = self.index(pos)?;
        if !self.cells[idx].is_empty() {
            self.cells[idx].lifecycle = Lifecycle::PendingRemoval;
        }
        Ok(())
    }

    /// Turn a slot into the empty sentinel, returning what was there
    pub fn clear(&mut self, pos: Pos) -> Result<Option<Piece>, GridError> {
        let idx = self.index(pos)?;
        let old = std::mem::replace(&mut self.cells[idx], Piece::empty(pos));
        Ok((!old.is_empty()).then_some(old))
    }

    /// Place a gem of a given type (0 leaves the slot empty)
    pub(crate) fn place(&mut self, pos: Pos, kind: GemType) {
        let idx = pos.y * self.width + pos.x;
        self.cells[idx] = if kind == EMPTY_TYPE {
            Piece::empty(pos)
        } else {
            Piece::new(self.next_piece_id(), kind, pos)
        };
    }

    pub(crate) fn piece_mut(&mut self, pos: Pos) -> &mut Piece {
        let idx = pos.y * self.width + pos.x;
        &mut self.cells[idx]
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn index(&self, pos: Pos) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfRange {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.y * self.width + pos.x)
    }

    fn next_piece_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// True iff the two pieces are one orthogonal step apart
pub fn is_adjacent(a: &Piece, b: &Piece) -> bool {
    a.pos.is_adjacent(b.pos)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let line: Vec<String> = self
                .row(y)
                .iter()
                .map(|p| match p.lifecycle {
                    Lifecycle::Empty => ".".to_string(),
                    _ => p.kind.to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

// ============================================================================
// KIND VIEW
// ============================================================================

/// Matchable type per cell, column `x`, row `y`; 0 never matches
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindView {
    width: usize,
    height: usize,
    kinds: Vec<GemType>,
}

impl KindView {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> GemType {
        self.kinds[y * self.width + x]
    }

    /// Swap the roles of rows and columns
    pub fn transposed(&self) -> KindView {
        let mut kinds = Vec::with_capacity(self.kinds.len());
        for x in 0..self.width {
            for y in 0..self.height {
                kinds.push(self.get(x, y));
            }
        }
        KindView {
            width: self.height,
            height: self.width,
            kinds,
        }
    }
}

fn validate(width: usize, height: usize, gem_types: GemType) -> Result<(), GridError> {
    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(GridError::InvalidDimensions { width, height });
    }
    if gem_types < 2 {
        return Err(GridError::InvalidTypeCount(gem_types));
    }
    Ok(())
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
