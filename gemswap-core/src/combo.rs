//! Combo detection: runs of three or more equal gems along a row or column

use rustc_hash::FxHashSet;

use crate::grid::Grid;
use crate::piece::{Lifecycle, Piece, PieceId, Pos};

/// Shortest run that counts as a combo
pub const MIN_COMBO_LENGTH: usize = 3;

/// Pieces removed by one scan (union of every qualifying run)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Combo {
    pieces: Vec<Piece>,
}

impl Combo {
    /// Number of distinct pieces in the combo
    pub fn count(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces in row-major order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.pieces.iter().map(|p| p.pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.pieces.iter().any(|p| p.pos == pos)
    }
}

/// Find every run without touching the board
pub fn detect(grid: &Grid) -> Combo {
    let mut seen: FxHashSet<PieceId> = FxHashSet::default();
    let mut pieces = Vec::new();
    let mut collect = |run: &[&Piece]| {
        for piece in run {
            if let Some(id) = piece.id {
                if seen.insert(id) {
                    pieces.push(**piece);
                }
            }
        }
    };

    // Columns first, then rows; a piece in both directions is kept once
    for x in 0..grid.width() {
        sweep_line(grid.column(x), &mut collect);
    }
    for y in 0..grid.height() {
        sweep_line(grid.row(y).iter(), &mut collect);
    }

    pieces.sort_by_key(|p| (p.pos.y, p.pos.x));
    Combo { pieces }
}

/// Find every run and mark its pieces `PendingRemoval`
///
/// Marked pieces no longer match, so scanning again without new runs
/// returns an empty combo.
pub fn scan(grid: &mut Grid) -> Combo {
    let combo = detect(grid);

    for piece in &combo.pieces {
        grid.piece_mut(piece.pos).lifecycle = Lifecycle::PendingRemoval;
    }

    if !combo.is_empty() {
        tracing::debug!("combo: {} pieces", combo.count());
    }

    combo
}

/// Empty the slots of a combo's pieces, returning the removed pieces
pub fn remove(grid: &mut Grid, combo: &Combo) -> Vec<Piece> {
    combo
        .positions()
        .filter_map(|pos| grid.clear(pos).ok().flatten())
        .collect()
}

/// Walk one line accumulating equal matchable types. A run is flushed when
/// the type changes and once more after the last cell, so a run touching
/// the board edge is never lost.
fn sweep_line<'a, I, F>(line: I, flush: &mut F)
where
    I: Iterator<Item = &'a Piece>,
    F: FnMut(&[&'a Piece]),
{
    let mut run: Vec<&Piece> = Vec::new();

    for piece in line {
        let extends = piece.is_matchable()
            && run.last().map(|prev| prev.kind == piece.kind).unwrap_or(false);

        if extends {
            run.push(piece);
            continue;
        }

        if run.len() >= MIN_COMBO_LENGTH {
            flush(&run);
        }
        run.clear();
        if piece.is_matchable() {
            run.push(piece);
        }
    }

    if run.len() >= MIN_COMBO_LENGTH {
        flush(&run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::GemType;

    /// 8x8 pattern with four types and no run or move anywhere
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
        Grid::from_rows(&rows, 7, Some(1)).unwrap()
    }

    #[test]
    fn test_row_of_three_at_top() {
        let mut grid = grid_with(&[(0, 0, 5), (1, 0, 5), (2, 0, 5)]);
        let combo = scan(&mut grid);

        assert_eq!(combo.count(), 3);
        let positions: Vec<Pos> = combo.positions().collect();
        assert_eq!(positions, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]);
    }

    #[test]
    fn test_striped_board_has_no_combo() {
        let mut grid = grid_with(&[]);
        let combo = scan(&mut grid);
        assert!(combo.is_empty());
        assert_eq!(combo.count(), 0);
    }

    #[test]
    fn test_run_touching_bottom_edge_is_flushed() {
        let mut grid = grid_with(&[(4, 5, 6), (4, 6, 6), (4, 7, 6)]);
        let combo = scan(&mut grid);
        assert_eq!(combo.count(), 3);
        assert!(combo.contains(Pos::new(4, 7)));
    }

    #[test]
    fn test_run_touching_right_edge_is_flushed() {
        let mut grid = grid_with(&[(4, 3, 6), (5, 3, 6), (6, 3, 6), (7, 3, 6)]);
        assert_eq!(scan(&mut grid).count(), 4);
    }

    #[test]
    fn test_pairs_do_not_count() {
        let mut grid = grid_with(&[(1, 1, 6), (2, 1, 6), (5, 5, 7), (5, 6, 7)]);
        assert!(scan(&mut grid).is_empty());
    }

    #[test]
    fn test_cross_counts_shared_piece_once() {
        // Horizontal 5-run through (3,3) plus vertical 3-run through it
        let mut grid = grid_with(&[
            (1, 3, 6),
            (2, 3, 6),
            (3, 3, 6),
            (4, 3, 6),
            (5, 3, 6),
            (3, 2, 6),
            (3, 4, 6),
        ]);
        assert_eq!(scan(&mut grid).count(), 7);
    }

    #[test]
    fn test_full_line_run() {
        let line: Vec<(usize, usize, GemType)> = (0..8).map(|x| (x, 7, 6)).collect();
        let mut grid = grid_with(&line);
        assert_eq!(scan(&mut grid).count(), 8);
    }

    #[test]
    fn test_sentinel_breaks_runs() {
        // 6 6 . 6 with an empty slot in the middle: no run
        let mut grid = grid_with(&[(0, 2, 6), (1, 2, 6), (2, 2, 0), (3, 2, 6)]);
        assert!(scan(&mut grid).is_empty());

        // A line of empty slots never matches either
        let mut grid = grid_with(&[(0, 4, 0), (1, 4, 0), (2, 4, 0)]);
        assert!(scan(&mut grid).is_empty());
    }

    #[test]
    fn test_scan_marks_pending_and_is_idempotent() {
        let mut grid = grid_with(&[(2, 4, 7), (2, 5, 7), (2, 6, 7)]);

        let first = scan(&mut grid);
        assert_eq!(first.count(), 3);
        for pos in first.positions() {
            assert_eq!(grid.at(pos).lifecycle, Lifecycle::PendingRemoval);
        }

        assert!(scan(&mut grid).is_empty());
        assert!(scan(&mut grid).is_empty());
    }

    #[test]
    fn test_detect_does_not_mark() {
        let grid = grid_with(&[(0, 0, 5), (1, 0, 5), (2, 0, 5)]);
        assert_eq!(detect(&grid).count(), 3);
        assert_eq!(grid.at(Pos::new(0, 0)).lifecycle, Lifecycle::Active);
    }

    #[test]
    fn test_remove_empties_slots() {
        let mut grid = grid_with(&[(0, 0, 5), (1, 0, 5), (2, 0, 5)]);
        let combo = scan(&mut grid);
        let removed = remove(&mut grid, &combo);

        assert_eq!(removed.len(), 3);
        assert_eq!(grid.empty_count(), 3);
        assert!(grid.at(Pos::new(1, 0)).is_empty());
        assert!(scan(&mut grid).is_empty());
    }

    #[test]
    fn test_detects_every_maximal_run_on_random_boards() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let rows: Vec<Vec<GemType>> = (0..6)
                .map(|_| (0..7).map(|_| rng.gen_range(1..=4)).collect())
                .collect();
            let grid = Grid::from_rows(&rows, 4, Some(seed)).unwrap();
            let combo = detect(&grid);

            // A cell belongs to a combo iff it sits in some window of three
            // equal cells along a row or column
            for y in 0..6 {
                for x in 0..7 {
                    let k = rows[y][x];
                    let in_row = (0..7usize).any(|s| {
                        s + 2 < 7 && (s..s + 3).contains(&x) && (s..s + 3).all(|i| rows[y][i] == k)
                    });
                    let in_col = (0..6usize).any(|s| {
                        s + 2 < 6 && (s..s + 3).contains(&y) && (s..s + 3).all(|j| rows[j][x] == k)
                    });
                    assert_eq!(
                        combo.contains(Pos::new(x, y)),
                        in_row || in_col,
                        "seed {} cell ({}, {})",
                        seed,
                        x,
                        y
                    );
                }
            }
        }
    }
}
