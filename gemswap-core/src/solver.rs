//! Solvability scan: is there a single swap that makes a combo?
//!
//! The search is geometric, not a brute-force trial of every swap. Every
//! way a swap can complete a run of three involves either two equal
//! neighbours (a pair) or two equal cells with one gap (a near miss), so the
//! scan visits each cell once and looks for the completing third gem around
//! those two shapes.
//!
//! Scan order is column-major (`x` outer, `y` inner) and the checks at each
//! cell run in a fixed priority, so the first move found is deterministic
//! and doubles as the hint.

use crate::grid::{Grid, KindView};
use crate::piece::{GemType, Piece, Pos, EMPTY_TYPE};

/// First move that creates a combo, as the two pieces to swap.
///
/// The first piece is the slot that receives the matching gem, the second
/// the matching gem itself.
pub fn find_move(grid: &Grid) -> Option<(Piece, Piece)> {
    let (a, b) = find_swap(&grid.kinds())?;
    Some((*grid.at(a), *grid.at(b)))
}

pub fn any_move_exists(grid: &Grid) -> bool {
    find_swap(&grid.kinds()).is_some()
}

/// `find_move` over a bare type view
pub fn find_swap(view: &KindView) -> Option<(Pos, Pos)> {
    let transposed = view.transposed();
    let (w, h) = (view.width(), view.height());

    for x in 0..w {
        for y in 0..h {
            let kind = view.get(x, y);
            if kind == EMPTY_TYPE {
                continue;
            }

            if y + 1 < h && view.get(x, y + 1) == kind {
                if let Some(m) = vertical_completion(view, x, y, kind) {
                    return Some(m);
                }
            }

            if x + 1 < w && view.get(x + 1, y) == kind {
                if let Some(m) = horizontal_completion(&transposed, x, y, kind) {
                    return Some(m);
                }
            }

            if y + 2 < h && view.get(x, y + 2) == kind {
                if let Some(m) = vertical_near_miss(view, x, y, kind) {
                    return Some(m);
                }
            }

            if x + 2 < w && view.get(x + 2, y) == kind {
                if let Some(m) = horizontal_near_miss(view, x, y, kind) {
                    return Some(m);
                }
            }
        }
    }

    None
}

// ============================================================================
// PAIRS
// ============================================================================

/// Pair at (x, y) and (x, y+1). Looks for the third gem around the cell just
/// above the pair, then around the cell just below it. Within each end the
/// priority is straight line, left diagonal, right diagonal.
fn vertical_completion(view: &KindView, x: usize, y: usize, kind: GemType) -> Option<(Pos, Pos)> {
    let w = view.width();
    let h = view.height();
    let is_kind = |cx: usize, cy: usize| view.get(cx, cy) == kind;

    if y > 0 {
        let target = Pos::new(x, y - 1);
        if y > 1 && is_kind(x, y - 2) {
            return Some((target, Pos::new(x, y - 2)));
        }
        if x > 0 && is_kind(x - 1, y - 1) {
            return Some((target, Pos::new(x - 1, y - 1)));
        }
        if x + 1 < w && is_kind(x + 1, y - 1) {
            return Some((target, Pos::new(x + 1, y - 1)));
        }
    }

    if y + 2 < h {
        let target = Pos::new(x, y + 2);
        if y + 3 < h && is_kind(x, y + 3) {
            return Some((target, Pos::new(x, y + 3)));
        }
        if x > 0 && is_kind(x - 1, y + 2) {
            return Some((target, Pos::new(x - 1, y + 2)));
        }
        if x + 1 < w && is_kind(x + 1, y + 2) {
            return Some((target, Pos::new(x + 1, y + 2)));
        }
    }

    None
}

/// Pair at (x, y) and (x+1, y): the vertical search on the transposed view,
/// mapped back.
fn horizontal_completion(
    transposed: &KindView,
    x: usize,
    y: usize,
    kind: GemType,
) -> Option<(Pos, Pos)> {
    let (a, b) = vertical_completion(transposed, y, x, kind)?;
    Some((flip(a), flip(b)))
}

// ============================================================================
// NEAR MISSES
// ============================================================================

/// (x, y) and (x, y+2) share a type; the gap (x, y+1) can take it from the
/// left or the right
fn vertical_near_miss(view: &KindView, x: usize, y: usize, kind: GemType) -> Option<(Pos, Pos)> {
    let gap = Pos::new(x, y + 1);
    if x > 0 && view.get(x - 1, y + 1) == kind {
        return Some((gap, Pos::new(x - 1, y + 1)));
    }
    if x + 1 < view.width() && view.get(x + 1, y + 1) == kind {
        return Some((gap, Pos::new(x + 1, y + 1)));
    }
    None
}

/// (x, y) and (x+2, y) share a type; the gap (x+1, y) can take it from
/// above or below
fn horizontal_near_miss(view: &KindView, x: usize, y: usize, kind: GemType) -> Option<(Pos, Pos)> {
    let gap = Pos::new(x + 1, y);
    if y > 0 && view.get(x + 1, y - 1) == kind {
        return Some((gap, Pos::new(x + 1, y - 1)));
    }
    if y + 1 < view.height() && view.get(x + 1, y + 1) == kind {
        return Some((gap, Pos::new(x + 1, y + 1)));
    }
    None
}

fn flip(pos: Pos) -> Pos {
    Pos::new(pos.y, pos.x)
}
