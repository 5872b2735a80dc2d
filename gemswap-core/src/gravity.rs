//! Gravity: empty slots bubble up to row 0 one layer at a time, with the top
//! row refilled after every layer

use crate::grid::Grid;
use crate::piece::{Piece, Pos};

/// Result of one `resolve` call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GravityReport {
    /// Compaction passes that moved something
    pub passes: usize,
    /// Pieces created on row 0 during the refills
    pub spawned: Vec<Piece>,
}

/// One compaction pass.
///
/// Finds the first row (from 1 down) holding an empty slot, swaps every
/// empty slot of that row with the piece directly above it and stops.
/// Returns false when rows 1..H hold no empty slot.
pub fn compaction_pass(grid: &mut Grid) -> bool {
    for y in 1..grid.height() {
        let empties: Vec<usize> = grid
            .row(y)
            .iter()
            .filter(|p| p.is_empty())
            .map(|p| p.pos.x)
            .collect();

        if empties.is_empty() {
            continue;
        }

        for x in empties {
            grid.swap_slots(Pos::new(x, y), Pos::new(x, y - 1));
        }
        return true;
    }
    false
}

/// Settle the board: compaction passes interleaved with row 0 refills.
///
/// Refilling after every pass (not once at the end) lets fresh gems fall
/// alongside older ones, which decides what the next scan can match.
pub fn resolve(grid: &mut Grid) -> GravityReport {
    let mut report = GravityReport::default();

    while compaction_pass(grid) {
        report.passes += 1;
        report.spawned.extend(grid.fill_row(0));
    }

    // Row 0 itself is never compacted, so top it up once more
    report.spawned.extend(grid.fill_row(0));

    if report.passes > 0 {
        tracing::debug!(
            "gravity: {} passes, {} spawned",
            report.passes,
            report.spawned.len()
        );
    }

    report
}
