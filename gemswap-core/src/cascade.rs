//! Cascade driver: scan, remove, settle, repeat until the board is quiet

use serde::{Deserialize, Serialize};

use crate::combo;
use crate::events::BoardObserver;
use crate::gravity;
use crate::grid::Grid;

/// Summary of one full cascade
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Non-empty scans (1 for a plain combo, more when refills chain)
    pub waves: usize,
    /// Pieces removed over all waves
    pub removed: usize,
    /// Pieces spawned by the refills
    pub spawned: usize,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        self.waves == 0
    }
}

/// Run remove/settle cycles until a scan finds nothing.
///
/// Every removed piece is reported through `on_piece_removed`; a non-empty
/// cascade is summarised once through `on_cascade`.
pub fn cascade<O: BoardObserver + ?Sized>(grid: &mut Grid, observer: &mut O) -> CascadeReport {
    let mut report = CascadeReport::default();

    loop {
        let found = combo::scan(grid);
        if found.is_empty() {
            break;
        }

        report.waves += 1;
        for piece in combo::remove(grid, &found) {
            observer.on_piece_removed(&piece);
            report.removed += 1;
        }

        let settled = gravity::resolve(grid);
        report.spawned += settled.spawned.len();

        tracing::debug!(
            "cascade wave {}: removed {}, spawned {}",
            report.waves,
            found.count(),
            settled.spawned.len()
        );
    }

    if !report.is_empty() {
        observer.on_cascade(&report);
    }

    report
}
