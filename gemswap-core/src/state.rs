//! State export/import: a board as a flat list of occupied cells

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::grid::Grid;
use crate::piece::{GemType, Pos, Variant, EMPTY_TYPE};

/// One occupied cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellState {
    pub kind: GemType,
    pub x: usize,
    pub y: usize,
    #[serde(default)]
    pub variant: Variant,
}

/// Every occupied cell, row-major
pub fn export_state(grid: &Grid) -> Vec<CellState> {
    grid.pieces()
        .map(|p| CellState {
            kind: p.kind,
            x: p.pos.x,
            y: p.pos.y,
            variant: p.variant,
        })
        .collect()
}

/// Rebuild a grid from exported cells. Order is irrelevant; cells not
/// listed become empty slots.
pub fn import_state(
    width: usize,
    height: usize,
    gem_types: GemType,
    cells: &[CellState],
    seed: Option<u64>,
) -> Result<Grid, StateError> {
    let mut grid = Grid::empty(width, height, gem_types, seed)?;
    let mut seen: FxHashSet<Pos> = FxHashSet::default();

    for cell in cells {
        let pos = Pos::new(cell.x, cell.y);
        if !grid.contains(pos) {
            return Err(StateError::OutOfRange {
                x: cell.x,
                y: cell.y,
                width,
                height,
            });
        }
        if cell.kind == EMPTY_TYPE || cell.kind > gem_types {
            return Err(StateError::UnknownType {
                x: cell.x,
                y: cell.y,
                kind: cell.kind,
                max: gem_types,
            });
        }
        if !seen.insert(pos) {
            return Err(StateError::DuplicateCell { x: cell.x, y: cell.y });
        }

        grid.place(pos, cell.kind);
        grid.piece_mut(pos).variant = cell.variant;
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn sorted(mut cells: Vec<CellState>) -> Vec<CellState> {
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }

    #[test]
    fn test_round_trip_full_board() {
        for seed in 0..10 {
            let grid = Grid::new(7, 5, 6, Some(seed)).unwrap();
            let exported = export_state(&grid);
            assert_eq!(exported.len(), 35);

            let restored = import_state(7, 5, 6, &exported, None).unwrap();
            assert_eq!(restored.kind_rows(), grid.kind_rows());
            assert_eq!(sorted(export_state(&restored)), sorted(exported));
        }
    }

    #[test]
    fn test_round_trip_ignores_order_and_keeps_holes() {
        let grid = Grid::from_rows(&[vec![1, 0, 3], vec![4, 5, 0], vec![7, 1, 2]], 7, None).unwrap();
        let mut exported = export_state(&grid);
        assert_eq!(exported.len(), 7);
        exported.reverse();

        let restored = import_state(3, 3, 7, &exported, None).unwrap();
        assert_eq!(restored.kind_rows(), grid.kind_rows());
        assert!(restored.get(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_variant_survives() {
        let cells = [
            CellState { kind: 2, x: 0, y: 0, variant: Variant::Hyper },
            CellState { kind: 3, x: 2, y: 2, variant: Variant::Explosive },
        ];
        let grid = import_state(3, 3, 4, &cells, None).unwrap();
        assert!(grid.get(0, 0).unwrap().is_hyper());
        assert!(grid.get(2, 2).unwrap().is_explosive());
        assert_eq!(sorted(export_state(&grid)), cells.to_vec());
    }

    #[test]
    fn test_rejects_bad_cells() {
        let cell = |kind, x, y| CellState { kind, x, y, variant: Variant::None };

        assert!(matches!(
            import_state(3, 3, 4, &[cell(1, 3, 0)], None),
            Err(StateError::OutOfRange { x: 3, y: 0, .. })
        ));
        assert_eq!(
            import_state(3, 3, 4, &[cell(1, 1, 1), cell(2, 1, 1)], None).unwrap_err(),
            StateError::DuplicateCell { x: 1, y: 1 }
        );
        assert!(matches!(
            import_state(3, 3, 4, &[cell(5, 0, 0)], None),
            Err(StateError::UnknownType { kind: 5, max: 4, .. })
        ));
        assert!(matches!(
            import_state(3, 3, 4, &[cell(0, 0, 0)], None),
            Err(StateError::UnknownType { kind: 0, .. })
        ));
        assert_eq!(
            import_state(1, 3, 4, &[], None).unwrap_err(),
            StateError::Grid(GridError::InvalidDimensions { width: 1, height: 3 })
        );
    }
}
