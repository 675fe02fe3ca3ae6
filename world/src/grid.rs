//! Sparse occupancy map over the unbounded hex grid.

use std::collections::HashMap;

use hex_city_core::{BuildingId, HexCoord};

/// Maps occupied cells to the building that owns them. Absent cells are empty.
#[derive(Clone, Debug, Default)]
pub(crate) struct HexGrid {
    cells: HashMap<HexCoord, BuildingId>,
}

impl HexGrid {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reports whether every provided cell is free.
    pub(crate) fn can_place(&self, cells: &[HexCoord]) -> bool {
        cells.iter().all(|cell| !self.cells.contains_key(cell))
    }

    /// Claims the provided cells for `building`.
    ///
    /// Callers validate with [`HexGrid::can_place`] first; an occupied cell
    /// is never reassigned.
    pub(crate) fn register(&mut self, building: BuildingId, cells: &[HexCoord]) {
        for cell in cells {
            let _ = self.cells.entry(*cell).or_insert(building);
        }
    }

    pub(crate) fn occupant(&self, cell: HexCoord) -> Option<BuildingId> {
        self.cells.get(&cell).copied()
    }

    /// Occupied cells sorted by coordinate.
    pub(crate) fn sorted_cells(&self) -> Vec<(HexCoord, BuildingId)> {
        let mut cells: Vec<(HexCoord, BuildingId)> = self
            .cells
            .iter()
            .map(|(cell, building)| (*cell, *building))
            .collect();
        cells.sort_unstable_by_key(|(cell, _)| *cell);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_accepts_any_cells() {
        let grid = HexGrid::new();
        assert!(grid.can_place(&[HexCoord::new(-1000, 1000), HexCoord::new(0, 0)]));
        assert_eq!(grid.occupant(HexCoord::new(0, 0)), None);
    }

    #[test]
    fn registered_cells_block_overlapping_footprints() {
        let mut grid = HexGrid::new();
        let owner = BuildingId::new(3);
        grid.register(owner, &[HexCoord::new(0, 0), HexCoord::new(1, 0)]);

        assert_eq!(grid.occupant(HexCoord::new(1, 0)), Some(owner));
        assert!(!grid.can_place(&[HexCoord::new(2, 0), HexCoord::new(1, 0)]));
        assert!(grid.can_place(&[HexCoord::new(2, 0), HexCoord::new(3, 0)]));
    }

    #[test]
    fn register_never_steals_a_cell() {
        let mut grid = HexGrid::new();
        grid.register(BuildingId::new(0), &[HexCoord::new(0, 0)]);
        grid.register(BuildingId::new(1), &[HexCoord::new(0, 0)]);
        assert_eq!(grid.occupant(HexCoord::new(0, 0)), Some(BuildingId::new(0)));
        assert_eq!(grid.sorted_cells().len(), 1);
    }
}
