//! Authoritative state for buildings that have been placed.

use std::{collections::BTreeMap, time::Duration};

use hex_city_core::{BuildingId, BuildingKind, BuildingSnapshot, HexCoord, Rotation};

/// Placed building stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct BuildingState {
    /// Identifier allocated by the world for the building.
    pub(crate) id: BuildingId,
    /// Kind of building that was placed.
    pub(crate) kind: BuildingKind,
    /// Cells occupied by the building, anchor first.
    pub(crate) cells: Vec<HexCoord>,
    /// Orientation carried over from the consumed offer.
    pub(crate) rotation: Rotation,
    /// Simulation time at which the building was placed.
    pub(crate) placed_at: Duration,
    /// Additive bonus recomputed every tick for Daisies.
    pub(crate) daisy_bonus: f64,
}

impl BuildingState {
    /// Cell that anchors the footprint.
    pub(crate) fn anchor(&self) -> Option<HexCoord> {
        self.cells.first().copied()
    }

    pub(crate) fn snapshot(&self) -> BuildingSnapshot {
        BuildingSnapshot {
            id: self.id,
            kind: self.kind,
            cells: self.cells.clone(),
            rotation: self.rotation,
            placed_at: self.placed_at,
            daisy_bonus: self.daisy_bonus,
        }
    }
}

/// Registry that stores placed buildings and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct BuildingRegistry {
    entries: BTreeMap<BuildingId, BuildingState>,
    next_building_id: BuildingId,
}

impl BuildingRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_building_id: BuildingId::new(0),
        }
    }

    /// Records a newly placed building and returns its identifier.
    pub(crate) fn insert(
        &mut self,
        kind: BuildingKind,
        cells: Vec<HexCoord>,
        rotation: Rotation,
        placed_at: Duration,
    ) -> BuildingId {
        let id = self.next_building_id;
        self.next_building_id = BuildingId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            BuildingState {
                id,
                kind,
                cells,
                rotation,
                placed_at,
                daisy_bonus: 0.0,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: BuildingId) -> Option<&BuildingState> {
        self.entries.get(&id)
    }

    /// Iterates over buildings in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &BuildingState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut BuildingState> {
        self.entries.values_mut()
    }

    /// Income every placed building earns in an hour, ignoring bonuses.
    pub(crate) fn hourly_income(&self) -> f64 {
        self.iter()
            .map(|building| building.kind.base_income_rate() * 60.0)
            .sum()
    }
}
