//! Time-driven income accrual with adjacency and city-wide bonuses.

use std::time::Duration;

use hex_city_core::{AccrualMode, BuildingKind};

use crate::{
    buildings::{BuildingRegistry, BuildingState},
    grid::HexGrid,
};

const PARK_ANCHOR_MULTIPLIER: f64 = 0.3;
const PARK_EDGE_BONUS: f64 = 10.0;
const SCHOOL_MULTIPLIER: f64 = 0.2;
const CANDLE_MULTIPLIER: f64 = 1.0;
const TIMED_BONUS_MULTIPLIER: f64 = 0.5;
const DAISY_HOURLY_BONUS: f64 = 5.0;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);

/// Inputs shared by every building during one tick.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TickContext {
    pub(crate) clock: Duration,
    pub(crate) elapsed: Duration,
    pub(crate) timed_bonus_active: bool,
    pub(crate) mode: AccrualMode,
}

/// Bonus terms applied on top of a building's base rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Adjacency {
    pub(crate) multiplier: f64,
    pub(crate) additive: f64,
}

/// Sums the bonuses a building receives from its neighbours.
///
/// Every (own cell, neighbouring cell) contact counts once. Cells owned by
/// the building itself never contribute.
pub(crate) fn adjacency(
    building: &BuildingState,
    grid: &HexGrid,
    buildings: &BuildingRegistry,
) -> Adjacency {
    let mut bonus = Adjacency {
        multiplier: 1.0,
        additive: 0.0,
    };
    let anchor = building.anchor();

    for cell in &building.cells {
        for neighbor in cell.neighbors() {
            let Some(owner) = grid.occupant(neighbor) else {
                continue;
            };
            if owner == building.id {
                continue;
            }
            let Some(neighbor_building) = buildings.get(owner) else {
                continue;
            };

            match neighbor_building.kind {
                BuildingKind::Park => {
                    if Some(*cell) == anchor {
                        bonus.multiplier += PARK_ANCHOR_MULTIPLIER;
                    } else {
                        bonus.additive += PARK_EDGE_BONUS;
                    }
                }
                BuildingKind::School => {
                    if matches!(building.kind, BuildingKind::Kmk | BuildingKind::Manege) {
                        bonus.multiplier += SCHOOL_MULTIPLIER;
                    }
                }
                BuildingKind::Candle => bonus.multiplier += CANDLE_MULTIPLIER,
                _ => {}
            }
        }
    }

    bonus
}

/// Bonus a Daisy has earned for every whole hour it has stood.
pub(crate) fn daisy_bonus(placed_at: Duration, clock: Duration) -> f64 {
    let standing = clock.saturating_sub(placed_at);
    let hours = standing.as_secs() / HOUR.as_secs();
    hours as f64 * DAISY_HOURLY_BONUS
}

/// Credits income for the elapsed time and returns the points gained.
pub(crate) fn accrue(grid: &HexGrid, buildings: &mut BuildingRegistry, tick: TickContext) -> f64 {
    for building in buildings.iter_mut() {
        if building.kind == BuildingKind::Daisy {
            building.daisy_bonus = daisy_bonus(building.placed_at, tick.clock);
        }
    }

    let minutes = tick.elapsed.as_secs_f64() / MINUTE.as_secs_f64();
    let registry: &BuildingRegistry = buildings;

    registry
        .iter()
        .map(|building| {
            let mut bonus = adjacency(building, grid, registry);
            if tick.timed_bonus_active {
                bonus.multiplier += TIMED_BONUS_MULTIPLIER;
            }
            bonus.additive += building.daisy_bonus;

            let rate = building.kind.base_income_rate();
            match tick.mode {
                AccrualMode::Linear => (rate * bonus.multiplier + bonus.additive) * minutes,
                AccrualMode::Quadratic => {
                    (rate * minutes * bonus.multiplier + bonus.additive) * minutes
                }
            }
        })
        .sum()
}
