#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Hex City.

mod buildings;
mod grid;
mod income;
mod pool;

use std::time::Duration;

use hex_city_core::{
    AccrualMode, BuildingId, BuildingKind, Command, Event, HexCoord, OfferId, PlacementError,
    WELCOME_BANNER,
};

use crate::{
    buildings::BuildingRegistry,
    grid::HexGrid,
    income::TickContext,
    pool::AvailabilityPool,
};

/// Lump sum credited when a Bank is placed.
pub const BANK_PLACEMENT_AWARD: f64 = 300.0;

/// Lifetime of the city-wide bonus started by placing a Manege.
pub const TIMED_BONUS_DURATION: Duration = Duration::from_secs(20 * 60);

/// Tunables that alter how the world evolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldConfig {
    /// How elapsed time scales income credited on each tick.
    pub accrual: AccrualMode,
}

/// Represents the authoritative Hex City world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    grid: HexGrid,
    buildings: BuildingRegistry,
    pool: AvailabilityPool,
    score: f64,
    clock: Duration,
    last_income_update: Duration,
    timed_bonus_expiry: Option<Duration>,
}

impl World {
    /// Creates a new Hex City world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world using the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            grid: HexGrid::new(),
            buildings: BuildingRegistry::new(),
            pool: AvailabilityPool::new(),
            score: 0.0,
            clock: Duration::ZERO,
            last_income_update: Duration::ZERO,
            timed_bonus_expiry: None,
        }
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced {
            dt,
            clock: self.clock,
        });

        let tick = TickContext {
            clock: self.clock,
            elapsed: self.clock.saturating_sub(self.last_income_update),
            timed_bonus_active: self
                .timed_bonus_expiry
                .is_some_and(|expiry| self.clock < expiry),
            mode: self.config.accrual,
        };
        let amount = income::accrue(&self.grid, &mut self.buildings, tick);
        self.score += amount;
        out_events.push(Event::IncomeAccrued {
            amount,
            total: self.score,
        });

        if self
            .timed_bonus_expiry
            .is_some_and(|expiry| self.clock >= expiry)
        {
            self.timed_bonus_expiry = None;
            out_events.push(Event::TimedBonusExpired);
        }
        self.last_income_update = self.clock;
    }

    fn place(&mut self, offer: OfferId, anchor: HexCoord, out_events: &mut Vec<Event>) {
        let reject = |reason: PlacementError, out_events: &mut Vec<Event>| {
            out_events.push(Event::PlacementRejected {
                offer,
                anchor,
                reason,
            });
        };

        let Some(pending) = self.pool.offer(offer).copied() else {
            reject(PlacementError::UnknownOffer, out_events);
            return;
        };
        let cells = pending.kind.cells_at(anchor);
        if !self.grid.can_place(&cells) {
            reject(PlacementError::Occupied, out_events);
            return;
        }

        let hourly_income_before = self.buildings.hourly_income();
        let building =
            self.buildings
                .insert(pending.kind, cells.clone(), pending.rotation, self.clock);
        self.grid.register(building, &cells);
        out_events.push(Event::BuildingPlaced {
            building,
            offer,
            kind: pending.kind,
            anchor,
        });

        match pending.kind {
            BuildingKind::Bank => self.award(building, BANK_PLACEMENT_AWARD, out_events),
            BuildingKind::Kmk => self.award(building, hourly_income_before, out_events),
            BuildingKind::Manege => {
                let expires_at = self.clock.saturating_add(TIMED_BONUS_DURATION);
                self.timed_bonus_expiry = Some(expires_at);
                out_events.push(Event::TimedBonusActivated { expires_at });
            }
            _ => {}
        }

        self.pool.consume(offer, out_events);
    }

    fn award(&mut self, building: BuildingId, amount: f64, out_events: &mut Vec<Event>) {
        self.score += amount;
        out_events.push(Event::ScoreAwarded { building, amount });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.advance(dt, out_events),
        Command::PlaceBuilding { offer, anchor } => world.place(offer, anchor, out_events),
        Command::OfferBuildings { kinds } => world.pool.spawn(&kinds, out_events),
        Command::RotateOffer { offer } => {
            if let Some(rotation) = world.pool.rotate(offer) {
                out_events.push(Event::OfferRotated { offer, rotation });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use hex_city_core::{
        BuildingId, BuildingKind, BuildingSnapshot, HexCoord, OfferId, OfferSnapshot, Quota,
    };

    use super::{World, WorldConfig};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> WorldConfig {
        world.config
    }

    /// Reports whether `kind` fits with its anchor at `anchor`.
    #[must_use]
    pub fn can_place(world: &World, kind: BuildingKind, anchor: HexCoord) -> bool {
        world.grid.can_place(&kind.cells_at(anchor))
    }

    /// Returns the building occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: HexCoord) -> Option<BuildingId> {
        world.grid.occupant(cell)
    }

    /// Enumerates occupied cells and their owners in coordinate order.
    #[must_use]
    pub fn occupancy(world: &World) -> Vec<(HexCoord, BuildingId)> {
        world.grid.sorted_cells()
    }

    /// Captures every placed building in identifier order.
    #[must_use]
    pub fn buildings(world: &World) -> Vec<BuildingSnapshot> {
        world.buildings.iter().map(|state| state.snapshot()).collect()
    }

    /// Captures a single placed building.
    #[must_use]
    pub fn building(world: &World, id: BuildingId) -> Option<BuildingSnapshot> {
        world.buildings.get(id).map(|state| state.snapshot())
    }

    /// Captures the pending offers in pool order.
    #[must_use]
    pub fn offers(world: &World) -> Vec<OfferSnapshot> {
        world
            .pool
            .offers()
            .iter()
            .map(|offer| world.pool.snapshot(offer))
            .collect()
    }

    /// Captures a single pending offer.
    #[must_use]
    pub fn offer(world: &World, id: OfferId) -> Option<OfferSnapshot> {
        world.pool.offer(id).map(|offer| world.pool.snapshot(offer))
    }

    /// First pending offer of the provided kind, if any.
    #[must_use]
    pub fn offer_of_kind(world: &World, kind: BuildingKind) -> Option<OfferSnapshot> {
        world
            .pool
            .offers()
            .iter()
            .find(|offer| offer.kind == kind)
            .map(|offer| world.pool.snapshot(offer))
    }

    /// Placements of `kind` that remain for the rest of the session.
    #[must_use]
    pub fn remaining_placements(world: &World, kind: BuildingKind) -> Quota {
        world.pool.remaining(kind)
    }

    /// Score accumulated so far.
    #[must_use]
    pub fn total_score(world: &World) -> f64 {
        world.score
    }

    /// Current simulation clock.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Expiry of the city-wide timed bonus while it is active.
    #[must_use]
    pub fn timed_bonus_expiry(world: &World) -> Option<Duration> {
        world.timed_bonus_expiry
    }

    /// Income all placed buildings earn in an hour, ignoring bonuses.
    #[must_use]
    pub fn hourly_income(world: &World) -> f64 {
        world.buildings.hourly_income()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_city_core::Quota;

    fn offer_of(world: &mut World, kind: BuildingKind) -> OfferId {
        if let Some(offer) = query::offer_of_kind(world, kind) {
            return offer.id;
        }
        let mut events = Vec::new();
        apply(
            world,
            Command::OfferBuildings { kinds: vec![kind] },
            &mut events,
        );
        query::offer_of_kind(world, kind)
            .map(|offer| offer.id)
            .expect("offer spawned")
    }

    fn place(world: &mut World, kind: BuildingKind, anchor: HexCoord) -> Vec<Event> {
        let offer = offer_of(world, kind);
        let mut events = Vec::new();
        apply(world, Command::PlaceBuilding { offer, anchor }, &mut events);
        events
    }

    fn tick(world: &mut World, seconds: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_secs(seconds),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn new_world_is_empty_with_starter_offers() {
        let world = World::new();
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert!(query::occupancy(&world).is_empty());
        assert_eq!(query::offers(&world).len(), 4);
        assert_eq!(query::total_score(&world), 0.0);
        assert_eq!(query::clock(&world), Duration::ZERO);
    }

    #[test]
    fn placement_registers_every_footprint_cell() {
        let mut world = World::new();
        let events = place(&mut world, BuildingKind::Apartment, HexCoord::new(2, 2));

        assert!(matches!(
            events.first(),
            Some(Event::BuildingPlaced {
                kind: BuildingKind::Apartment,
                ..
            })
        ));
        let owner = query::occupant(&world, HexCoord::new(2, 2));
        assert!(owner.is_some());
        assert_eq!(query::occupant(&world, HexCoord::new(3, 2)), owner);
        assert_eq!(query::occupancy(&world).len(), 2);
    }

    #[test]
    fn bank_awards_lump_sum_before_any_tick() {
        let mut world = World::new();
        let _ = place(&mut world, BuildingKind::Bank, HexCoord::new(0, 0));
        assert_eq!(query::total_score(&world), BANK_PLACEMENT_AWARD);
    }

    #[test]
    fn kmk_awards_hour_of_existing_income() {
        let mut world = World::new();
        let _ = place(&mut world, BuildingKind::School, HexCoord::new(0, 0));
        let _ = place(&mut world, BuildingKind::Apartment, HexCoord::new(0, 2));
        let events = place(&mut world, BuildingKind::Kmk, HexCoord::new(0, 4));

        let expected = (60.0 + 150.0) * 60.0;
        assert!(events.contains(&Event::ScoreAwarded {
            building: BuildingId::new(2),
            amount: expected,
        }));
        assert_eq!(query::total_score(&world), expected);
    }

    #[test]
    fn rejected_placement_leaves_state_untouched() {
        let mut world = World::new();
        let _ = place(&mut world, BuildingKind::Bank, HexCoord::new(1, 0));
        let occupancy = query::occupancy(&world);
        let score = query::total_score(&world);
        let offers = query::offers(&world);

        let events = place(&mut world, BuildingKind::Apartment, HexCoord::new(0, 0));

        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::Occupied,
                ..
            }]
        ));
        assert_eq!(query::occupancy(&world), occupancy);
        assert_eq!(query::total_score(&world), score);
        assert_eq!(query::offers(&world), offers);
    }

    #[test]
    fn unknown_offer_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceBuilding {
                offer: OfferId::new(404),
                anchor: HexCoord::new(0, 0),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PlacementRejected {
                offer: OfferId::new(404),
                anchor: HexCoord::new(0, 0),
                reason: PlacementError::UnknownOffer,
            }]
        );
    }

    #[test]
    fn manege_bonus_lasts_twenty_minutes() {
        let mut world = World::new();
        let events = place(&mut world, BuildingKind::Manege, HexCoord::new(0, 0));
        assert!(events.contains(&Event::TimedBonusActivated {
            expires_at: TIMED_BONUS_DURATION,
        }));

        let first = tick(&mut world, 60);
        assert!(first.contains(&Event::IncomeAccrued {
            amount: 112.5,
            total: 112.5,
        }));

        for _ in 1..19 {
            let events = tick(&mut world, 60);
            assert!(!events.contains(&Event::TimedBonusExpired));
        }
        assert_eq!(
            query::timed_bonus_expiry(&world),
            Some(TIMED_BONUS_DURATION)
        );

        let last = tick(&mut world, 60);
        assert!(last.contains(&Event::TimedBonusExpired));
        assert!(last.contains(&Event::IncomeAccrued {
            amount: 75.0,
            total: 112.5 * 19.0 + 75.0,
        }));
        assert_eq!(query::timed_bonus_expiry(&world), None);
    }

    #[test]
    fn second_manege_refreshes_timed_bonus() {
        let mut world = World::new();
        let _ = place(&mut world, BuildingKind::Manege, HexCoord::new(0, 0));
        for _ in 0..10 {
            let _ = tick(&mut world, 60);
        }

        let events = place(&mut world, BuildingKind::Manege, HexCoord::new(3, 0));
        let refreshed = Duration::from_secs(30 * 60);
        assert!(events.contains(&Event::TimedBonusActivated {
            expires_at: refreshed,
        }));
        assert_eq!(query::timed_bonus_expiry(&world), Some(refreshed));

        for minute in 11..30 {
            let events = tick(&mut world, 60);
            assert!(
                !events.contains(&Event::TimedBonusExpired),
                "bonus expired early at minute {minute}"
            );
            if minute == 25 {
                let gained = events.iter().find_map(|event| match event {
                    Event::IncomeAccrued { amount, .. } => Some(*amount),
                    _ => None,
                });
                assert_eq!(gained, Some(2.0 * 75.0 * 1.5));
            }
        }

        let last = tick(&mut world, 60);
        assert_eq!(query::clock(&world), refreshed);
        assert!(last.contains(&Event::TimedBonusExpired));
        assert_eq!(query::timed_bonus_expiry(&world), None);
    }

    #[test]
    fn rotation_is_reported_and_cosmetic() {
        let mut world = World::new();
        let offer = offer_of(&mut world, BuildingKind::Apartment);
        let mut events = Vec::new();
        apply(&mut world, Command::RotateOffer { offer }, &mut events);
        apply(&mut world, Command::RotateOffer { offer }, &mut events);

        let rotation = query::offer(&world, offer).map(|offer| offer.rotation);
        assert_eq!(rotation.map(|rotation| rotation.degrees()), Some(120));

        let mut placed = Vec::new();
        apply(
            &mut world,
            Command::PlaceBuilding {
                offer,
                anchor: HexCoord::new(0, 0),
            },
            &mut placed,
        );
        let building = query::buildings(&world).pop().expect("placed");
        assert_eq!(building.cells, vec![HexCoord::new(0, 0), HexCoord::new(1, 0)]);
        assert_eq!(Some(building.rotation), rotation);
    }

    #[test]
    fn remaining_placements_follow_catalog() {
        let mut world = World::new();
        assert_eq!(
            query::remaining_placements(&world, BuildingKind::Kmk),
            Quota::Limited(5)
        );
        let _ = place(&mut world, BuildingKind::Kmk, HexCoord::new(0, 0));
        assert_eq!(
            query::remaining_placements(&world, BuildingKind::Kmk),
            Quota::Limited(4)
        );
        assert!(query::offer_of_kind(&world, BuildingKind::Kmk).is_some());
    }
}
