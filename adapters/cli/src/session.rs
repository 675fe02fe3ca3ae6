//! Wires the world and its systems into a steppable session.

use std::time::Duration;

use hex_city_core::{BuildingId, BuildingKind, Command, Event, HexCoord, PlacementError};
use hex_city_system_builder::{self as builder, Builder, BuilderInput};
use hex_city_system_spawning::{self as spawning, Spawning};
use hex_city_world::{self as world, query, World, WorldConfig};

use crate::scenario::{PlannedPlacement, Scenario};

const SPAWN_INTERVAL: Duration = Duration::from_secs(30);
const MINUTE: Duration = Duration::from_secs(60);

/// Result of asking the session to place a building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlacementOutcome {
    Placed(BuildingId),
    Rejected(PlacementError),
    NotOffered,
    OffBoard,
}

/// Authoritative world plus the pure systems that drive it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    spawning: Spawning,
    builder: Builder,
}

impl Session {
    pub(crate) fn new(
        config: WorldConfig,
        spawning: spawning::Config,
        builder: builder::Config,
    ) -> Self {
        Self {
            world: World::with_config(config),
            spawning: Spawning::new(spawning),
            builder: Builder::new(builder),
        }
    }

    pub(crate) fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(
            WorldConfig {
                accrual: scenario.accrual,
            },
            spawning::Config::new(SPAWN_INTERVAL, scenario.seed),
            builder::Config::default(),
        )
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Advances the clock and lets the spawning system react to it.
    pub(crate) fn tick(&mut self, dt: Duration, events: &mut Vec<Event>) {
        let start = events.len();
        world::apply(&mut self.world, Command::Tick { dt }, events);

        let mut commands = Vec::new();
        self.spawning.handle(&events[start..], &mut commands);
        self.execute(commands, events);

        self.sync_builder(start, events);
    }

    /// Selects the first offer of `kind`, turns it and clicks the anchor's pixel.
    pub(crate) fn place(
        &mut self,
        kind: BuildingKind,
        anchor: HexCoord,
        turns: u8,
        events: &mut Vec<Event>,
    ) -> PlacementOutcome {
        let Some(offer) = query::offer_of_kind(&self.world, kind) else {
            return PlacementOutcome::NotOffered;
        };
        let start = events.len();
        let mut commands = Vec::new();

        self.builder.handle(
            &[],
            BuilderInput {
                select: Some(offer.id),
                ..BuilderInput::default()
            },
            &mut commands,
        );
        for _ in 0..turns {
            self.builder.handle(
                &[],
                BuilderInput {
                    rotate: true,
                    ..BuilderInput::default()
                },
                &mut commands,
            );
        }
        let click = self.builder.config().layout().hex_to_pixel(anchor);
        self.builder.handle(
            &[],
            BuilderInput {
                click: Some(click),
                ..BuilderInput::default()
            },
            &mut commands,
        );

        let clicked = commands
            .iter()
            .any(|command| matches!(command, Command::PlaceBuilding { .. }));
        self.execute(commands, events);
        self.sync_builder(start, events);

        // A rejected placement leaves the offer selected.
        let mut ignored = Vec::new();
        self.builder.handle(
            &[],
            BuilderInput {
                cancel: true,
                ..BuilderInput::default()
            },
            &mut ignored,
        );

        if !clicked {
            return PlacementOutcome::OffBoard;
        }
        events[start..]
            .iter()
            .find_map(|event| match event {
                Event::BuildingPlaced { building, .. } => Some(PlacementOutcome::Placed(*building)),
                Event::PlacementRejected { reason, .. } => {
                    Some(PlacementOutcome::Rejected(*reason))
                }
                _ => None,
            })
            .unwrap_or(PlacementOutcome::NotOffered)
    }

    fn execute(&mut self, commands: Vec<Command>, events: &mut Vec<Event>) {
        for command in commands {
            world::apply(&mut self.world, command, events);
        }
    }

    fn sync_builder(&mut self, start: usize, events: &[Event]) {
        let mut ignored = Vec::new();
        self.builder
            .handle(&events[start..], BuilderInput::default(), &mut ignored);
    }
}

/// Placements the session carried out and those it never could.
#[derive(Debug)]
pub(crate) struct RunReport {
    pub(crate) session: Session,
    pub(crate) outcomes: Vec<(PlannedPlacement, PlacementOutcome)>,
    pub(crate) never_offered: Vec<PlannedPlacement>,
}

/// Plays a scenario to completion, forwarding every event to `log`.
///
/// Placements whose kind is not on offer are retried on every later tick.
pub(crate) fn run(scenario: &Scenario, mut log: impl FnMut(&Event)) -> RunReport {
    let mut session = Session::from_scenario(scenario);
    let tick = Duration::from_secs(scenario.tick_seconds);
    let end = MINUTE * u32::try_from(scenario.duration_minutes).unwrap_or(u32::MAX);

    let mut pending = scenario.placements.clone();
    pending.sort_by_key(|placement| placement.minute);
    let mut outcomes = Vec::new();
    let mut events = Vec::new();

    loop {
        let minute = query::clock(session.world()).as_secs() / MINUTE.as_secs();
        let mut waiting = Vec::new();
        for placement in pending {
            if placement.minute > minute {
                waiting.push(placement);
                continue;
            }
            match session.place(placement.kind, placement.anchor(), placement.turns, &mut events) {
                PlacementOutcome::NotOffered => waiting.push(placement),
                outcome => outcomes.push((placement, outcome)),
            }
        }
        pending = waiting;

        let clock = query::clock(session.world());
        if clock >= end {
            events.iter().for_each(&mut log);
            break;
        }
        session.tick(tick.min(end - clock), &mut events);
        events.drain(..).for_each(|event| log(&event));
    }

    RunReport {
        session,
        outcomes,
        never_offered: pending,
    }
}
