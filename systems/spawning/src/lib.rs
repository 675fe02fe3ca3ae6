#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for replenishing building offers.

use std::time::Duration;

use hex_city_core::{BuildingKind, Command, Event};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_OFFERS_PER_SPAWN: usize = 3;
const DEFAULT_RNG_SEED: u64 = 0x6865_7863_6974_7921;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    spawn_interval: Duration,
    offers_per_spawn: usize,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            offers_per_spawn: DEFAULT_OFFERS_PER_SPAWN,
            rng_seed,
        }
    }

    /// Overrides how many distinct kinds are sampled per spawn.
    #[must_use]
    pub const fn with_offers_per_spawn(mut self, offers_per_spawn: usize) -> Self {
        self.offers_per_spawn = offers_per_spawn;
        self
    }

    /// Simulated time between spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Seed feeding the kind sampler.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_INTERVAL, DEFAULT_RNG_SEED)
    }
}

/// Pure system that periodically offers a random selection of building kinds.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    offers_per_spawn: usize,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            offers_per_spawn: config.offers_per_spawn,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and emits one offer command per elapsed interval.
    ///
    /// Quota is enforced by the world, so sampled kinds that are exhausted
    /// are still emitted and silently dropped there.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        if self.spawn_interval.is_zero() || self.offers_per_spawn == 0 {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt, .. } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        for _ in 0..self.resolve_spawn_attempts() {
            let kinds = self.sample_kinds();
            out.push(Command::OfferBuildings { kinds });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        let mut attempts = 0;
        while self.accumulator >= self.spawn_interval {
            self.accumulator -= self.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn sample_kinds(&mut self) -> Vec<BuildingKind> {
        let amount = self.offers_per_spawn.min(BuildingKind::ALL.len());
        BuildingKind::ALL
            .choose_multiple(&mut self.rng, amount)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_never_spawns() {
        let mut spawning = Spawning::new(Config::new(Duration::ZERO, 1));
        let mut commands = Vec::new();
        spawning.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(10),
                clock: Duration::from_secs(10),
            }],
            &mut commands,
        );
        assert!(commands.is_empty());
        assert_eq!(spawning.accumulator, Duration::ZERO);
    }

    #[test]
    fn resolves_whole_intervals_and_keeps_remainder() {
        let mut spawning = Spawning::new(Config::default());
        spawning.accumulator = Duration::from_secs(65);
        assert_eq!(spawning.resolve_spawn_attempts(), 2);
        assert_eq!(spawning.accumulator, Duration::from_secs(5));
    }

    #[test]
    fn samples_are_distinct_and_capped() {
        let mut spawning = Spawning::new(Config::default().with_offers_per_spawn(20));
        let kinds = spawning.sample_kinds();
        assert_eq!(kinds.len(), BuildingKind::ALL.len());
        for kind in BuildingKind::ALL {
            assert!(kinds.contains(&kind));
        }
    }
}
