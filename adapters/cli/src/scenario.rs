//! Scripted sessions loaded from TOML files and command-line flags.

use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use hex_city_core::{AccrualMode, BuildingKind, HexCoord, ParseKindError};
use hex_city_system_spawning as spawning;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TICK_SECONDS: u64 = 60;
const DEFAULT_DURATION_MINUTES: u64 = 60;

/// Problems found while reading placements or validating a scenario.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum ScenarioError {
    #[error("placement `{0}` must look like KIND@Q,R or KIND@Q,R@MINUTE")]
    MalformedPlacement(String),
    #[error(transparent)]
    UnknownKind(#[from] ParseKindError),
    #[error("`{0}` is not a valid axial coordinate")]
    InvalidCoordinate(String),
    #[error("`{0}` is not a valid minute")]
    InvalidMinute(String),
    #[error("tick length must be at least one second")]
    ZeroTickLength,
}

/// Parameters of one headless session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Scenario {
    pub(crate) seed: u64,
    pub(crate) tick_seconds: u64,
    pub(crate) duration_minutes: u64,
    pub(crate) accrual: AccrualMode,
    pub(crate) placements: Vec<PlannedPlacement>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed: spawning::Config::default().rng_seed(),
            tick_seconds: DEFAULT_TICK_SECONDS,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            accrual: AccrualMode::default(),
            placements: Vec::new(),
        }
    }
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid scenario file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Self =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub(crate) fn validate(&self) -> Result<(), ScenarioError> {
        if self.tick_seconds == 0 {
            return Err(ScenarioError::ZeroTickLength);
        }
        Ok(())
    }
}

/// Building the session should place once the clock reaches `minute`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlannedPlacement {
    #[serde(default)]
    pub(crate) minute: u64,
    pub(crate) kind: BuildingKind,
    pub(crate) q: i32,
    pub(crate) r: i32,
    /// Sixty degree turns applied to the offer before it is placed.
    #[serde(default)]
    pub(crate) turns: u8,
}

impl PlannedPlacement {
    pub(crate) const fn anchor(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

impl FromStr for PlannedPlacement {
    type Err = ScenarioError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ScenarioError::MalformedPlacement(value.to_owned());
        let mut parts = value.split('@');
        let kind = parts.next().ok_or_else(malformed)?.parse::<BuildingKind>()?;
        let coordinate = parts.next().ok_or_else(malformed)?;
        let minute = parts.next();
        if parts.next().is_some() {
            return Err(malformed());
        }

        let invalid = || ScenarioError::InvalidCoordinate(coordinate.to_owned());
        let (q, r) = coordinate.split_once(',').ok_or_else(invalid)?;
        let q = q.trim().parse().map_err(|_| invalid())?;
        let r = r.trim().parse().map_err(|_| invalid())?;

        let minute = match minute {
            Some(minute) => minute
                .trim()
                .parse()
                .map_err(|_| ScenarioError::InvalidMinute(minute.to_owned()))?,
            None => 0,
        };

        Ok(Self {
            minute,
            kind,
            q,
            r,
            turns: 0,
        })
    }
}
