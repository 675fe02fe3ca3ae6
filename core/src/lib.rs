#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hex City engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

pub mod catalog;
pub mod hex;

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{BuildingKind, ParseKindError, Quota};
pub use hex::{HexCoord, HexLayout, Viewport, HEX_DIRECTIONS};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Hex City.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock and accrues income for the elapsed time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a pending offer be placed with its anchor at `anchor`.
    PlaceBuilding {
        /// Offer selected for placement.
        offer: OfferId,
        /// Cell that receives the footprint's anchor offset.
        anchor: HexCoord,
    },
    /// Requests that one offer per listed kind be appended to the pool.
    OfferBuildings {
        /// Kinds to offer; kinds without remaining quota are skipped.
        kinds: Vec<BuildingKind>,
    },
    /// Turns a pending offer by sixty degrees. Purely cosmetic.
    RotateOffer {
        /// Offer to rotate.
        offer: OfferId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Simulation clock after the tick.
        clock: Duration,
    },
    /// Reports the income credited by a tick.
    IncomeAccrued {
        /// Points gained during the tick.
        amount: f64,
        /// Total score after crediting the tick.
        total: f64,
    },
    /// Confirms that a building was placed onto the grid.
    BuildingPlaced {
        /// Identifier assigned to the building by the world.
        building: BuildingId,
        /// Offer that was consumed by the placement.
        offer: OfferId,
        /// Kind of building that was placed.
        kind: BuildingKind,
        /// Anchor cell of the footprint.
        anchor: HexCoord,
    },
    /// Reports a one-off score award granted on placement.
    ScoreAwarded {
        /// Building whose placement earned the award.
        building: BuildingId,
        /// Points credited.
        amount: f64,
    },
    /// Announces that the city-wide timed bonus is active.
    TimedBonusActivated {
        /// Simulation time at which the bonus lapses.
        expires_at: Duration,
    },
    /// Announces that the city-wide timed bonus lapsed.
    TimedBonusExpired,
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Offer named in the request.
        offer: OfferId,
        /// Anchor named in the request.
        anchor: HexCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an offer joined the availability pool.
    OfferAdded {
        /// Identifier assigned to the offer.
        offer: OfferId,
        /// Kind of building offered.
        kind: BuildingKind,
    },
    /// Confirms that an offer left the availability pool.
    OfferRemoved {
        /// Identifier of the removed offer.
        offer: OfferId,
        /// Kind of building that was offered.
        kind: BuildingKind,
    },
    /// Confirms that an offer was turned.
    OfferRotated {
        /// Identifier of the rotated offer.
        offer: OfferId,
        /// Orientation after the turn.
        rotation: Rotation,
    },
    /// Announces that a kind used up its quota and will not be offered again.
    QuotaExhausted {
        /// Kind whose quota reached zero.
        kind: BuildingKind,
    },
}

/// Unique identifier assigned to a placed building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(u32);

impl BuildingId {
    /// Creates a new building identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pending offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(u32);

impl OfferId {
    /// Creates a new offer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cosmetic orientation of a building in sixty degree steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation(u8);

impl Rotation {
    /// Number of distinct orientations.
    pub const STEPS: u8 = 6;

    /// Orientation after one further sixty degree turn.
    #[must_use]
    pub const fn turned(self) -> Self {
        Self((self.0 + 1) % Self::STEPS)
    }

    /// Orientation expressed in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.0 as u16 * 60
    }
}

/// How elapsed time scales income when it is credited to the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualMode {
    /// Income grows linearly with elapsed minutes.
    #[default]
    Linear,
    /// Base income is scaled by elapsed minutes twice, as in the original
    /// game. Identical to [`AccrualMode::Linear`] for one-minute ticks.
    Quadratic,
}

impl fmt::Display for AccrualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Quadratic => f.write_str("quadratic"),
        }
    }
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// No pending offer with the provided identifier exists.
    #[error("offer is not in the availability pool")]
    UnknownOffer,
    /// The requested footprint overlaps an occupied cell.
    #[error("footprint overlaps an occupied cell")]
    Occupied,
}

/// Immutable representation of a placed building used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingSnapshot {
    /// Identifier allocated to the building by the world.
    pub id: BuildingId,
    /// Kind of building.
    pub kind: BuildingKind,
    /// Cells covered by the building; the first entry is the anchor.
    pub cells: Vec<HexCoord>,
    /// Cosmetic orientation carried over from the offer.
    pub rotation: Rotation,
    /// Simulation time at which the building was placed.
    pub placed_at: Duration,
    /// Additive per-minute bonus accumulated by a Daisy.
    pub daisy_bonus: f64,
}

/// Immutable representation of a pending offer used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfferSnapshot {
    /// Identifier allocated to the offer by the world.
    pub id: OfferId,
    /// Kind of building offered.
    pub kind: BuildingKind,
    /// Cosmetic orientation selected by the player.
    pub rotation: Rotation,
    /// Placements of this kind that remain, shared by all its offers.
    pub remaining: Quota,
}
