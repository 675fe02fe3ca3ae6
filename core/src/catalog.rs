//! Static definitions for every building kind.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex::HexCoord;

const ANCHOR: HexCoord = HexCoord::new(0, 0);

const PARK_FOOTPRINT: [HexCoord; 6] = [
    ANCHOR,
    HexCoord::new(1, 0),
    HexCoord::new(2, 0),
    HexCoord::new(0, 1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
];
const SINGLE_FOOTPRINT: [HexCoord; 1] = [ANCHOR];
const APARTMENT_FOOTPRINT: [HexCoord; 2] = [ANCHOR, HexCoord::new(1, 0)];
const KMK_FOOTPRINT: [HexCoord; 3] = [ANCHOR, HexCoord::new(1, 0), HexCoord::new(2, 0)];
const MANEGE_FOOTPRINT: [HexCoord; 3] = [ANCHOR, HexCoord::new(1, 0), HexCoord::new(0, 1)];

/// Kinds of buildings that can be offered and placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Six-cell park that boosts adjacent buildings.
    Park,
    /// Bank that pays a one-off lump sum when placed.
    Bank,
    /// School that boosts adjacent Kmk and Manege buildings.
    School,
    /// Two-cell apartment block with the highest base income.
    Apartment,
    /// Daisy whose income grows with every hour it stands.
    Daisy,
    /// Three-cell Kmk that pays an hour of city income when placed.
    Kmk,
    /// Candle that doubles the income multiplier of its neighbours.
    Candle,
    /// Manege that grants a city-wide bonus for twenty minutes.
    Manege,
}

impl BuildingKind {
    /// Every building kind in catalog order.
    pub const ALL: [BuildingKind; 8] = [
        Self::Park,
        Self::Bank,
        Self::School,
        Self::Apartment,
        Self::Daisy,
        Self::Kmk,
        Self::Candle,
        Self::Manege,
    ];

    /// Human readable name used by presenters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Park => "Park",
            Self::Bank => "Bank",
            Self::School => "School",
            Self::Apartment => "Apartment",
            Self::Daisy => "Daisy",
            Self::Kmk => "KMK",
            Self::Candle => "Candle",
            Self::Manege => "Manege",
        }
    }

    /// Identifier accepted by [`BuildingKind::from_str`] and serde.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Park => "park",
            Self::Bank => "bank",
            Self::School => "school",
            Self::Apartment => "apartment",
            Self::Daisy => "daisy",
            Self::Kmk => "kmk",
            Self::Candle => "candle",
            Self::Manege => "manege",
        }
    }

    /// Points accrued per simulated minute before bonuses.
    #[must_use]
    pub const fn base_income_rate(self) -> f64 {
        match self {
            Self::Park => 50.0,
            Self::Bank => 65.0,
            Self::School => 60.0,
            Self::Apartment => 150.0,
            Self::Daisy => 30.0,
            Self::Kmk => 80.0,
            Self::Candle => 50.0,
            Self::Manege => 75.0,
        }
    }

    /// Offsets occupied relative to the anchor cell. The anchor is always
    /// the first entry.
    #[must_use]
    pub const fn footprint(self) -> &'static [HexCoord] {
        match self {
            Self::Park => &PARK_FOOTPRINT,
            Self::Bank | Self::School | Self::Daisy | Self::Candle => &SINGLE_FOOTPRINT,
            Self::Apartment => &APARTMENT_FOOTPRINT,
            Self::Kmk => &KMK_FOOTPRINT,
            Self::Manege => &MANEGE_FOOTPRINT,
        }
    }

    /// Lifetime number of placements permitted for the kind.
    #[must_use]
    pub const fn quota(self) -> Quota {
        match self {
            Self::Park | Self::Candle => Quota::Limited(1),
            Self::Daisy => Quota::Limited(3),
            Self::Kmk => Quota::Limited(5),
            Self::Bank | Self::School | Self::Apartment | Self::Manege => Quota::Unlimited,
        }
    }

    /// Absolute cells covered when the footprint is anchored at `anchor`,
    /// in footprint order.
    #[must_use]
    pub fn cells_at(self, anchor: HexCoord) -> Vec<HexCoord> {
        self.footprint()
            .iter()
            .map(|offset| anchor.offset(*offset))
            .collect()
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a building kind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown building kind `{0}`")]
pub struct ParseKindError(pub String);

impl FromStr for BuildingKind {
    type Err = ParseKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == normalised)
            .ok_or_else(|| ParseKindError(value.to_owned()))
    }
}

/// Number of placements a kind still permits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quota {
    /// A fixed number of placements remain.
    Limited(u32),
    /// The kind can be placed without limit.
    Unlimited,
}

impl Quota {
    /// Reports whether at least one more placement is permitted.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Limited(remaining) => remaining > 0,
            Self::Unlimited => true,
        }
    }

    /// Quota left after consuming one placement.
    #[must_use]
    pub const fn consume_one(self) -> Self {
        match self {
            Self::Limited(remaining) => Self::Limited(remaining.saturating_sub(1)),
            Self::Unlimited => Self::Unlimited,
        }
    }

    /// Finite remaining count, or `None` when unlimited.
    #[must_use]
    pub const fn remaining(self) -> Option<u32> {
        match self {
            Self::Limited(remaining) => Some(remaining),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(remaining) => write!(f, "{remaining}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}
