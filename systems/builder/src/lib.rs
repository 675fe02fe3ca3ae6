#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for turning player input into placement commands.

use glam::Vec2;
use hex_city_core::{BuildingKind, Command, Event, HexCoord, HexLayout, OfferId, Viewport};

const BOARD_MIN: Vec2 = Vec2::new(250.0, 0.0);
const BOARD_MAX: Vec2 = Vec2::new(800.0, 600.0);

/// Screen geometry the builder resolves clicks against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    layout: HexLayout,
    board: Viewport,
}

impl Config {
    /// Creates a configuration from a hex layout and the clickable board region.
    #[must_use]
    pub const fn new(layout: HexLayout, board: Viewport) -> Self {
        Self { layout, board }
    }

    /// Layout used to map pixels onto cells.
    #[must_use]
    pub const fn layout(&self) -> HexLayout {
        self.layout
    }

    /// Region of the screen that accepts placement clicks.
    #[must_use]
    pub const fn board(&self) -> Viewport {
        self.board
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(HexLayout::default(), Viewport::new(BOARD_MIN, BOARD_MAX))
    }
}

/// Declarative placement preview describing the footprint under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Offer that would be consumed by the placement.
    pub offer: OfferId,
    /// Kind of building proposed for placement.
    pub kind: BuildingKind,
    /// Cell the footprint is anchored on.
    pub anchor: HexCoord,
    /// Cells the building would occupy, anchor first.
    pub cells: Vec<HexCoord>,
    /// Indicates whether every cell is currently free.
    pub placeable: bool,
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Offer the player picked from the side panel this frame.
    pub select: Option<OfferId>,
    /// Indicates whether the player dropped the current selection.
    pub cancel: bool,
    /// Indicates whether the player asked to rotate the selected offer.
    pub rotate: bool,
    /// Pixel position of a click on this frame.
    pub click: Option<Vec2>,
}

/// Builder system that tracks the selected offer and emits placement commands.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
    selected: Option<OfferId>,
}

impl Builder {
    /// Creates a new builder system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            selected: None,
        }
    }

    /// Configuration the builder resolves clicks with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Offer currently held by the player, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<OfferId> {
        self.selected
    }

    /// Consumes world events and frame input to emit builder commands.
    ///
    /// A click outside the board or without a selection emits nothing. The
    /// world validates the placement itself, so occupied targets still
    /// produce a command and come back as `PlacementRejected`.
    pub fn handle(&mut self, events: &[Event], input: BuilderInput, out: &mut Vec<Command>) {
        for event in events {
            if let Event::OfferRemoved { offer, .. } = event {
                if self.selected == Some(*offer) {
                    self.selected = None;
                }
            }
        }

        if input.cancel {
            self.selected = None;
        }
        if let Some(offer) = input.select {
            self.selected = Some(offer);
        }

        let Some(offer) = self.selected else {
            return;
        };

        if input.rotate {
            out.push(Command::RotateOffer { offer });
        }

        if let Some(click) = input.click {
            if self.config.board.contains(click) {
                out.push(Command::PlaceBuilding {
                    offer,
                    anchor: self.config.layout.pixel_to_hex(click),
                });
            }
        }
    }

    /// Describes the footprint the selected offer would cover at `cursor`.
    ///
    /// `kind_of` should mirror the world's `query::offer` lookup and
    /// `can_place` its `query::can_place` helper.
    pub fn preview<K, P>(
        &self,
        cursor: Vec2,
        mut kind_of: K,
        mut can_place: P,
    ) -> Option<PlacementPreview>
    where
        K: FnMut(OfferId) -> Option<BuildingKind>,
        P: FnMut(BuildingKind, HexCoord) -> bool,
    {
        if !self.config.board.contains(cursor) {
            return None;
        }
        let offer = self.selected?;
        let kind = kind_of(offer)?;
        let anchor = self.config.layout.pixel_to_hex(cursor);

        Some(PlacementPreview {
            offer,
            kind,
            anchor,
            cells: kind.cells_at(anchor),
            placeable: can_place(kind, anchor),
        })
    }
}
