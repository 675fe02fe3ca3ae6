//! Axial hexagon coordinates and the pixel layout used to present them.
//!
//! The grid is conceptually unbounded: any pair of `i32` values addresses a
//! cell. Presenters map cells to flat-top hexagons through [`HexLayout`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

/// Axial offsets of the six neighbours of a cell, in enumeration order.
pub const HEX_DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(-1, 0),
    HexCoord::new(0, 1),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
    HexCoord::new(-1, 1),
];

/// Location of a single hexagonal cell expressed in axial coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    q: i32,
    r: i32,
}

impl HexCoord {
    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Column-like axial component.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Row-like axial component.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Returns the coordinate shifted by the provided axial offset.
    #[must_use]
    pub const fn offset(self, delta: HexCoord) -> Self {
        Self::new(self.q + delta.q, self.r + delta.r)
    }

    /// Enumerates the six adjacent cells in [`HEX_DIRECTIONS`] order.
    #[must_use]
    pub fn neighbors(self) -> [HexCoord; 6] {
        HEX_DIRECTIONS.map(|direction| self.offset(direction))
    }

    /// Number of steps separating two cells.
    #[must_use]
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()) / 2
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Axis-aligned pixel rectangle, inclusive on every edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    min: Vec2,
    max: Vec2,
}

impl Viewport {
    /// Creates a viewport spanning the two provided corners.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Creates a viewport anchored at the origin with the provided size.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Upper-left corner of the viewport.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner of the viewport.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Maps axial cells onto flat-top hexagons in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    size: f32,
    origin: Vec2,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(60.0, Vec2::new(400.0, 300.0))
    }
}

impl HexLayout {
    /// Creates a layout whose hexagons have the provided circumradius and
    /// whose `(0, 0)` cell is centred on `origin`.
    #[must_use]
    pub const fn new(size: f32, origin: Vec2) -> Self {
        Self { size, origin }
    }

    /// Circumradius of a single hexagon in pixels.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Pixel centre of the `(0, 0)` cell.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Pixel centre of the provided cell.
    #[must_use]
    pub fn hex_to_pixel(&self, hex: HexCoord) -> Vec2 {
        let q = hex.q() as f32;
        let r = hex.r() as f32;
        Vec2::new(
            self.origin.x + self.size * 1.5 * q,
            self.origin.y + self.size * SQRT_3 * (r + q / 2.0),
        )
    }

    /// Resolves a pixel to a cell by rounding each axis independently.
    ///
    /// Exact halves round to the even integer. The row is derived from the already rounded column, so points close to
    /// a cell edge can resolve to a neighbour of the cell that actually
    /// contains them. Use [`HexLayout::pixel_to_hex_exact`] for true
    /// nearest-cell resolution.
    #[must_use]
    pub fn pixel_to_hex(&self, point: Vec2) -> HexCoord {
        let local = point - self.origin;
        let q = (local.x / (self.size * 1.5)).round_ties_even();
        let r = (local.y / (self.size * SQRT_3) - q / 2.0).round_ties_even();
        HexCoord::new(q as i32, r as i32)
    }

    /// Resolves a pixel to the cell whose hexagon contains it.
    #[must_use]
    pub fn pixel_to_hex_exact(&self, point: Vec2) -> HexCoord {
        let local = point - self.origin;
        let q = local.x / (self.size * 1.5);
        let r = local.y / (self.size * SQRT_3) - q / 2.0;
        cube_round(q, r)
    }

    /// Vertices of the cell's hexagon, starting at zero degrees and turning
    /// in sixty degree steps.
    #[must_use]
    pub fn hex_corners(&self, hex: HexCoord) -> [Vec2; 6] {
        let center = self.hex_to_pixel(hex);
        std::array::from_fn(|index| {
            let angle = (60.0 * index as f32).to_radians();
            center + self.size * Vec2::new(angle.cos(), angle.sin())
        })
    }

    /// Cells within `radius` columns and rows of the origin whose centres
    /// fall inside `screen`, ordered by column then row.
    #[must_use]
    pub fn visible_cells(&self, radius: i32, screen: &Viewport) -> Vec<HexCoord> {
        let radius = radius.max(0);
        (-radius..=radius)
            .flat_map(|q| (-radius..=radius).map(move |r| HexCoord::new(q, r)))
            .filter(|hex| screen.contains(self.hex_to_pixel(*hex)))
            .collect()
    }
}

fn cube_round(q: f32, r: f32) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Viewport {
        Viewport::from_size(800.0, 600.0)
    }

    #[test]
    fn neighbors_follow_axial_directions() {
        let neighbors = HexCoord::new(2, -1).neighbors();
        assert_eq!(
            neighbors,
            [
                HexCoord::new(3, -1),
                HexCoord::new(1, -1),
                HexCoord::new(2, 0),
                HexCoord::new(2, -2),
                HexCoord::new(3, -2),
                HexCoord::new(1, 0),
            ]
        );
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        for q in -6..=6 {
            for r in -6..=6 {
                let cell = HexCoord::new(q, r);
                for neighbor in cell.neighbors() {
                    assert!(
                        neighbor.neighbors().contains(&cell),
                        "{cell:?} missing from neighbors of {neighbor:?}"
                    );
                    assert_eq!(cell.distance(neighbor), 1);
                }
            }
        }
    }

    #[test]
    fn origin_cell_sits_on_layout_origin() {
        let layout = HexLayout::default();
        assert_eq!(layout.hex_to_pixel(HexCoord::new(0, 0)), Vec2::new(400.0, 300.0));
        let east = layout.hex_to_pixel(HexCoord::new(1, 0));
        assert!((east.x - 490.0).abs() < 1e-3);
        assert!((east.y - (300.0 + 30.0 * SQRT_3)).abs() < 1e-3);
    }

    #[test]
    fn pixel_round_trip_holds_across_rendered_cells() {
        let layout = HexLayout::default();
        let cells = layout.visible_cells(5, &screen());
        assert!(!cells.is_empty());
        for cell in cells {
            let pixel = layout.hex_to_pixel(cell);
            assert_eq!(layout.pixel_to_hex(pixel), cell);
            assert_eq!(layout.pixel_to_hex_exact(pixel), cell);
        }
    }

    #[test]
    fn approximate_rounding_misses_near_cell_edges() {
        let layout = HexLayout::new(60.0, Vec2::ZERO);
        let point = Vec2::new(46.0, -20.0);
        assert_eq!(layout.pixel_to_hex_exact(point), HexCoord::new(0, 0));
        assert_eq!(layout.pixel_to_hex(point), HexCoord::new(1, -1));
    }

    #[test]
    fn approximate_rounding_breaks_ties_to_even() {
        let layout = HexLayout::default();
        assert_eq!(layout.pixel_to_hex(Vec2::new(445.0, 300.0)), HexCoord::new(0, 0));
        assert_eq!(layout.pixel_to_hex(Vec2::new(535.0, 300.0)), HexCoord::new(2, -1));
    }

    #[test]
    fn corners_lie_on_circumradius() {
        let layout = HexLayout::default();
        let cell = HexCoord::new(-2, 3);
        let center = layout.hex_to_pixel(cell);
        let corners = layout.hex_corners(cell);
        for corner in corners {
            assert!((corner.distance(center) - 60.0).abs() < 1e-3);
        }
        assert!((corners[0].x - (center.x + 60.0)).abs() < 1e-3);
        assert!((corners[0].y - center.y).abs() < 1e-3);
    }

    #[test]
    fn visible_cells_are_clipped_to_screen() {
        let layout = HexLayout::default();
        let cells = layout.visible_cells(5, &screen());
        assert!(cells.contains(&HexCoord::new(0, 0)));
        assert!(!cells.contains(&HexCoord::new(5, 0)));
        assert!(cells.len() < 121);
    }

    #[test]
    fn viewport_normalises_corners() {
        let viewport = Viewport::new(Vec2::new(10.0, 10.0), Vec2::new(0.0, 0.0));
        assert_eq!(viewport.min(), Vec2::ZERO);
        assert!(viewport.contains(Vec2::new(10.0, 10.0)));
        assert!(!viewport.contains(Vec2::new(10.5, 5.0)));
    }
}
