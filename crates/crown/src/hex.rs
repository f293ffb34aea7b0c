//! Spiral numbering of a hex grid, used to seed bubble home positions.
//!
//! Ring 0 is the single centre cell; ring `n` holds `6n` cells and starts at
//! linear index `1 + 3n(n - 1)`.

use crate::geom::Point;

/// Axial hex coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// Axial unit steps, walked in order around a ring.
const DIRECTIONS: [HexCoord; 6] = [
    HexCoord { q: 1, r: 0 },
    HexCoord { q: 1, r: -1 },
    HexCoord { q: 0, r: -1 },
    HexCoord { q: -1, r: 0 },
    HexCoord { q: -1, r: 1 },
    HexCoord { q: 0, r: 1 },
];

/// Index of the direction whose multiple is a ring's first cell.
const START_CORNER: usize = 4;

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    fn offset(self, dir: HexCoord, times: i32) -> Self {
        Self::new(self.q + dir.q * times, self.r + dir.r * times)
    }

    /// Number of steps between two cells.
    pub fn distance(self, other: HexCoord) -> i32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    /// Which ring around the origin this cell sits on.
    pub fn ring(self) -> i32 {
        self.distance(Self::ORIGIN)
    }

    /// Pointy-top centre of the cell, relative to the origin cell's centre.
    pub fn to_pixel(self, radius: f64) -> Point {
        let (q, r) = (self.q as f64, self.r as f64);
        Point::new(radius * 3f64.sqrt() * (q + r / 2.0), radius * 1.5 * r)
    }
}

pub fn index_to_hex(index: usize) -> HexCoord {
    if index == 0 {
        return HexCoord::ORIGIN;
    }

    let mut ring = 1;
    let mut ring_start = 1;
    while ring_start + ring * 6 <= index {
        ring_start += ring * 6;
        ring += 1;
    }

    let pos_in_ring = index - ring_start;
    let side = pos_in_ring / ring;
    let along = (pos_in_ring % ring) as i32;
    let ring = ring as i32;

    let corner = HexCoord::ORIGIN.offset(DIRECTIONS[START_CORNER], ring);
    let at_side = DIRECTIONS[..side]
        .iter()
        .fold(corner, |hex, &dir| hex.offset(dir, ring));
    at_side.offset(DIRECTIONS[side], along)
}
