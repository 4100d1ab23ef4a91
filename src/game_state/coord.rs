//! Integer cell addresses.
//!
//! A `Coord` is just a pair of integers. It carries no validity guarantee;
//! whether a cell exists is always decided by `GridGeometry::contains`.
//! The same type doubles as a direction/offset vector for move rules.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sign, e.g. `(5, -2)` becomes `(1, -1)`.
    #[inline]
    pub fn signum(self) -> Coord {
        Coord::new(self.x.signum(), self.y.signum())
    }

    #[inline]
    pub fn chebyshev_norm(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    #[inline]
    fn neg(self) -> Self::Output {
        Coord::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    #[inline]
    fn mul(self, rhs: i32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal unit steps.
pub const ORTHOGONAL: [Coord; 4] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
];

/// The four diagonal unit steps.
pub const DIAGONAL: [Coord; 4] = [
    Coord::new(1, 1),
    Coord::new(1, -1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
];

/// The eight knight jumps.
pub const KNIGHT_JUMPS: [Coord; 8] = [
    Coord::new(1, 2),
    Coord::new(2, 1),
    Coord::new(2, -1),
    Coord::new(1, -2),
    Coord::new(-1, -2),
    Coord::new(-2, -1),
    Coord::new(-2, 1),
    Coord::new(-1, 2),
];

/// All eight (a, b) offsets generated by sign flips and swapping, deduplicated.
///
/// `symmetric_offsets(1, 2)` yields the knight jumps, `(1, 0)` the wazir steps.
pub fn symmetric_offsets(a: i32, b: i32) -> Vec<Coord> {
    let mut out = Vec::with_capacity(8);
    for (p, q) in [(a, b), (b, a)] {
        for (sx, sy) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            let c = Coord::new(p * sx, q * sy);
            if c != Coord::ORIGIN && !out.contains(&c) {
                out.push(c);
            }
        }
    }
    out
}
