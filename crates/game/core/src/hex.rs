//! Cube-coordinate hex math.
//!
//! Every position on the battlefield is a [`HexCoord`] in cube form
//! `(q, r, s)` with `q + r + s = 0`. The functions here are pure: they know
//! nothing about tiles, units or occupancy, callers filter the results.

use std::fmt;
use std::ops::{Add, Sub};

/// Errors raised when constructing coordinates from raw cube components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("cube coordinate ({q}, {r}, {s}) violates q + r + s = 0")]
    InvalidCube { q: i32, r: i32, s: i32 },
}

/// Position on the hex grid in cube coordinates.
///
/// The `s` component is stored rather than derived so that snapshots carry
/// the full triple, but it can only be built through constructors that keep
/// `q + r + s = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[i32; 3]", into = "[i32; 3]"))]
pub struct HexCoord {
    q: i32,
    r: i32,
    s: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0, s: 0 };

    /// The six unit offsets, in the fixed order used for neighbor enumeration.
    pub const DIRECTIONS: [HexCoord; 6] = [
        HexCoord { q: 1, r: -1, s: 0 },
        HexCoord { q: 1, r: 0, s: -1 },
        HexCoord { q: 0, r: 1, s: -1 },
        HexCoord { q: -1, r: 1, s: 0 },
        HexCoord { q: -1, r: 0, s: 1 },
        HexCoord { q: 0, r: -1, s: 1 },
    ];

    /// Builds a coordinate from its axial components; `s` is derived.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Builds a coordinate from a full cube triple, rejecting triples off the
    /// `q + r + s = 0` plane.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Result<Self, HexError> {
        if q + r + s != 0 {
            return Err(HexError::InvalidCube { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    #[inline]
    pub const fn q(self) -> i32 {
        self.q
    }

    #[inline]
    pub const fn r(self) -> i32 {
        self.r
    }

    #[inline]
    pub const fn s(self) -> i32 {
        self.s
    }

    /// Number of hex steps between two coordinates.
    ///
    /// ```text
    /// distance = (|Δq| + |Δr| + |Δs|) / 2
    /// ```
    ///
    /// The sum is always even for on-grid coordinates, so the division is exact.
    #[inline]
    pub fn distance(self, other: HexCoord) -> u32 {
        ((self.q - other.q).unsigned_abs()
            + (self.r - other.r).unsigned_abs()
            + (self.s - other.s).unsigned_abs())
            / 2
    }

    /// Returns true if `other` is at most `radius` steps away.
    #[inline]
    pub fn is_within(self, other: HexCoord, radius: u32) -> bool {
        self.distance(other) <= radius
    }

    /// The six adjacent coordinates in [`Self::DIRECTIONS`] order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        Self::DIRECTIONS.map(|direction| self + direction)
    }

    /// Every coordinate within `radius` steps of `self`, the center included.
    ///
    /// Generated q-major with the bound
    /// `max(-radius, -q - radius) <= r <= min(radius, -q + radius)`, which
    /// yields exactly `3r² + 3r + 1` coordinates in a deterministic order.
    pub fn range(self, radius: u32) -> Vec<HexCoord> {
        let n = radius as i32;
        let mut out = Vec::with_capacity((3 * radius * radius + 3 * radius + 1) as usize);

        for dq in -n..=n {
            let lower = (-n).max(-dq - n);
            let upper = n.min(-dq + n);
            for dr in lower..=upper {
                out.push(self + HexCoord::new(dq, dr));
            }
        }

        out
    }
}

impl Default for HexCoord {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
            s: self.s + rhs.s,
        }
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord {
            q: self.q - rhs.q,
            r: self.r - rhs.r,
            s: self.s - rhs.s,
        }
    }
}

impl TryFrom<[i32; 3]> for HexCoord {
    type Error = HexError;

    fn try_from([q, r, s]: [i32; 3]) -> Result<Self, Self::Error> {
        Self::from_cube(q, r, s)
    }
}

impl From<HexCoord> for [i32; 3] {
    fn from(coord: HexCoord) -> Self {
        [coord.q, coord.r, coord.s]
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cube_rejects_off_plane_triples() {
        assert!(HexCoord::from_cube(1, -1, 0).is_ok());
        assert_eq!(
            HexCoord::from_cube(1, 1, 1),
            Err(HexError::InvalidCube { q: 1, r: 1, s: 1 })
        );
    }

    #[test]
    fn distance_is_symmetric_and_exact() {
        let a = HexCoord::new(-3, 0);
        let b = HexCoord::new(3, -3);

        assert_eq!(a.distance(b), 6);
        assert_eq!(b.distance(a), 6);
        assert_eq!(a.distance(a), 0);
        assert_eq!(HexCoord::ORIGIN.distance(HexCoord::new(2, 1)), 3);
    }

    #[test]
    fn collinear_distances_add_up() {
        let start = HexCoord::new(-2, 1);
        for direction in HexCoord::DIRECTIONS {
            let mut line = vec![start];
            for _ in 0..6 {
                let next = *line.last().unwrap() + direction;
                line.push(next);
            }

            for i in 0..line.len() {
                for j in i..line.len() {
                    for k in j..line.len() {
                        assert_eq!(
                            line[i].distance(line[j]) + line[j].distance(line[k]),
                            line[i].distance(line[k])
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn range_zero_is_center_only() {
        let center = HexCoord::new(4, -1);
        assert_eq!(center.range(0), vec![center]);
    }

    #[test]
    fn range_size_follows_hexagonal_numbers() {
        let center = HexCoord::new(1, 2);
        for radius in 0..8u32 {
            let tiles = center.range(radius);
            assert_eq!(tiles.len() as u32, 3 * radius * radius + 3 * radius + 1);
            assert!(tiles.iter().all(|tile| tile.distance(center) <= radius));
        }
    }

    #[test]
    fn range_has_no_duplicates() {
        let mut tiles = HexCoord::ORIGIN.range(4);
        let before = tiles.len();
        tiles.sort();
        tiles.dedup();
        assert_eq!(tiles.len(), before);
    }

    #[test]
    fn neighbors_are_adjacent_and_ordered() {
        let center = HexCoord::new(2, -1);
        let neighbors = center.neighbors();

        assert_eq!(neighbors[0], HexCoord::new(3, -2));
        assert_eq!(neighbors[5], HexCoord::new(2, -2));
        assert!(neighbors.iter().all(|n| center.distance(*n) == 1));
        assert_eq!(neighbors, center.neighbors());
    }

    #[test]
    fn display_shows_cube_triple() {
        assert_eq!(HexCoord::new(-1, 3).to_string(), "(-1, 3, -2)");
    }
}
