//! Unit and map coordinate spaces.
//!
//! The map is a staggered hex grid stored as rows of tiles. Units address it
//! on a finer grid with two cells per tile column, so that odd rows (shifted by
//! half a tile) still land on integer coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position on the fine grid used by units and cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitCoords {
    /// Column, two cells per map tile.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Position of a terrain tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MapCoords {
    /// Tile column.
    pub x: i32,
    /// Tile row.
    pub y: i32,
}

impl UnitCoords {
    /// Create unit coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing this cell. Halving floors toward negative infinity.
    #[must_use]
    pub const fn to_map_coords(self) -> MapCoords {
        if self.x >= 0 {
            MapCoords::new(self.x / 2, self.y)
        } else {
            MapCoords::new((self.x - 1) / 2, self.y)
        }
    }

    /// Hex distance to `other`.
    #[must_use]
    pub const fn distance_to(self, other: Self) -> i32 {
        crate::hex::half_tile_offset_distance(other.x - self.x, other.y - self.y)
    }
}

impl MapCoords {
    /// Create map coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical unit cell of this tile.
    #[must_use]
    pub const fn to_unit_coords(self) -> UnitCoords {
        UnitCoords::new(self.x * 2 + crate::math::abs(self.y) % 2, self.y)
    }
}

impl fmt::Display for UnitCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for MapCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_map_coords_floors() {
        assert_eq!(UnitCoords::new(5, 3).to_map_coords(), MapCoords::new(2, 3));
        assert_eq!(UnitCoords::new(4, 2).to_map_coords(), MapCoords::new(2, 2));
        assert_eq!(UnitCoords::new(-1, 1).to_map_coords(), MapCoords::new(-1, 1));
        assert_eq!(UnitCoords::new(-2, 0).to_map_coords(), MapCoords::new(-1, 0));
    }

    #[test]
    fn test_to_unit_coords_staggers_odd_rows() {
        assert_eq!(MapCoords::new(3, 0).to_unit_coords(), UnitCoords::new(6, 0));
        assert_eq!(MapCoords::new(3, 1).to_unit_coords(), UnitCoords::new(7, 1));
        assert_eq!(MapCoords::new(0, -1).to_unit_coords(), UnitCoords::new(1, -1));
    }

    #[test]
    fn test_round_trip_on_map() {
        for y in 0..64 {
            for x in 0..64 - y % 2 {
                let m = MapCoords::new(x, y);
                assert_eq!(m.to_unit_coords().to_map_coords(), m);
            }
        }
    }

    #[test]
    fn test_distance_to() {
        let a = UnitCoords::new(10, 10);
        assert_eq!(a.distance_to(a), 0);
        assert_eq!(a.distance_to(UnitCoords::new(12, 10)), 1);
        assert_eq!(a.distance_to(UnitCoords::new(11, 11)), 1);
        assert_eq!(a.distance_to(UnitCoords::new(10, 14)), 4);
        assert_eq!(a.distance_to(UnitCoords::new(18, 10)), 4);
    }
}
