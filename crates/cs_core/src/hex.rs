//! Hex neighbourhood geometry and the fixed offset tables the AI scans.
//!
//! Two families of offsets exist:
//! - hex offsets on the fine unit grid (6 neighbours plus "stay", and the
//!   19-entry long-range ring used when choosing attack targets);
//! - square offsets on the 16x16 and 4x4 influence grids.
//!
//! Table order is significant: the AI breaks ties by scan order.

use crate::coords::UnitCoords;
use crate::math::abs;

/// Offsets of the hexes within distance 2 of the origin: the twelve at
/// distance 2 first, then the six adjacent ones, then the origin itself.
const LONG_RANGE_OFFSETS: [(i32, i32); 19] = [
    (0, -2),
    (2, -2),
    (3, -1),
    (4, 0),
    (3, 1),
    (2, 2),
    (0, 2),
    (-2, 2),
    (-3, 1),
    (-4, 0),
    (-3, -1),
    (-2, -2),
    (-1, 1),
    (-2, 0),
    (-1, -1),
    (1, -1),
    (2, 0),
    (1, 1),
    (0, 0),
];

/// Offsets of a 5x5 square ordered by squared distance, then dy, then dx.
const SQUARE_OFFSETS: [(i32, i32); 25] = [
    (0, 0),
    (0, -1),
    (-1, 0),
    (1, 0),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (0, -2),
    (-2, 0),
    (2, 0),
    (0, 2),
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
    (-2, -2),
    (2, -2),
    (-2, 2),
    (2, 2),
];

/// Index of the "stay in place" entry among hex neighbours.
pub const STAY: usize = 6;

/// Hex distance between two cells `dx`, `dy` apart on the unit grid.
#[must_use]
pub const fn half_tile_offset_distance(dx: i32, dy: i32) -> i32 {
    let (abs_dx, abs_dy) = (abs(dx), abs(dy));
    if abs_dy > abs_dx / 2 {
        abs_dy
    } else {
        (abs_dx + abs_dy + 1) / 2
    }
}

/// Offset of the `i`-th entry (0..19) of the long-range ring.
///
/// # Panics
///
/// Panics if `i >= 19`.
#[must_use]
pub fn long_range_hex_neighbour_offset(i: usize) -> (i32, i32) {
    LONG_RANGE_OFFSETS[i]
}

/// Offset of the `i`-th hex neighbour. Index 6 is the origin.
///
/// # Panics
///
/// Panics if `i >= 7`.
#[must_use]
pub fn hex_neighbour_offset(i: usize) -> (i32, i32) {
    assert!(i < 7, "Invalid hex neighbour index {i}");
    LONG_RANGE_OFFSETS[i + 12]
}

/// The `i`-th hex neighbour of `xy`.
#[must_use]
pub fn ith_neighbour(xy: UnitCoords, i: usize) -> UnitCoords {
    let (dx, dy) = hex_neighbour_offset(i);
    UnitCoords::new(xy.x + dx, xy.y + dy)
}

/// Offset on the 16x16 influence grid, `i` in 0..25.
#[must_use]
pub fn small_map_offsets(i: usize) -> (i32, i32) {
    SQUARE_OFFSETS[i]
}

/// Offset on the 4x4 influence grid, `i` in 0..9.
///
/// # Panics
///
/// Panics if `i >= 9`.
#[must_use]
pub fn tiny_map_offsets(i: usize) -> (i32, i32) {
    assert!(i < 9, "Invalid tiny map offset index {i}");
    SQUARE_OFFSETS[i]
}

/// Number the direction `(dx, dy)` 0..12 clockwise from up-left.
///
/// Odd numbers are the exact diagonals and horizontals; even numbers are the
/// sectors between them.
#[must_use]
pub const fn direction_index(dx: i32, dy: i32) -> i32 {
    if dy < 0 {
        if dx < dy {
            0
        } else if dx == dy {
            1
        } else if dx < -dy {
            2
        } else if dx == -dy {
            3
        } else {
            4
        }
    } else if dy > 0 {
        if dx < -dy {
            10
        } else if dx == -dy {
            9
        } else if dx < dy {
            8
        } else if dx == dy {
            7
        } else {
            6
        }
    } else if dx > 0 {
        5
    } else if dx < 0 {
        11
    } else {
        0
    }
}

/// First neighbour met when heading from `from` towards `to`.
///
/// Variants 0 and 1 pick one of the two most direct neighbours, 2 and 3 one
/// of the two flanking ones.
#[must_use]
pub fn first_neighbour_from_towards(from: UnitCoords, to: UnitCoords, variant: i32) -> UnitCoords {
    let direction = direction_index(to.x - from.x, to.y - from.y);
    let neighbour = if variant < 2 {
        ((direction + 3 + variant) % 12) / 2
    } else if variant == 2 {
        ((direction + 1) % 12) / 2
    } else {
        ((direction + 6) % 12) / 2
    };
    ith_neighbour(from, neighbour as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_neighbours() {
        let xy = UnitCoords::new(10, 10);
        let expected = [(9, 11), (8, 10), (9, 9), (11, 9), (12, 10), (11, 11), (10, 10)];
        for (i, (x, y)) in expected.iter().enumerate() {
            assert_eq!(ith_neighbour(xy, i), UnitCoords::new(*x, *y));
        }
    }

    #[test]
    #[should_panic(expected = "Invalid hex neighbour index")]
    fn test_hex_neighbour_out_of_range() {
        let _ = hex_neighbour_offset(7);
    }

    #[test]
    fn test_long_range_ring_distances() {
        for i in 0..12 {
            let (dx, dy) = long_range_hex_neighbour_offset(i);
            assert_eq!(half_tile_offset_distance(dx, dy), 2, "entry {i}");
        }
        for i in 12..18 {
            let (dx, dy) = long_range_hex_neighbour_offset(i);
            assert_eq!(half_tile_offset_distance(dx, dy), 1, "entry {i}");
        }
        assert_eq!(long_range_hex_neighbour_offset(18), (0, 0));
    }

    #[test]
    fn test_square_offsets_sorted() {
        let key = |(dx, dy): (i32, i32)| (dx * dx + dy * dy, dy, dx);
        for i in 1..25 {
            assert!(key(small_map_offsets(i - 1)) < key(small_map_offsets(i)));
        }
        assert_eq!(tiny_map_offsets(8), (1, 1));
    }

    #[test]
    fn test_direction_index_compass() {
        assert_eq!(direction_index(0, 0), 0);
        assert_eq!(direction_index(-3, -1), 0);
        assert_eq!(direction_index(-1, -1), 1);
        assert_eq!(direction_index(0, -1), 2);
        assert_eq!(direction_index(1, -1), 3);
        assert_eq!(direction_index(3, -1), 4);
        assert_eq!(direction_index(1, 0), 5);
        assert_eq!(direction_index(3, 1), 6);
        assert_eq!(direction_index(1, 1), 7);
        assert_eq!(direction_index(0, 1), 8);
        assert_eq!(direction_index(-1, 1), 9);
        assert_eq!(direction_index(-3, 1), 10);
        assert_eq!(direction_index(-1, 0), 11);
    }

    #[test]
    fn test_first_neighbour_heads_towards_target() {
        let from = UnitCoords::new(10, 10);
        // Straight right: both direct variants step right.
        let to = UnitCoords::new(20, 10);
        assert_eq!(first_neighbour_from_towards(from, to, 0), UnitCoords::new(12, 10));
        // Straight down-right diagonal.
        let to = UnitCoords::new(14, 14);
        assert_eq!(first_neighbour_from_towards(from, to, 0), UnitCoords::new(11, 11));
        assert_eq!(first_neighbour_from_towards(from, to, 1), UnitCoords::new(11, 11));
    }
}
