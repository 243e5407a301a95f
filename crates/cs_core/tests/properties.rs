//! Property tests for the coordinate system and integer helpers.

use cs_core::coords::UnitCoords;
use cs_core::hex::ith_neighbour;
use cs_core::math::clamp;
use cs_test_utils::determinism::strategies::{arb_clamp_input, arb_map_coords, arb_unit_coords};
use cs_test_utils::proptest::prelude::*;

proptest! {
    #[test]
    fn test_map_coords_survive_unit_round_trip(m in arb_map_coords()) {
        prop_assert_eq!(m.to_unit_coords().to_map_coords(), m);
    }

    #[test]
    fn test_distance_is_symmetric(a in arb_unit_coords(), b in arb_unit_coords()) {
        prop_assert_eq!(a.distance_to(b), b.distance_to(a));
        prop_assert!(a.distance_to(b) >= 0);
    }

    #[test]
    fn test_distance_to_self_is_zero(a in arb_unit_coords()) {
        prop_assert_eq!(a.distance_to(a), 0);
    }

    #[test]
    fn test_neighbours_are_adjacent(m in arb_map_coords(), i in 0usize..6) {
        let xy = m.to_unit_coords();
        let n = ith_neighbour(xy, i);
        prop_assert_ne!(n, xy);
        prop_assert_eq!(xy.distance_to(n), 1);
    }

    #[test]
    fn test_clamp_stays_in_bounds((v, lo, hi) in arb_clamp_input()) {
        let c = clamp(v, lo, hi);
        prop_assert!(c >= lo && c <= hi);
        if (lo..=hi).contains(&v) {
            prop_assert_eq!(c, v);
        }
    }

    #[test]
    fn test_cell_parity_matches_row(m in arb_map_coords()) {
        let UnitCoords { x, y } = m.to_unit_coords();
        prop_assert_eq!(x.rem_euclid(2), y.rem_euclid(2));
    }
}
