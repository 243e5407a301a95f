//! Supply distribution: trucks travel from supply units to the units they
//! feed.

use crate::coords::UnitCoords;
use crate::math::{abs, clamp};
use crate::messages::Message;
use crate::units::Unit;
use crate::world::World;

/// Fatigue added to a unit left without supplies.
const OUT_OF_SUPPLY_FATIGUE: i32 = 64;

/// Try to reach `unit` from one of its side's supply units and refill it
/// from the side's pool in `levels`. Returns the updated unit.
pub(crate) fn resupply_unit(world: &mut World, mut unit: Unit, levels: &mut [i32; 2]) -> Unit {
    let visible = world.commander_flags.player_can_see_units[unit.side];
    unit.order_bit4 = false;
    if !world.data.unit_uses_supplies[unit.unit_type] || !world.data.unit_can_move[unit.unit_type] {
        return unit;
    }
    unit.has_supply_line = false;
    let base_type = world.data.min_supply_type & 15;
    let min_type = base_type + i32::from(unit.unit_type as i32 >= base_type);
    if visible {
        world.show_unit(&unit);
    }
    let mut depot = Unit::default();
    'depots: for j in 0..world.units.side(unit.side).len() {
        depot = world.units.get(unit.side, j);
        if (depot.unit_type as i32) < min_type || !depot.in_game || depot.supply_level == 0 {
            continue;
        }
        let mut truck = depot.xy;
        if visible {
            world.show_unit(&depot);
        }
        let mut budget = world.data.max_supply_transport_cost;
        if unit.unit_type as i32 == base_type {
            budget *= 2;
        }
        while budget > 0 {
            if abs(truck.x - unit.xy.x) + abs(truck.y - unit.xy.y) < 3 {
                let side = unit.side;
                if levels[side] > 0 {
                    let max_resupply = clamp((levels[side] - unit.supply_level * 2) / 16, 0, world.data.max_resupply_amount);
                    let amount = clamp(world.data.unit_resupply_per_type[unit.unit_type], 0, max_resupply);
                    unit.supply_level += amount;
                    levels[side] -= amount;
                    unit.has_supply_line = true;
                } else {
                    levels[side] = 0;
                }
                world.hide_unit(&depot);
                break 'depots;
            }
            let (next, speed) = truck_step(world, truck, unit.xy);
            if visible {
                let _ = world.send(Message::SupplyTruckMove {
                    from: truck.to_map_coords(),
                    to: next.to_map_coords(),
                });
            }
            truck = next;
            if world.units.is_unit_of_side_at(truck, 1 - unit.side) {
                break;
            }
            budget -= 256 / (speed + 1);
        }
        world.hide_unit(&depot);
    }
    if unit.supply_level == 0 {
        unit.fatigue = clamp(unit.fatigue + OUT_OF_SUPPLY_FATIGUE, 0, 255);
        if depot.xy.x != 0 {
            unit.objective = depot.xy;
        }
    }
    world.hide_unit(&unit);
    unit
}

/// One truck step from `from` towards `to`, trying the flanking cells when
/// the direct ones are impassable.
fn truck_step(world: &mut World, from: UnitCoords, to: UnitCoords) -> (UnitCoords, i32) {
    let truck_type = world.data.min_supply_type.clamp(0, 15) as usize;
    let mut step = (from, 0);
    for variant in 0..2 {
        step = world.find_best_move(from, to, truck_type, variant);
        if step.1 != 0 {
            break;
        }
    }
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{place_unit, test_world};

    fn place_depot(world: &mut World, xy: UnitCoords) -> Unit {
        let mut depot = place_unit(world, 0, 10, xy, 20, 0);
        depot.unit_type = 9;
        world.units.set(depot);
        depot
    }

    #[test]
    fn test_adjacent_depot_refills_unit() {
        let mut world = test_world();
        place_depot(&mut world, UnitCoords::new(21, 21));
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 50, 0);
        unit.supply_level = 0;
        let mut levels = [1000, 1000];
        let unit = resupply_unit(&mut world, unit, &mut levels);
        // (1000 - 0) / 16 = 62 allowed, 32 per type.
        assert_eq!(unit.supply_level, 32);
        assert_eq!(levels, [968, 1000]);
        assert!(unit.has_supply_line);
        assert!(!unit.order_bit4);
    }

    #[test]
    fn test_empty_pool_leaves_unit_without_supply() {
        let mut world = test_world();
        let depot = place_depot(&mut world, UnitCoords::new(21, 21));
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 50, 0);
        unit.supply_level = 0;
        unit.fatigue = 10;
        let mut levels = [0, 500];
        let unit = resupply_unit(&mut world, unit, &mut levels);
        assert_eq!(unit.supply_level, 0);
        assert!(!unit.has_supply_line);
        assert_eq!(unit.fatigue, 74);
        assert_eq!(unit.objective, depot.xy);
        assert_eq!(levels, [0, 500]);
    }

    #[test]
    fn test_truck_reaches_distant_unit() {
        let mut world = test_world();
        world.data.max_supply_transport_cost = 4096;
        place_depot(&mut world, UnitCoords::new(10, 20));
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 50, 0);
        unit.supply_level = 20;
        let mut levels = [2000, 0];
        let unit = resupply_unit(&mut world, unit, &mut levels);
        assert!(unit.has_supply_line);
        assert_eq!(unit.supply_level, 52);
    }

    #[test]
    fn test_immobile_units_are_skipped() {
        let mut world = test_world();
        world.data.unit_can_move[0] = false;
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 50, 0);
        unit.has_supply_line = true;
        unit.supply_level = 0;
        let mut levels = [1000, 1000];
        let unit = resupply_unit(&mut world, unit, &mut levels);
        assert!(unit.has_supply_line);
        assert_eq!(unit.fatigue, 0);
        assert_eq!(levels, [1000, 1000]);
    }
}
