//! Step a unit towards its objective within one update's movement budget.

use std::ops::ControlFlow;

use crate::coords::UnitCoords;
use crate::data::scenario::Game;
use crate::math::{abs, clamp, max};
use crate::messages::{Message, UnitMessage};
use crate::units::{Order, Unit};
use crate::world::World;

/// Movement points of one update.
const MOVE_BUDGET: i32 = 25;

/// Move `unit` towards its objective.
///
/// Returns the cell the unit would attack next: its objective for a ranged
/// attack, otherwise the last cell it tried to enter. `Break` means the
/// consumer stopped the game.
pub(super) fn perform_unit_movement(
    world: &mut World,
    unit: &mut Unit,
    message: &mut Option<UnitMessage>,
    arg1: &mut i32,
    weather: i32,
) -> ControlFlow<(), UnitCoords> {
    let mut target = UnitCoords::default();
    let mut budget = MOVE_BUDGET;
    while budget > 0 {
        if unit.objective.x == 0 {
            break;
        }
        let distance = unit.distance_to_objective();
        let range = world.data.attack_range(unit.unit_type) * 2;
        if distance > 0 && distance <= range && unit.order == Order::Attack {
            target = unit.objective;
            unit.long_range_attack = true;
            *arg1 = 7;
            break;
        }
        let Some((next, speed)) = next_step(world, unit, arg1) else {
            break;
        };
        target = next;
        if speed < 1 {
            break;
        }
        let Some(cost) = step_cost(world, unit, speed, weather) else {
            break;
        };
        if cost > budget && world.rand(cost) > budget {
            break;
        }
        budget -= cost;

        world.hide_unit(unit);
        if world.commander_flags.player_can_see_units[unit.side] || unit.is_visible() {
            let moved = world.send(Message::UnitMove {
                unit: *unit,
                from: unit.xy.to_map_coords(),
                to: target.to_map_coords(),
            });
            if !moved {
                return ControlFlow::Break(());
            }
        }
        unit.xy = target;
        world.show_unit_if_visible(unit);
        if unit.distance_to_objective() == 0 {
            unit.objective.x = 0;
            unit.target_formation = world.data.order_formation(unit.order, 1);
            if (unit.order == Order::Defend || unit.order == Order::Move) && !unit.has_local_command {
                *message = Some(UnitMessage::WeHaveReachedOurObjective { unit: *unit });
            }
        }
        unit.fatigue = clamp(unit.fatigue + world.data.data173, 0, 255);
        if let Some(city) = world.capture_city(unit) {
            *message = Some(UnitMessage::WeHaveCaptured { unit: *unit, city });
            break;
        }
        if budget > 0 {
            if world.units.neighbour_unit_count(unit.xy, 1 - unit.side) > 0 {
                unit.in_contact = true;
                unit.state4 = true;
            } else {
                unit.in_contact = false;
            }
            world.show_unit_if_visible(unit);
        }
    }
    ControlFlow::Continue(target)
}

/// Pick the next cell on the way to the objective and its raw speed.
/// `None` when the unit already stands on its objective.
fn next_step(world: &mut World, unit: &mut Unit, arg1: &mut i32) -> Option<(UnitCoords, i32)> {
    let mut variant = 0;
    loop {
        if unit.objective == unit.xy {
            unit.objective.x = 0;
            unit.target_formation = world.data.order_formation(unit.order, 1);
            return None;
        }
        unit.target_formation = world.data.order_formation(unit.order, 0);
        if (!world.commander_flags.player_controlled[unit.side] || unit.has_local_command)
            && unit.distance_to_objective() == 1
            && unit.order == Order::Defend
            && unit.in_contact
        {
            unit.target_formation = world.data.order_formation(unit.order, 1);
        }
        let (mut next, mut speed) = world.find_best_move(unit.xy, unit.objective, unit.unit_type, variant);
        if world.data.fires_directly(unit.unit_type) {
            if world.game != Game::Conflict || unit.formation == 0 {
                next = unit.objective;
                let terrain_type = world.terrain_types.terrain_or_unit_type_at(next);
                speed = world.move_speed(terrain_type, unit.unit_type);
                *arg1 = terrain_type;
                variant = 1;
            } else if world.data.unit_mask_bit(unit.unit_type, 5) {
                return Some((next, 0));
            }
        }
        if world.units.is_unit_of_side_at(next, unit.side) {
            speed = 0;
        } else if world.units.is_unit_of_side_at(next, 1 - unit.side) {
            speed = -1;
        }
        let near = abs(unit.objective.x - unit.xy.x) + abs(unit.objective.y - unit.xy.y) <= 2;
        if speed >= 1 || (unit.order == Order::Attack && speed == -1) || near || variant >= 1 {
            return Some((next, speed));
        }
        variant += 1;
    }
}

/// Movement points needed to enter a cell at raw `speed`, at least 1.
/// `None` when the unit cannot move at all.
fn step_cost(world: &World, unit: &Unit, speed: i32, weather: i32) -> Option<i32> {
    let data = &world.data;
    let mut speed = speed * data.data192[unit.formation as usize] / 8;
    if unit.state4 {
        speed = speed * data.data200_low[unit.unit_type] / 8;
    }
    speed *= (512 - unit.fatigue) / 32;
    speed = speed * world.general(unit).movement / 16;
    if unit.supply_level == 0 {
        speed /= 2;
    }
    if world.game != Game::Crusade && speed == 0 {
        return None;
    }
    let mut total = if world.game == Game::Conflict { 1023 } else { 1024 };
    if !data.unit_mask_bit(unit.unit_type, 2) {
        total += weather * if world.game == Game::Conflict { 256 } else { 128 };
    }
    total *= 8;
    let cost = if world.game == Game::Crusade {
        total / (speed + 1)
    } else {
        total / speed
    };
    // Every step spends at least one point, so the budget always runs out.
    Some(max(cost, 1))
}
