//! Combat resolution between an attacking unit and the enemy at its target.

use std::ops::ControlFlow;

use tracing::debug;

use crate::coords::UnitCoords;
use crate::data::scenario::Game;
use crate::hex::{ith_neighbour, STAY};
use crate::math::{abs, clamp};
use crate::messages::{Message, UnitMessage};
use crate::units::{Order, Unit};
use crate::world::World;

/// Outcome at which the attacker stops gaining morale.
const MORALE_GAIN_LIMIT: i32 = 24;

/// Outcome above which the attacker gives up the attack.
const STRONG_RESISTANCE: i32 = 32;

/// Retreat pressure above which the defender falls back.
const RETREAT_THRESHOLD: i32 = 36;

/// Outcome above which the attacker follows a retreating defender.
const PURSUIT_THRESHOLD: i32 = 60;

/// Attack the enemy unit at `target`.
///
/// Updates both units, the score and the overlay, and replaces `message`
/// with the attack report.
///
/// # Panics
///
/// Panics if no enemy unit stands at `target`.
#[allow(clippy::too_many_lines)]
pub(super) fn perform_attack(
    world: &mut World,
    unit: &mut Unit,
    target: UnitCoords,
    weather: i32,
    message: &mut Option<UnitMessage>,
) -> ControlFlow<()> {
    let conflict = world.game == Game::Conflict;
    if unit.long_range_attack {
        if world.data.weather_hampers_fire(unit.unit_type) && weather > 3 {
            return ControlFlow::Continue(());
        }
    } else {
        world.hide_unit(unit);
        let shown = world.send(Message::UnitMove {
            unit: *unit,
            from: unit.xy.to_map_coords(),
            to: target.to_map_coords(),
        });
        if !shown {
            return ControlFlow::Break(());
        }
        world.show_unit(unit);
        if conflict {
            unit.in_contact = true;
            unit.seen = true;
        }
    }
    if !conflict {
        unit.in_contact = true;
        unit.seen = true;
    }
    let Some(mut enemy) = world.units.find_unit_of_side_at(target, 1 - unit.side) else {
        panic!(
            "{}@{} attacks {} but no enemy is there",
            unit.full_name(&world.data),
            unit.xy,
            target
        );
    };
    *message = Some(UnitMessage::WeAreAttacking {
        unit: *unit,
        enemy,
        outcome: 0,
    });

    let Some(attack) = attack_strength(world, unit, weather) else {
        return ControlFlow::Continue(());
    };
    if world.data.unit_scores[enemy.unit_type] > 7 {
        unit.state2 = true;
    }
    let defence = defence_strength(world, &enemy);

    // Attacker losses.
    let data = &world.data;
    let mut outcome = defence * 16 / attack;
    if !data.unit_mask_bit(unit.unit_type, 2) {
        outcome += weather;
    }
    outcome = clamp(outcome, 0, 63);
    if !unit.long_range_attack || !data.no_losses_at_range(unit.unit_type) {
        let men_lost = clamp((world.rand(unit.men_count * outcome) + 255) / 512, 0, unit.men_count);
        unit.men_count -= men_lost;
        world.score.men_lost[unit.side] += men_lost;
        let tanks_lost = clamp((world.rand(unit.tank_count * outcome) + 255) / 512, 0, unit.tank_count);
        unit.tank_count -= tanks_lost;
        world.score.tanks_lost[unit.side] += tanks_lost;
        if outcome < MORALE_GAIN_LIMIT {
            unit.morale = clamp(unit.morale + 1, 0, 250);
        }
        enemy.under_attack = true;
        if outcome > STRONG_RESISTANCE {
            unit.order = Order::Defend;
            *message = Some(UnitMessage::WeHaveMetStrongResistance { unit: *unit });
            unit.morale = abs(unit.morale - 2);
        }
    }
    unit.fatigue = clamp(unit.fatigue + outcome, 0, 255);
    unit.supply_level = clamp(unit.supply_level - world.data.data162, 0, 255);

    // Defender losses.
    outcome = attack * 16 / defence - weather;
    outcome = if world.game == Game::Crusade {
        clamp(outcome, 0, 63)
    } else {
        clamp(outcome, 0, 128)
    };
    if !world.send(Message::UnitAttack { xy: target, outcome }) {
        return ControlFlow::Break(());
    }
    let men_lost = clamp((world.rand(enemy.men_count * outcome) + 500) / 512, 0, enemy.men_count);
    enemy.men_count -= men_lost;
    world.score.men_lost[enemy.side] += men_lost;
    let tanks_lost = clamp((world.rand(enemy.tank_count * outcome) + 255) / 512, 0, enemy.tank_count);
    enemy.tank_count -= tanks_lost;
    world.score.tanks_lost[enemy.side] += tanks_lost;
    enemy.supply_level = clamp(enemy.supply_level - world.data.data163, 0, 255);
    debug!(
        attacker = %unit.full_name(&world.data),
        defender = %enemy.full_name(&world.data),
        outcome,
        men_lost,
        tanks_lost,
        "attack resolved"
    );

    let data = &world.data;
    let can_retreat = data.unit_can_move[enemy.unit_type]
        && if conflict {
            !data.unit_mask_bit(enemy.unit_type, 1)
        } else {
            !unit.long_range_attack
        };
    if can_retreat && outcome - data.data0_low[enemy.unit_type] * 2 + enemy.fatigue / 4 > RETREAT_THRESHOLD {
        retreat(world, unit, &mut enemy, outcome, message);
    }

    let mut fatigue_gain = outcome;
    if matches!(message, Some(UnitMessage::WeAreRetreating { .. })) {
        fatigue_gain /= 2;
    }
    enemy.fatigue = clamp(enemy.fatigue + fatigue_gain, 0, 255);
    if outcome < MORALE_GAIN_LIMIT {
        enemy.morale = clamp(enemy.morale + 1, 0, 250);
    }
    world.units.set(enemy);
    if let Some(UnitMessage::WeAreAttacking { outcome: reported, .. }) = message {
        *reported = outcome;
    }
    ControlFlow::Continue(())
}

/// Attack strength of `unit`, at least 1. `None` when the weather grounds
/// its ranged fire.
fn attack_strength(world: &World, unit: &Unit, weather: i32) -> Option<i32> {
    let data = &world.data;
    let terrain_type = world.terrain_types.terrain_type_at(unit.xy);
    let formation = unit.formation as usize;
    let men = if unit.long_range_attack {
        0
    } else {
        data.terrain_men_attack[terrain_type] * data.formation_men_attack[formation] * unit.men_count / 32
    };
    let mut tanks = data.terrain_tank_attack[terrain_type] * data.formation_tank_attack[formation]
        * data.data16_high[unit.unit_type]
        / 2
        * unit.tank_count
        / 64;
    let susceptible = if world.game == Game::Conflict {
        data.weather_hampers_fire_alt(unit.unit_type)
    } else {
        data.weather_hampers_fire(unit.unit_type)
    };
    if unit.long_range_attack && susceptible {
        if weather > 3 {
            return None;
        }
        tanks = tanks * (4 - weather) / 4;
    }
    let mut attack = (men + tanks) * unit.morale / 256 * (255 - unit.fatigue) / 128;
    attack = attack * world.general(unit).attack / 16;
    attack = attack * world.neighbour_score(&world.hexes.arr144, unit.xy, unit.side) / 8;
    Some(attack + 1)
}

/// Defence strength of `enemy`, at least 1.
fn defence_strength(world: &World, enemy: &Unit) -> i32 {
    let data = &world.data;
    let terrain_type = world.terrain_types.terrain_type_at(enemy.xy);
    let formation = enemy.formation as usize;
    let men = data.terrain_men_defence[terrain_type] * data.formation_men_defence[formation] * enemy.men_count / 32;
    // Tanks defend with their terrain attack modifier.
    let tanks = data.terrain_tank_attack[terrain_type] * data.formation_tank_defence[formation]
        * data.data16_low[enemy.unit_type]
        / 2
        * enemy.tank_count
        / 64;
    let mut defence = (men + tanks) * enemy.morale / 256 * (240 - enemy.fatigue / 2) / 128;
    defence = defence * world.general(enemy).defence / 16;
    if enemy.supply_level == 0 {
        defence = defence * data.data167 / 8;
    }
    defence * world.neighbour_score(&world.hexes.arr144, enemy.xy, enemy.side) / 8 + 1
}

/// Push `enemy` back after a heavy defeat, or overrun it when exhausted.
fn retreat(
    world: &mut World,
    unit: &mut Unit,
    enemy: &mut Unit,
    outcome: i32,
    message: &mut Option<UnitMessage>,
) {
    let conflict = world.game == Game::Conflict;
    enemy.morale = abs(enemy.morale - 1);
    let origin = enemy.xy;
    let mut best = enemy.xy;
    world.hide_unit(enemy);
    let mut overrun = false;
    let depot = world.units.get(enemy.side, enemy.supply_unit);
    if enemy.fatigue > 128 && depot.in_game {
        enemy.morale = abs(enemy.morale - world.units.neighbour_unit_count(enemy.xy, unit.side) * 4);
        enemy.xy = depot.xy;
        enemy.clear_state();
        let (half_days, inverse_probability) = if world.game == Game::Crusade { (6, 6) } else { (4, 4) };
        enemy.half_days_until_appear = half_days;
        enemy.inv_appear_probability = inverse_probability;
        match world.game {
            Game::Decision => enemy.fatigue = 130,
            Game::Conflict => enemy.fatigue = 120,
            Game::Crusade => {}
        }
        debug!(unit = %enemy.full_name(&world.data), "unit overrun");
        *message = Some(UnitMessage::WeHaveBeenOverrun { unit: *enemy });
        overrun = true;
    }
    let mut best_defence = -128;
    for i in 0..=STAY {
        let nxy = ith_neighbour(enemy.xy, i);
        if !world.are_unit_coords_valid(nxy) || world.units.is_unit_at(nxy) || world.terrain.is_city_at(nxy) {
            continue;
        }
        let terrain_type = world.terrain_types.terrain_or_unit_type_at(nxy);
        if world.move_speed(terrain_type, enemy.unit_type) == 0 {
            continue;
        }
        let r = world.data.terrain_men_defence[terrain_type as usize]
            + world.neighbour_score(&world.hexes.arr96, nxy, enemy.side) * 4;
        if r > 11 && r >= best_defence {
            best_defence = r;
            best = nxy;
        }
    }
    enemy.xy = best;
    if !overrun {
        if conflict {
            if world.commander_flags.player_can_see_units[enemy.side] {
                world.show_unit(enemy);
            }
            enemy.in_contact = false;
            enemy.seen = false;
        } else {
            world.show_unit(enemy);
            unit.objective = enemy.xy;
        }
    }
    if best == origin {
        *message = None;
    } else {
        if !overrun {
            *message = Some(UnitMessage::WeAreRetreating { unit: *enemy });
        }
        let pursue = outcome > PURSUIT_THRESHOLD
            && (!conflict || !unit.long_range_attack)
            && world.neighbour_score(&world.hexes.arr96, origin, unit.side) > -4
            && world.move_speed(world.terrain_types.terrain_or_unit_type_at(origin), unit.unit_type) > 0;
        if pursue {
            world.hide_unit(unit);
            unit.xy = origin;
            world.show_unit(unit);
            if let Some(city) = world.capture_city(unit) {
                *message = Some(UnitMessage::WeHaveCaptured { unit: *unit, city });
            }
        }
    }
    let formation = world.data.data176[1][0];
    enemy.formation = formation;
    enemy.order = Order::from_bits(((formation + 1) & 3) as u8);
    enemy.has_local_command = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{place_unit, test_world};

    fn attack(world: &mut World, unit: &mut Unit, target: UnitCoords) -> Option<UnitMessage> {
        let mut message = None;
        let flow = perform_attack(world, unit, target, 0, &mut message);
        assert_eq!(flow, ControlFlow::Continue(()));
        message
    }

    #[test]
    fn test_attack_reports_outcome_and_losses() {
        let mut world = test_world();
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 200, 0);
        place_unit(&mut world, 1, 0, UnitCoords::new(22, 20), 50, 0);
        let message = attack(&mut world, &mut unit, UnitCoords::new(22, 20));
        let collected = world.take_collected();
        assert!(collected.iter().any(|m| matches!(m, Message::UnitAttack { .. })));
        assert!(unit.in_contact && unit.seen);
        // Both sides score 1 without neighbour tables: outcome 16 either way.
        assert!(matches!(message, Some(UnitMessage::WeAreAttacking { outcome: 16, .. })));
        let enemy = world.units.get(1, 0);
        assert!(enemy.under_attack);
        assert_eq!(enemy.xy, UnitCoords::new(22, 20));
        assert_eq!(world.score.men_lost[1], 50 - enemy.men_count);
        assert_eq!(world.score.men_lost[0], 200 - unit.men_count);
        assert_eq!(unit.fatigue, 16);
    }

    #[test]
    fn test_ranged_attack_spares_attacker_with_no_loss_flag() {
        let mut world = test_world();
        world.data.data32[0] = 128 | 2;
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 100, 20);
        unit.long_range_attack = true;
        place_unit(&mut world, 1, 0, UnitCoords::new(24, 20), 100, 0);
        let _ = attack(&mut world, &mut unit, UnitCoords::new(24, 20));
        assert_eq!(unit.men_count, 100);
        assert_eq!(unit.tank_count, 20);
        assert_eq!(world.score.men_lost[0], 0);
        // Ranged fire never moves the attacker onto the target.
        assert_eq!(unit.xy, UnitCoords::new(20, 20));
    }

    #[test]
    #[should_panic(expected = "no enemy is there")]
    fn test_attack_on_empty_cell_panics() {
        let mut world = test_world();
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 100, 0);
        let _ = attack(&mut world, &mut unit, UnitCoords::new(22, 20));
    }

    #[test]
    fn test_overwhelmed_defender_retreats_and_is_pursued() {
        let mut world = test_world();
        world.data.terrain_men_defence = [16; 8];
        // One adjacent enemy scores 8 for either side.
        world.hexes.arr144[2][1] = 8;
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 255, 0);
        let mut enemy = place_unit(&mut world, 1, 0, UnitCoords::new(22, 20), 10, 0);
        enemy.morale = 10;
        world.units.set(enemy);
        let message = attack(&mut world, &mut unit, UnitCoords::new(22, 20));
        assert!(matches!(message, Some(UnitMessage::WeAreRetreating { .. })));
        let enemy = world.units.get(1, 0);
        assert_eq!(enemy.xy, UnitCoords::new(23, 21));
        assert!(enemy.has_local_command);
        assert_eq!(enemy.order, Order::Defend);
        assert_eq!(enemy.fatigue, 31);
        assert_eq!(unit.xy, UnitCoords::new(22, 20));
        assert_eq!(unit.objective, UnitCoords::new(23, 21));
    }

    #[test]
    fn test_retreat_rates_cells_by_their_shown_type() {
        let mut world = test_world();
        world.data.terrain_men_defence = [16; 8];
        world.data.terrain_men_defence[7] = 40;
        world.data.move_speed_per_terrain_type_and_unit[7] = [8; 16];
        world.hexes.arr144[2][1] = 8;
        // A stale unit mark with no unit under it reads as the blocked type.
        world.terrain_types.show_unit_at(UnitCoords::new(21, 19));
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 255, 0);
        let mut enemy = place_unit(&mut world, 1, 0, UnitCoords::new(22, 20), 10, 0);
        enemy.morale = 10;
        world.units.set(enemy);
        let message = attack(&mut world, &mut unit, UnitCoords::new(22, 20));
        assert!(matches!(message, Some(UnitMessage::WeAreRetreating { .. })));
        assert_eq!(world.units.get(1, 0).xy, UnitCoords::new(21, 19));
    }
}
