//! Computer commander: picks orders and resolves movement, combat and
//! supply for one unit at a time.
//!
//! Units are updated round-robin over all 128 slots. A single update runs
//! through the phases of [`Phase`]; any phase may end the update early by
//! jumping to [`Phase::Recover`].

mod combat;
mod movement;
mod orders;
mod supply;

use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use tracing::{debug, trace};

use crate::coords::UnitCoords;
use crate::data::scenario::Game;
use crate::hex::ith_neighbour;
use crate::influence::InfluenceMaps;
use crate::math::{clamp, sign};
use crate::messages::{Message, UnitMessage};
use crate::units::{Order, Unit, UNITS_PER_SIDE};
use crate::world::World;

pub use orders::proximity_weight;
pub(crate) use supply::resupply_unit;

/// Marker for "no side analysed yet"; forces a map rebuild.
pub const NO_SIDE: usize = 3;

/// Weather is offset by this much at night.
const NIGHT_WEATHER_OFFSET: i32 = 8;

/// Total unit slots visited by the round-robin.
const UNIT_SLOTS: usize = 2 * UNITS_PER_SIDE;

/// Step of a single unit update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Choose an order and an objective.
    DetermineOrder,
    /// Move towards the objective.
    Move,
    /// Look for enemies next to the unit.
    Contact,
    /// Attack the target.
    Attack,
    /// Change formation and recover fatigue.
    Recover,
}

/// AI state carried between unit updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ai {
    /// Influence grids of the side analysed last.
    pub maps: InfluenceMaps,
    /// Side the maps were built for, or [`NO_SIDE`].
    pub last_analysed_side: usize,
    /// Slot (side * 64 + index) of the last updated unit.
    pub last_updated_unit: usize,
}

impl Default for Ai {
    fn default() -> Self {
        Self {
            maps: InfluenceMaps::default(),
            last_analysed_side: NO_SIDE,
            last_updated_unit: UNIT_SLOTS - 1,
        }
    }
}

/// Unit picked for the next update.
enum Selected {
    /// The unit is too weak or exhausted to go on.
    Surrendering(Unit),
    /// A regular update.
    Active(Unit),
}

impl Ai {
    /// Create an AI that will start with unit 0 and rebuild its maps first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a map rebuild before the next planning pass.
    pub fn invalidate_maps(&mut self) {
        self.last_analysed_side = NO_SIDE;
    }

    /// Update the next unit in turn.
    ///
    /// Returns the unit's report, [`Message::Empty`] if it had nothing to
    /// say, or `Break` if the consumer stopped the game.
    ///
    /// # Panics
    ///
    /// Panics if an in-game unit stands off the map.
    pub fn update_unit(
        &mut self,
        world: &mut World,
        weather: i32,
        is_night: bool,
    ) -> ControlFlow<(), Message> {
        let weather = if is_night {
            weather + NIGHT_WEATHER_OFFSET
        } else {
            weather
        };
        let Some(selected) = self.select_unit(world) else {
            return ControlFlow::Continue(Message::Empty);
        };
        let mut message: Option<UnitMessage> = None;
        let mut arg1 = 0;
        let mut target = UnitCoords::default();
        let (mut unit, mut phase) = match selected {
            Selected::Surrendering(mut unit) => {
                world.hide_unit(&unit);
                message = Some(UnitMessage::WeMustSurrender { unit });
                debug!(side = unit.side, index = unit.index, "unit surrenders");
                unit.clear_state();
                unit.half_days_until_appear = 0;
                world.score.cities_held[1 - unit.side] += world.data.unit_scores[unit.unit_type];
                world.score.men_lost[unit.side] += unit.men_count;
                world.score.tanks_lost[unit.side] += unit.tank_count;
                (unit, Phase::Recover)
            }
            Selected::Active(unit) => (unit, Phase::DetermineOrder),
        };
        loop {
            trace!(side = unit.side, index = unit.index, ?phase, "unit phase");
            phase = match phase {
                Phase::DetermineOrder => {
                    arg1 = self.update_unit_objective(world, &mut unit, weather);
                    if unit.supply_level == 0 {
                        message = Some(UnitMessage::WeHaveExhaustedSupplies { unit });
                    }
                    Phase::Move
                }
                Phase::Move => {
                    let ControlFlow::Continue(xy) =
                        movement::perform_unit_movement(world, &mut unit, &mut message, &mut arg1, weather)
                    else {
                        return ControlFlow::Break(());
                    };
                    target = xy;
                    Phase::Contact
                }
                Phase::Contact => Self::check_contact(world, &mut unit, &mut message, &mut arg1, &mut target),
                Phase::Attack => {
                    if combat::perform_attack(world, &mut unit, target, weather, &mut message).is_break() {
                        return ControlFlow::Break(());
                    }
                    Phase::Recover
                }
                Phase::Recover => break,
            };
        }
        Self::recover(world, &mut unit);
        world.units.set(unit);
        ControlFlow::Continue(message.map_or(Message::Empty, Message::Unit))
    }

    /// Advance the round-robin to the next unit worth updating. Gives up
    /// after one full lap.
    fn select_unit(&mut self, world: &World) -> Option<Selected> {
        for _ in 0..UNIT_SLOTS {
            self.last_updated_unit = (self.last_updated_unit + 1) % UNIT_SLOTS;
            let unit = world
                .units
                .get(self.last_updated_unit / UNITS_PER_SIDE, self.last_updated_unit % UNITS_PER_SIDE);
            if !unit.in_game {
                continue;
            }
            assert!(
                world.are_unit_coords_valid(unit.xy),
                "{}@{}: unit off the map: {:?}",
                unit.full_name(&world.data),
                unit.xy,
                unit
            );
            if unit.men_count + unit.tank_count < 7 || unit.fatigue == 255 {
                return Some(Selected::Surrendering(unit));
            }
            if world.data.unit_can_move[unit.unit_type] {
                return Some(Selected::Active(unit));
            }
        }
        None
    }

    /// Refresh contact flags after moving and decide whether to attack.
    fn check_contact(
        world: &mut World,
        unit: &mut Unit,
        message: &mut Option<UnitMessage>,
        arg1: &mut i32,
        target: &mut UnitCoords,
    ) -> Phase {
        unit.supply_level = clamp(unit.supply_level - 2, 0, 255);
        let was_in_contact = unit.in_contact;
        unit.in_contact = false;
        unit.under_attack = false;
        unit.state2 = false;
        unit.state4 = false;
        let hide_chance = world.data.data252[unit.side];
        let spot_chance = world.data.data175;
        if world.rand(hide_chance) == 0 {
            unit.seen = false;
        }
        if world.game == Game::Conflict && world.rand(spot_chance) / 8 > 0 {
            unit.seen = true;
        }
        for i in 0..6 {
            let nxy = ith_neighbour(unit.xy, i);
            let Some(mut enemy) = world.units.find_unit_of_side_at(nxy, 1 - unit.side) else {
                continue;
            };
            enemy.in_contact = true;
            enemy.seen = true;
            world.show_unit(&enemy);
            world.units.set(enemy);
            if world.data.unit_scores[enemy.unit_type] > 8
                && !world.commander_flags.player_controlled[unit.side]
            {
                *target = enemy.xy;
                unit.order = Order::Attack;
                *arg1 = 7;
            }
            if !world.data.unit_mask_bit(enemy.unit_type, 7) {
                unit.state4 = true;
            }
            if world.data.unit_can_move[enemy.unit_type] {
                unit.in_contact = true;
                unit.seen = true;
                if !was_in_contact {
                    *message = Some(UnitMessage::WeAreInContactWithEnemy { unit: *unit });
                }
            }
        }
        world.show_unit_if_visible(unit);
        if unit.objective.x == 0 || unit.order != Order::Attack || *arg1 < 7 {
            return Phase::Recover;
        }
        if unit.distance_to_objective() == 1 && world.units.is_unit_of_side_at(*target, unit.side) {
            unit.objective.x = 0;
            return Phase::Recover;
        }
        unit.target_formation = world.data.order_formation(unit.order, 2);
        if unit.fatigue > 64
            || unit.supply_level == 0
            || !world.units.is_unit_of_side_at(*target, 1 - unit.side)
            || unit.formation != world.data.data176[0][2]
        {
            return Phase::Recover;
        }
        Phase::Attack
    }

    /// Step the formation towards the target formation and recover fatigue.
    fn recover(world: &mut World, unit: &mut Unit) {
        while unit.formation != unit.target_formation {
            let dir = sign(unit.formation - unit.target_formation);
            let speed =
                world.data.formation_change_speed[((dir + 1) / 2) as usize][unit.formation as usize];
            if speed > world.rand(15) {
                unit.long_range_attack = false;
                unit.formation -= dir;
            }
            if speed & 16 == 0 {
                break;
            }
        }
        let mut recovery = world.data.recovery_rate[unit.unit_type];
        if !unit.in_contact && unit.has_supply_line {
            recovery *= 2;
        }
        unit.fatigue = clamp(unit.fatigue - recovery, 0, 255);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{place_unit, test_world};

    #[test]
    fn test_empty_world_yields_empty_message() {
        let mut world = test_world();
        let mut ai = Ai::new();
        assert_eq!(ai.update_unit(&mut world, 0, false), ControlFlow::Continue(Message::Empty));
    }

    #[test]
    fn test_round_robin_starts_at_first_slot() {
        let mut world = test_world();
        place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 50, 0);
        place_unit(&mut world, 1, 3, UnitCoords::new(60, 40), 50, 0);
        let mut ai = Ai::new();
        let _ = ai.update_unit(&mut world, 0, false);
        assert_eq!(ai.last_updated_unit, 0);
        let _ = ai.update_unit(&mut world, 0, false);
        assert_eq!(ai.last_updated_unit, 67);
        let _ = ai.update_unit(&mut world, 0, false);
        assert_eq!(ai.last_updated_unit, 0);
    }

    #[test]
    fn test_weak_unit_surrenders() {
        let mut world = test_world();
        world.data.unit_scores[2] = 5;
        let mut unit = place_unit(&mut world, 1, 0, UnitCoords::new(20, 20), 4, 2);
        unit.unit_type = 2;
        world.units.set(unit);
        let mut ai = Ai::new();
        let ControlFlow::Continue(message) = ai.update_unit(&mut world, 0, false) else {
            panic!("update stopped");
        };
        assert_eq!(message.kind(), "WeMustSurrender");
        let unit = world.units.get(1, 0);
        assert!(!unit.in_game);
        assert_eq!(world.score.men_lost[1], 4);
        assert_eq!(world.score.tanks_lost[1], 2);
        assert_eq!(world.score.cities_held[0], 5);
    }

    #[test]
    fn test_fatigue_recovers_and_formation_converges() {
        let mut world = test_world();
        world.data.formation_change_speed = [[31; 8]; 2];
        let mut unit = place_unit(&mut world, 0, 0, UnitCoords::new(20, 20), 50, 0);
        unit.formation = 3;
        unit.target_formation = 0;
        unit.fatigue = 10;
        Ai::recover(&mut world, &mut unit);
        assert_eq!(unit.formation, 0);
        assert!(!unit.long_range_attack);
        // Recovery doubles with a supply line and no contact.
        assert_eq!(unit.fatigue, 8);
    }
}
