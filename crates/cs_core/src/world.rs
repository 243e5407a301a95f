//! Mutable game world shared by the scheduler and the AI.
//!
//! [`World`] owns every table and registry that unit updates read or write,
//! together with the random stream and the producer half of the message
//! channel. The scheduler and the AI both borrow it mutably, one at a time,
//! on the simulation thread.

use tracing::debug;

use crate::coords::UnitCoords;
use crate::data::generals::{General, Generals};
use crate::data::hexes::{Hexes, NeighbourTable};
use crate::data::scenario::Game;
use crate::data::scenario_data::ScenarioData;
use crate::data::terrain::{City, Terrain};
use crate::hex::{first_neighbour_from_towards, ith_neighbour};
use crate::message_sync::MessageSync;
use crate::messages::Message;
use crate::options::CommanderFlags;
use crate::rng::RandomSource;
use crate::score::Score;
use crate::terrain_types::{TerrainTypeMap, BLOCKED_TERRAIN_TYPE};
use crate::units::{Unit, Units};

/// Everything a unit update can touch.
pub struct World {
    /// Game of the series being played.
    pub game: Game,
    /// Per-type and per-terrain tables.
    pub data: ScenarioData,
    /// Cities and terrain weights.
    pub terrain: Terrain,
    /// Terrain types with the shown-unit overlay.
    pub terrain_types: TerrainTypeMap,
    /// Neighbour score tables.
    pub hexes: Hexes,
    /// Generals of both sides.
    pub generals: Generals,
    /// Unit registry.
    pub units: Units,
    /// Running score.
    pub score: Score,
    /// Control and visibility flags.
    pub commander_flags: CommanderFlags,
    rng: Box<dyn RandomSource>,
    sync: MessageSync,
}

impl World {
    /// Assemble a world.
    #[must_use]
    pub fn new(
        game: Game,
        data: ScenarioData,
        terrain: Terrain,
        terrain_types: TerrainTypeMap,
        hexes: Hexes,
        generals: Generals,
        units: Units,
        score: Score,
        commander_flags: CommanderFlags,
        rng: Box<dyn RandomSource>,
        sync: MessageSync,
    ) -> Self {
        Self {
            game,
            data,
            terrain,
            terrain_types,
            hexes,
            generals,
            units,
            score,
            commander_flags,
            rng,
            sync,
        }
    }

    /// Uniform integer in `[0, n)`, 0 when `n <= 0`.
    pub fn rand(&mut self, n: i32) -> i32 {
        self.rng.rand(n)
    }

    /// Replace the random stream, e.g. with a scripted one.
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.rng = rng;
    }

    /// Block until the consumer asks for the first message.
    pub fn wait(&mut self) -> bool {
        let go_on = self.sync.wait();
        self.apply_side_switches();
        go_on
    }

    /// Hand `message` to the consumer. Returns false once the consumer has
    /// stopped.
    pub fn send(&mut self, message: Message) -> bool {
        let go_on = self.sync.send_update(message);
        self.apply_side_switches();
        go_on
    }

    fn apply_side_switches(&mut self) {
        for _ in 0..self.sync.take_side_switches() {
            debug!("switching sides");
            self.commander_flags.switch_sides();
        }
    }

    /// Messages recorded by a collecting channel.
    pub fn take_collected(&mut self) -> Vec<Message> {
        self.sync.take_collected()
    }

    /// General commanding `unit`.
    #[must_use]
    pub fn general(&self, unit: &Unit) -> &General {
        self.generals.get(unit.side, unit.general_index)
    }

    /// Whether `xy` lies on the map.
    #[must_use]
    pub const fn are_unit_coords_valid(&self, xy: UnitCoords) -> bool {
        self.terrain_types.are_unit_coords_valid(xy)
    }

    /// Movement speed of `unit_type` over terrain type `terrain_type`.
    ///
    /// # Panics
    ///
    /// Panics if `terrain_type` is not in `[0, 8)` or `unit_type` not in
    /// `[0, 16)`.
    #[must_use]
    pub fn move_speed(&self, terrain_type: i32, unit_type: usize) -> i32 {
        let row = usize::try_from(terrain_type).unwrap_or(usize::MAX);
        self.data.move_speed_per_terrain_type_and_unit[row][unit_type]
    }

    /// Mark the tile of `unit` as showing a unit.
    pub fn show_unit(&mut self, unit: &Unit) {
        self.terrain_types.show_unit_at(unit.xy);
    }

    /// Clear the unit mark of the tile of `unit`.
    pub fn hide_unit(&mut self, unit: &Unit) {
        self.terrain_types.hide_unit_at(unit.xy);
    }

    /// Show `unit` if the enemy knows about it or the player may see it.
    pub fn show_unit_if_visible(&mut self, unit: &Unit) {
        if unit.is_visible() || self.commander_flags.player_can_see_units[unit.side] {
            self.show_unit(unit);
        }
    }

    /// Whether `unit` is in the game and may be drawn.
    #[must_use]
    pub fn is_unit_visible(&self, unit: &Unit) -> bool {
        unit.in_game && (unit.is_visible() || self.commander_flags.player_can_see_units[unit.side])
    }

    /// Whether a unit the player may see stands at `xy`.
    #[must_use]
    pub fn contains_visible_unit(&self, xy: UnitCoords) -> bool {
        self.units
            .find_unit_at(xy)
            .is_some_and(|unit| self.commander_flags.player_can_see_units[unit.side] || unit.is_visible())
    }

    /// Score of `xy` for `side` from the occupancy of its six neighbours,
    /// weighted by `table`.
    ///
    /// Each neighbour is classified as free (0), blocked or friendly (1),
    /// enemy (2), or free but flanked by friends (3), enemies (4) or both
    /// (5). `table[kind][count]` is summed over the six kinds.
    #[must_use]
    pub fn neighbour_score(&self, table: &NeighbourTable, xy: UnitCoords, side: usize) -> i32 {
        let mut counts = [0usize; 6];
        for i in 0..6 {
            let nxy = ith_neighbour(xy, i);
            let kind = if self.units.is_unit_of_side_at(nxy, 1 - side) {
                2
            } else if self.units.is_unit_of_side_at(nxy, side)
                || !self.are_unit_coords_valid(nxy)
                || self.terrain_types.terrain_or_unit_type_at(nxy) >= BLOCKED_TERRAIN_TYPE
            {
                1
            } else {
                let left = ith_neighbour(xy, (i + 5) % 6);
                let right = ith_neighbour(xy, (i + 1) % 6);
                let enemy = self.units.is_unit_of_side_at(left, 1 - side)
                    || self.units.is_unit_of_side_at(right, 1 - side);
                let friend = self.units.is_unit_of_side_at(left, side)
                    || self.units.is_unit_of_side_at(right, side);
                match (enemy, friend) {
                    (true, true) => 5,
                    (true, false) => 4,
                    (false, true) => 3,
                    (false, false) => 0,
                }
            };
            counts[kind] += 1;
        }
        counts
            .iter()
            .enumerate()
            .map(|(kind, count)| table[kind][*count])
            .sum()
    }

    /// One step from `from` towards `to` for a unit of `unit_type`, and the
    /// speed over the chosen cell.
    ///
    /// Variant 0 weighs the two most direct neighbours, variant 1 the two
    /// flanking ones. Off-map candidates are replaced by `from` with speed 0.
    pub fn find_best_move(
        &mut self,
        from: UnitCoords,
        to: UnitCoords,
        unit_type: usize,
        variant: i32,
    ) -> (UnitCoords, i32) {
        let candidate = |world: &Self, v: i32| {
            let xy = first_neighbour_from_towards(from, to, v);
            if world.are_unit_coords_valid(xy) {
                let terrain_type = world.terrain_types.terrain_or_unit_type_at(xy);
                (xy, world.move_speed(terrain_type, unit_type))
            } else {
                (from, 0)
            }
        };
        let (xy1, speed1) = candidate(self, 2 * variant);
        let (xy2, speed2) = candidate(self, 2 * variant + 1);
        if speed2 > speed1 - self.rand(2) {
            (xy2, speed2)
        } else {
            (xy1, speed1)
        }
    }

    /// Transfer the city under `unit` to its side if an enemy held it.
    /// Returns the captured city.
    pub fn capture_city(&mut self, unit: &Unit) -> Option<City> {
        let city = self.terrain.find_city_at_mut(unit.xy)?;
        if city.owner == unit.side {
            return None;
        }
        city.owner = unit.side;
        let points = city.victory_points;
        let captured = city.clone();
        self.score.cities_held[unit.side] += points;
        self.score.cities_held[1 - unit.side] -= points;
        self.score.critical_locations_captured[unit.side] += points & 1;
        debug!(city = %captured.name, side = unit.side, points, "city captured");
        Some(captured)
    }

    /// Clear the shown-unit overlay for every unit in the game.
    pub fn hide_all_units(&mut self) {
        for side in 0..2 {
            for i in 0..self.units.side(side).len() {
                let unit = self.units.get(side, i);
                if unit.in_game {
                    self.hide_unit(&unit);
                }
            }
        }
    }

    /// Mark every visible unit in the overlay.
    pub fn show_all_visible_units(&mut self) {
        for side in 0..2 {
            for i in 0..self.units.side(side).len() {
                let unit = self.units.get(side, i);
                if self.is_unit_visible(&unit) {
                    self.show_unit(&unit);
                }
            }
        }
    }
}
