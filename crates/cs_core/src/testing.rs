//! Small hand-built worlds for unit tests.

use crate::coords::UnitCoords;
use crate::data::generals::{General, Generals, GENERALS_PER_SIDE};
use crate::data::generic::Generic;
use crate::data::hexes::Hexes;
use crate::data::map::Map;
use crate::data::scenario::{Game, ScenarioStart};
use crate::data::scenario_data::ScenarioData;
use crate::data::terrain::{City, Terrain};
use crate::data::variants::Variant;
use crate::game_state::GameState;
use crate::message_sync::MessageSync;
use crate::options::{CommanderFlags, Options};
use crate::rng::ChaChaSource;
use crate::score::Score;
use crate::terrain_types::TerrainTypeMap;
use crate::units::{Order, Unit, Units, UNITS_PER_SIDE};
use crate::world::World;

/// Tables where every modifier is neutral (8/8) and every unit type moves
/// at speed 8 over every terrain type but the blocked one.
pub fn neutral_data() -> ScenarioData {
    let mut data = ScenarioData {
        terrain_men_attack: [8; 8],
        terrain_tank_attack: [8; 8],
        terrain_men_defence: [8; 8],
        terrain_tank_defence: [8; 8],
        formation_men_attack: [8; 8],
        formation_tank_attack: [8; 8],
        formation_men_defence: [8; 8],
        formation_tank_defence: [8; 8],
        data192: [8; 8],
        data16_low: [4; 16],
        data16_high: [4; 16],
        unit_can_move: [true; 16],
        unit_uses_supplies: [true; 16],
        recovery_rate: [1; 16],
        minutes_per_tick: 60,
        unit_updates_per_time_increment: 16,
        avg_daily_supply_use: 2,
        max_supply_transport_cost: 1024,
        max_resupply_amount: 64,
        unit_resupply_per_type: [32; 16],
        min_supply_type: 8,
        data167: 4,
        unit_types: (0..16).map(|t| format!("TYPE{t}")).collect(),
        formations: vec!["COLUMN".into(), "LINE".into()],
        months: (1..=12).map(|m| format!("M{m}")).collect(),
        weather: vec!["CLEAR".into(), "RAIN".into()],
        ..ScenarioData::default()
    };
    for row in data.move_speed_per_terrain_type_and_unit.iter_mut().take(7) {
        *row = [8; 16];
    }
    data
}

fn general() -> General {
    General {
        attack: 8,
        defence: 8,
        movement: 16,
        name: "GENERAL".into(),
        ..General::default()
    }
}

/// A 64x64 map of plain terrain, no units in the game, one city slot and
/// computer control on both sides.
pub fn test_world() -> World {
    let map = Map::filled(64, 64, 0);
    let generic = Generic::default();
    let terrain_types = TerrainTypeMap::new(map, &generic);
    let terrain = Terrain {
        cities: vec![City {
            name: "TOWN".into(),
            ..City::default()
        }],
        coeffs: [[8; 16]; 16],
    };
    let mut units = Units::default();
    for side in 0..2 {
        units.0[side] = (0..UNITS_PER_SIDE)
            .map(|index| Unit {
                side,
                index,
                morale: 100,
                has_supply_line: true,
                order: Order::Reserve,
                ..Unit::default()
            })
            .collect();
    }
    let generals = Generals([
        vec![general(); GENERALS_PER_SIDE],
        vec![general(); GENERALS_PER_SIDE],
    ]);
    let variant = Variant {
        name: "TEST".into(),
        length_in_days: 3,
        critical_locations: [10, 10],
        data3: 8,
        cities_held: [0, 0],
    };
    let options = Options::computer_vs_computer();
    World::new(
        Game::Crusade,
        neutral_data(),
        terrain,
        terrain_types,
        Hexes::default(),
        generals,
        units,
        Score::new(Game::Crusade, variant, options.game_balance),
        CommanderFlags::new(&options),
        Box::new(ChaChaSource::new(7)),
        MessageSync::collecting(),
    )
}

/// Put unit `index` of `side` into the game at `xy`.
pub fn place_unit(
    world: &mut World,
    side: usize,
    index: usize,
    xy: UnitCoords,
    men: i32,
    tanks: i32,
) -> Unit {
    let unit = world.units.get_mut(side, index);
    unit.in_game = true;
    unit.xy = xy;
    unit.men_count = men;
    unit.tank_count = tanks;
    unit.supply_level = 100;
    *unit
}

/// Start at 10:00 on the first of the sixth month, clear weather.
pub fn test_start() -> ScenarioStart {
    ScenarioStart {
        name: "TEST".into(),
        file_prefix: "TEST".into(),
        start_hour: 10,
        start_month: 5,
        start_year: 44,
        start_supply_levels: [500, 500],
        max_x: 63,
        max_y: 63,
        ..ScenarioStart::default()
    }
}

/// A game in [`test_world`] with computers on both sides.
pub fn test_game_state() -> GameState {
    let world = test_world();
    let variants = vec![world.score.variant().clone()];
    GameState::new(world, &test_start(), variants, 0, Options::computer_vs_computer())
}
