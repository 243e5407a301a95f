//! Synthetic scenario fixtures.
//!
//! The original scenario files are not redistributable, so tests and
//! benchmarks play on a generated front: two armies facing each other across
//! a river on a 64x64 map, a supply depot and a few reinforcements per side,
//! and a ring of contested cities in the middle.

use cs_core::bundle::ScenarioBundle;
use cs_core::coords::{MapCoords, UnitCoords};
use cs_core::data::generals::{General, Generals, GENERALS_PER_SIDE};
use cs_core::data::generic::Generic;
use cs_core::data::hexes::{Hexes, NeighbourTable};
use cs_core::data::map::{Map, MAP_HEIGHT, MAP_WIDTH};
use cs_core::data::scenario::{Game, ScenarioStart};
use cs_core::data::scenario_data::ScenarioData;
use cs_core::data::terrain::{City, Terrain};
use cs_core::data::variants::Variant;
use cs_core::units::{Order, Unit, Units, UNITS_PER_SIDE};

/// Tile codes of the synthetic map. The code doubles as the terrain type.
pub mod tiles {
    /// Open ground.
    pub const CLEAR: u8 = 0;
    /// Woods.
    pub const FOREST: u8 = 1;
    /// Broken ground.
    pub const ROUGH: u8 = 2;
    /// River.
    pub const RIVER: u8 = 3;
    /// Town.
    pub const CITY: u8 = 4;
    /// Hills.
    pub const HILLS: u8 = 5;
    /// Marsh.
    pub const SWAMP: u8 = 6;
    /// Sea; impassable.
    pub const SEA: u8 = 7;
}

/// Unit type of the supply depots.
pub const DEPOT_TYPE: usize = 9;

/// Slot of the supply depot on each side.
pub const DEPOT_SLOT: usize = 48;

/// First reinforcement slot on each side.
pub const REINFORCEMENT_SLOT: usize = 50;

const RIVER_COLUMN: i32 = 32;

const UNIT_TYPE_NAMES: [&str; 16] = [
    "INFANTRY", "ARMOR", "ARTILLERY", "MECHANIZED", "AIRBORNE", "RECON", "ENGINEER", "MARINE",
    "AIR WING", "DEPOT", "HQ", "TYPE11", "TYPE12", "TYPE13", "TYPE14", "TYPE15",
];

/// Builder for a synthetic scenario.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    /// Combat units in the line on each side, at most 48.
    pub front_units: usize,
    /// Off-map units per side arriving on later half-days.
    pub reinforcements: usize,
    /// Length of the first variant.
    pub length_in_days: i32,
    /// Game of the series the scenario pretends to be from.
    pub game: Game,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self {
            front_units: 24,
            reinforcements: 4,
            length_in_days: 2,
            game: Game::Crusade,
        }
    }
}

impl ScenarioBuilder {
    /// Default builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of combat units per side.
    #[must_use]
    pub fn front_units(mut self, count: usize) -> Self {
        self.front_units = count.min(DEPOT_SLOT);
        self
    }

    /// Set the number of reinforcements per side.
    #[must_use]
    pub fn reinforcements(mut self, count: usize) -> Self {
        self.reinforcements = count.min(UNITS_PER_SIDE - REINFORCEMENT_SLOT);
        self
    }

    /// Set the length of the first variant.
    #[must_use]
    pub fn length_in_days(mut self, days: i32) -> Self {
        self.length_in_days = days;
        self
    }

    /// Set the game.
    #[must_use]
    pub fn game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    /// Build the bundle.
    #[must_use]
    pub fn build(&self) -> ScenarioBundle {
        let cities = cities();
        ScenarioBundle {
            game: self.game,
            start: start(),
            data: synthetic_data(),
            generals: generals(),
            hexes: hexes(),
            generic: generic(),
            map: map(&cities),
            terrain: Terrain {
                cities,
                coeffs: [[8; 16]; 16],
            },
            units: self.units(),
            variants: vec![
                Variant {
                    name: "MEETING ENGAGEMENT".into(),
                    length_in_days: self.length_in_days,
                    critical_locations: [12, 12],
                    data3: 8,
                    cities_held: [20, 20],
                },
                Variant {
                    name: "CAMPAIGN".into(),
                    length_in_days: self.length_in_days * 3,
                    critical_locations: [12, 12],
                    data3: 10,
                    cities_held: [10, 30],
                },
            ],
        }
    }

    fn units(&self) -> Units {
        let mut units = Units::default();
        for side in 0..2 {
            units.0[side] = (0..UNITS_PER_SIDE)
                .map(|index| Unit {
                    side,
                    index,
                    name_index: index,
                    general_index: index % GENERALS_PER_SIDE,
                    color_palette: side as i32,
                    order: Order::Reserve,
                    has_supply_line: true,
                    ..Unit::default()
                })
                .collect();
            for i in 0..self.front_units {
                let unit_type = [0, 0, 1, 0, 2, 3][i % 6];
                let y = 6 + i as i32;
                let column = if side == 0 { 20 - (i % 3) as i32 } else { 44 + (i % 3) as i32 };
                let unit = units.get_mut(side, i);
                *unit = Unit {
                    in_game: true,
                    xy: unit_xy(column, y),
                    unit_type,
                    men_count: [60, 20, 30, 40][unit_type],
                    tank_count: [0, 40, 10, 20][unit_type],
                    supply_level: 120,
                    morale: 150,
                    formation: 1,
                    target_formation: 1,
                    ..*unit
                };
            }
            let depot = units.get_mut(side, DEPOT_SLOT);
            *depot = Unit {
                in_game: true,
                xy: unit_xy(if side == 0 { 10 } else { 54 }, 28),
                unit_type: DEPOT_TYPE,
                men_count: 10,
                supply_level: 255,
                morale: 100,
                ..*depot
            };
            for k in 0..self.reinforcements {
                let unit = units.get_mut(side, REINFORCEMENT_SLOT + k);
                *unit = Unit {
                    xy: unit_xy(if side == 0 { 14 } else { 50 }, 8 + 4 * k as i32),
                    unit_type: 1,
                    men_count: 20,
                    tank_count: 40,
                    supply_level: 200,
                    morale: 180,
                    half_days_until_appear: 1 + k as i32,
                    inv_appear_probability: 2,
                    ..*unit
                };
            }
        }
        units
    }
}

/// The default synthetic scenario.
#[must_use]
pub fn synthetic_bundle() -> ScenarioBundle {
    ScenarioBuilder::default().build()
}

fn start() -> ScenarioStart {
    ScenarioStart {
        name: "SYNTHETIC FRONT".into(),
        file_prefix: "SYN".into(),
        start_hour: 6,
        start_day: 5,
        start_month: 5,
        start_year: 44,
        start_weather: 0,
        start_supply_levels: [800, 800],
        min_x: 0,
        max_x: 63,
        min_y: 0,
        max_y: 63,
        ..ScenarioStart::default()
    }
}

/// Scenario tables of the synthetic front.
#[must_use]
pub fn synthetic_data() -> ScenarioData {
    let mut data = ScenarioData {
        data16_low: [4; 16],
        data16_high: [4; 16],
        unit_scores: [2, 3, 2, 3, 2, 1, 1, 2, 8, 10, 4, 1, 1, 1, 1, 1],
        recovery_rate: [2; 16],
        terrain_men_attack: [8, 7, 7, 5, 8, 7, 6, 0],
        terrain_tank_attack: [8, 5, 6, 4, 6, 6, 4, 0],
        terrain_men_defence: [8, 12, 10, 8, 14, 12, 8, 0],
        terrain_tank_defence: [8, 10, 9, 6, 12, 10, 6, 0],
        formation_men_attack: [6, 8, 10, 8, 6, 6, 6, 6],
        formation_tank_attack: [6, 8, 10, 8, 6, 6, 6, 6],
        formation_men_defence: [6, 10, 8, 12, 6, 6, 6, 6],
        formation_tank_defence: [6, 10, 8, 12, 6, 6, 6, 6],
        min_supply_type: 8,
        hex_size_in_miles: 5,
        data162: 2,
        data163: 2,
        max_resupply_amount: 48,
        max_supply_transport_cost: 255,
        avg_daily_supply_use: 8,
        data167: 4,
        minutes_per_tick: 60,
        unit_updates_per_time_increment: 24,
        men_multiplier: 100,
        tanks_multiplier: 10,
        data173: 2,
        data174: 4,
        data175: 4,
        data176: [[0, 0, 1, 1], [1, 1, 2, 2], [2, 2, 3, 3], [0, 1, 2, 3]],
        data192: [8, 8, 6, 6, 4, 4, 8, 8],
        unit_resupply_per_type: [24; 16],
        formation_change_speed: [[4; 8]; 2],
        resupply_rate: [40, 40],
        men_replacement_rate: [8, 8],
        tank_replacement_rate: [4, 4],
        side_color: [2, 12],
        data252: [4, 4],
        possible_weather: [2, 3, 3, 1, 1, 2, 0, 0, 0, 0, 1, 0, 1, 2, 2, 3],
        men_count_limit: [80; 16],
        tank_count_limit: [50; 16],
        unit_types: UNIT_TYPE_NAMES.iter().map(|s| (*s).to_string()).collect(),
        formations: ["COLUMN", "LINE", "ASSAULT", "DEFENSIVE", "DUG IN", "REST", "MARCH", "RESERVE"]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        experience: vec!["GREEN".into(), "VETERAN".into()],
        equipments: vec!["LIGHT".into(), "HEAVY".into()],
        months: [
            "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER", "OCTOBER",
            "NOVEMBER", "DECEMBER",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect(),
        sides: vec!["ALLIED".into(), "AXIS".into()],
        weather: vec!["CLEAR".into(), "CLOUDY".into(), "RAIN".into(), "SNOW".into()],
        colors: vec!["GREEN".into(), "GREY".into()],
        unit_names: [
            (0..UNITS_PER_SIDE).map(|i| format!("{} DIV", i + 1)).collect(),
            (0..UNITS_PER_SIDE).map(|i| format!("{}. DIVISION", i + 1)).collect(),
        ],
        ..ScenarioData::default()
    };
    for (unit_type, mask) in data.unit_mask.iter_mut().enumerate() {
        if unit_type >= 8 {
            *mask = 8;
        }
    }
    for (unit_type, uses) in data.unit_uses_supplies.iter_mut().enumerate() {
        *uses = unit_type < 8;
    }
    data.unit_can_move = [true; 16];
    // Artillery fires two hexes without taking losses.
    data.data32[2] = 130;
    let speeds = [10, 6, 6, 3, 8, 5, 3, 0];
    for (terrain_type, row) in data.move_speed_per_terrain_type_and_unit.iter_mut().enumerate() {
        *row = [speeds[terrain_type]; 16];
        if terrain_type == 0 {
            row[1] = 14;
            row[3] = 12;
        }
    }
    data
}

fn generals() -> Generals {
    let side = |names: &[&str; GENERALS_PER_SIDE]| -> Vec<General> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| General {
                attack: 6 + (i as i32 % 5),
                defence: 10 - (i as i32 % 5),
                movement: 8 + (i as i32 % 3),
                data1_high: i as i32 % 3 - 1,
                data2_high: 1 - i as i32 % 3,
                name: (*name).to_string(),
                ..General::default()
            })
            .collect()
    };
    Generals([
        side(&["ADAMS", "BAKER", "CLARK", "DAWES", "EVANS", "FISHER", "GRANT", "HAYES"]),
        side(&["AUER", "BRAUN", "DIETL", "EBERT", "FROMM", "GRAF", "HAHN", "KLUGE"]),
    ])
}

fn hexes() -> Hexes {
    let table = |scale: i32, offset: i32| -> NeighbourTable {
        let mut table = [[0; 8]; 6];
        for (kind, row) in table.iter_mut().enumerate() {
            for (count, value) in row.iter_mut().enumerate() {
                *value = (count as i32 - offset) * scale + kind as i32 % 2;
            }
        }
        table
    };
    Hexes {
        arr0: table(2, 2),
        arr48: table(-1, 0),
        arr96: table(1, 3),
        arr144: table(1, 1),
    }
}

fn generic() -> Generic {
    Generic {
        terrain_types: (0..64).map(|code| if code < 8 { code } else { 0 }).collect(),
        ..Generic::default()
    }
}

fn cities() -> Vec<City> {
    let city = |name: &str, x: i32, y: i32, owner: usize, victory_points: i32| City {
        name: name.into(),
        xy: unit_xy(x, y),
        owner,
        victory_points,
        variant_bitmap: 0,
    };
    vec![
        city("ALPHA", 30, 20, 0, 10),
        city("BRAVO", 34, 30, 1, 10),
        city("CHARLIE", 31, 41, 0, 5),
        city("DELTA", 33, 15, 1, 5),
        city("ECHO", 16, 28, 0, 3),
        city("FOXTROT", 48, 28, 1, 3),
        City {
            variant_bitmap: 1,
            ..city("GOLF", 32, 36, 1, 4)
        },
    ]
}

fn map(cities: &[City]) -> Map {
    let mut map = Map::filled(MAP_WIDTH, MAP_HEIGHT, tiles::CLEAR);
    for y in 0..MAP_HEIGHT {
        for x in 0..MAP_WIDTH {
            let xy = MapCoords::new(x, y);
            if !map.are_coords_valid(xy) {
                continue;
            }
            let tile = if x == 0 || y == 0 || y == MAP_HEIGHT - 1 || x >= MAP_WIDTH - 2 {
                tiles::SEA
            } else if x == RIVER_COLUMN {
                tiles::RIVER
            } else if (22..26).contains(&x) && (10..20).contains(&y) {
                tiles::FOREST
            } else if (38..42).contains(&x) && (34..44).contains(&y) {
                tiles::HILLS
            } else if (26..30).contains(&x) && (46..52).contains(&y) {
                tiles::SWAMP
            } else if (x * 7 + y * 3) % 23 == 0 {
                tiles::ROUGH
            } else {
                tiles::CLEAR
            };
            map.set_tile(xy, tile);
        }
    }
    for city in cities {
        map.set_tile(city.xy.to_map_coords(), tiles::CITY);
    }
    map
}

/// Unit coordinates of map tile `(x, y)`.
#[must_use]
pub fn unit_xy(x: i32, y: i32) -> UnitCoords {
    MapCoords::new(x, y).to_unit_coords()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_stand_on_passable_ground() {
        let bundle = synthetic_bundle();
        for unit in bundle.units.iter().filter(|u| u.in_game || u.half_days_until_appear > 0) {
            let tile = bundle.map.get_tile(unit.xy.to_map_coords());
            assert_ne!(tile, tiles::SEA, "{:?}", unit.xy);
        }
    }

    #[test]
    fn test_positions_are_unique() {
        let bundle = synthetic_bundle();
        let mut seen: Vec<UnitCoords> = bundle
            .units
            .iter()
            .filter(|u| u.in_game || u.half_days_until_appear > 0)
            .map(|u| u.xy)
            .collect();
        let count = seen.len();
        seen.sort_by_key(|xy| (xy.x, xy.y));
        seen.dedup();
        assert_eq!(seen.len(), count);
        assert_eq!(count, 2 * (24 + 1 + 4));
    }

    #[test]
    fn test_builder_limits() {
        let bundle = ScenarioBuilder::new().front_units(100).reinforcements(100).build();
        let side0 = bundle.units.side(0);
        assert!(side0[..DEPOT_SLOT].iter().all(|u| u.in_game));
        assert_eq!(side0[DEPOT_SLOT].unit_type, DEPOT_TYPE);
        assert!(side0[REINFORCEMENT_SLOT..].iter().all(|u| u.half_days_until_appear > 0));
    }

    #[test]
    fn test_records_encode() {
        let bundle = synthetic_bundle();
        let encoded = bundle.units.encode();
        let decoded = Units::parse(&encoded, bundle.data.unit_types.len()).unwrap();
        assert_eq!(decoded.side(1)[DEPOT_SLOT].unit_type, DEPOT_TYPE);
    }
}
