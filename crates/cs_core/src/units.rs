//! Units, their orders, and the per-side unit registry.
//!
//! Each side owns exactly [`UNITS_PER_SIDE`] slots. A [`Unit`] is a plain
//! `Copy` value: code that mutates a unit works on a local copy and writes it
//! back with [`Units::set`], so the registry always holds the one canonical
//! record per `(side, index)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use tracing::warn;

use crate::coords::UnitCoords;
use crate::data::generals::GENERALS_PER_SIDE;
use crate::data::scenario_data::ScenarioData;
use crate::error::{GameError, Result};
use crate::hex::ith_neighbour;

/// Bytes per unit record.
pub const UNIT_RECORD_LEN: usize = 16;

/// Unit slots per side.
pub const UNITS_PER_SIDE: usize = 64;

/// Morale of the last unit when its record is truncated to 15 bytes.
const TRUNCATED_RECORD_MORALE: u8 = 100;

/// What a unit is currently trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Order {
    /// Stay back, no objective.
    #[default]
    Reserve = 0,
    /// Hold a position.
    Defend = 1,
    /// Engage the enemy at the objective.
    Attack = 2,
    /// Travel to the objective.
    Move = 3,
}

impl Order {
    /// Order stored in bits 4..6 of a record byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Self::Reserve,
            1 => Self::Defend,
            2 => Self::Attack,
            _ => Self::Move,
        }
    }

    /// Numeric value of the order.
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reserve => "RESERVE",
            Self::Defend => "DEFEND",
            Self::Attack => "ATTACK",
            Self::Move => "MOVE",
        };
        f.write_str(name)
    }
}

/// A single unit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Unit {
    /// Owning side, 0 or 1.
    pub side: usize,
    /// Slot within the side.
    pub index: usize,
    /// On the map.
    pub in_game: bool,
    /// Adjacent to an enemy unit.
    pub in_contact: bool,
    /// Attacked during the last update of an enemy.
    pub under_attack: bool,
    /// Attacked a special unit.
    pub state2: bool,
    /// Connected to a supply depot.
    pub has_supply_line: bool,
    /// Slowed by nearby enemy units.
    pub state4: bool,
    /// The order was given by the player.
    pub has_local_command: bool,
    /// Spotted by the enemy.
    pub seen: bool,
    /// The computer already chose an order that should stick.
    pub order_bit4: bool,
    /// The next attack is fired from range.
    pub long_range_attack: bool,
    /// Unused record bit, preserved by the codec.
    pub formation_top_bit: bool,
    /// Position.
    pub xy: UnitCoords,
    /// Infantry strength.
    pub men_count: i32,
    /// Tank strength.
    pub tank_count: i32,
    /// Current formation, 0..8.
    pub formation: i32,
    /// Formation the unit is changing towards.
    pub target_formation: i32,
    /// Slot of the unit supplying this one.
    pub supply_unit: usize,
    /// Unit type, 0..16.
    pub unit_type: usize,
    /// Colour palette.
    pub color_palette: i32,
    /// Index into the side's unit names.
    pub name_index: usize,
    /// Current order.
    pub order: Order,
    /// Index of the commanding general within the side.
    pub general_index: usize,
    /// Supplies, 0..=255.
    pub supply_level: i32,
    /// Morale, 0..=250.
    pub morale: i32,
    /// Terrain byte of the record.
    pub terrain: u8,
    /// Bit `n` set means the unit starts off the map in variant `n`.
    pub variant_bitmap: u8,
    /// Half-day steps until an off-map unit appears.
    pub half_days_until_appear: i32,
    /// Inverse chance of appearing once the countdown ends.
    pub inv_appear_probability: i32,
    /// Fatigue, 0..=255.
    pub fatigue: i32,
    /// Objective; `x == 0` means none.
    pub objective: UnitCoords,
}

impl Unit {
    /// Decode one record.
    pub fn parse(data: &[u8; UNIT_RECORD_LEN], unit_type_count: usize) -> Result<Self> {
        let state = data[0];
        let unit_type = usize::from(data[7] & 15);
        if unit_type >= unit_type_count {
            return Err(GameError::InvalidUnitType(unit_type));
        }
        let mut general_index = usize::from(data[10]);
        if general_index >= GENERALS_PER_SIDE {
            warn!(general_index, "general index out of range, using the first general");
            general_index = 0;
        }
        let in_game = state & 128 != 0;
        let (objective, half_days, inv_probability) = if in_game {
            (UnitCoords::new(i32::from(data[11]), i32::from(data[12])), 0, 0)
        } else {
            (UnitCoords::default(), i32::from(data[11]), i32::from(data[12]))
        };
        Ok(Self {
            side: 0,
            index: 0,
            in_game,
            in_contact: state & 1 != 0,
            under_attack: state & 2 != 0,
            state2: state & 4 != 0,
            has_supply_line: state & 8 == 0,
            state4: state & 16 != 0,
            has_local_command: state & 32 != 0,
            seen: state & 64 != 0,
            order_bit4: data[9] & 8 != 0,
            long_range_attack: false,
            formation_top_bit: data[5] & 128 != 0,
            xy: UnitCoords::new(i32::from(data[1]), i32::from(data[2])),
            men_count: i32::from(data[3]),
            tank_count: i32::from(data[4]),
            formation: i32::from(data[5] & 7),
            target_formation: i32::from(data[9] & 7),
            supply_unit: usize::from((data[5] >> 4) & 7),
            unit_type,
            color_palette: i32::from(data[7] >> 4),
            name_index: usize::from(data[8] & 127),
            order: Order::from_bits((data[9] & 48) >> 4),
            general_index,
            supply_level: i32::from(data[14]),
            morale: i32::from(data[15]),
            terrain: data[13],
            // The variant bitmap shares its byte with the fatigue.
            variant_bitmap: data[6],
            half_days_until_appear: half_days,
            inv_appear_probability: inv_probability,
            fatigue: i32::from(data[6]),
            objective,
        })
    }

    /// Encode the record.
    #[must_use]
    pub fn encode(&self) -> [u8; UNIT_RECORD_LEN] {
        let mut data = [0u8; UNIT_RECORD_LEN];
        let flags = [
            (self.in_contact, 1u8),
            (self.under_attack, 2),
            (self.state2, 4),
            (!self.has_supply_line, 8),
            (self.state4, 16),
            (self.has_local_command, 32),
            (self.seen, 64),
            (self.in_game, 128),
        ];
        data[0] = flags
            .iter()
            .filter(|(set, _)| *set)
            .fold(0, |acc, (_, bit)| acc | bit);
        data[1] = self.xy.x as u8;
        data[2] = self.xy.y as u8;
        data[3] = self.men_count as u8;
        data[4] = self.tank_count as u8;
        data[5] = (self.formation as u8).wrapping_add((self.supply_unit as u8) << 4);
        if self.formation_top_bit {
            data[5] |= 128;
        }
        data[6] = self.fatigue as u8;
        data[7] = (self.unit_type as u8).wrapping_add((self.color_palette as u8) << 4);
        data[8] = self.name_index as u8;
        data[9] = (self.target_formation as u8).wrapping_add((self.order as u8) << 4);
        if self.order_bit4 {
            data[9] |= 8;
        }
        data[10] = self.general_index as u8;
        if self.in_game {
            data[11] = self.objective.x as u8;
            data[12] = self.objective.y as u8;
        } else {
            data[11] = self.half_days_until_appear as u8;
            data[12] = self.inv_appear_probability as u8;
        }
        data[13] = self.terrain;
        data[14] = self.supply_level as u8;
        data[15] = self.morale as u8;
        data
    }

    /// Take the unit off the map and reset its status flags.
    pub fn clear_state(&mut self) {
        self.in_contact = false;
        self.under_attack = false;
        self.state2 = false;
        self.has_supply_line = true;
        self.state4 = false;
        self.has_local_command = false;
        self.seen = false;
        self.in_game = false;
    }

    /// In contact with the enemy or spotted by it.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.in_contact || self.seen
    }

    /// Distance from the unit to its objective.
    #[must_use]
    pub const fn distance_to_objective(&self) -> i32 {
        self.xy.distance_to(self.objective)
    }

    /// Unit name followed by its type name.
    #[must_use]
    pub fn full_name(&self, data: &ScenarioData) -> String {
        let name = data.unit_names[self.side]
            .get(self.name_index)
            .map_or("", String::as_str);
        let type_name = data.unit_types.get(self.unit_type).map_or("", String::as_str);
        format!("{name} {type_name}")
    }
}

/// Units of both sides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Units(pub [Vec<Unit>; 2]);

impl Units {
    /// Decode 128 records, 64 per side. The final record may be one byte
    /// short, in which case its morale is 100.
    pub fn parse(data: &[u8], unit_type_count: usize) -> Result<Self> {
        Self::read(&mut &data[..], unit_type_count)
    }

    /// Read 128 records from `reader`.
    pub fn read<R: Read>(reader: &mut R, unit_type_count: usize) -> Result<Self> {
        let mut units: [Vec<Unit>; 2] = Default::default();
        for i in 0..2 * UNITS_PER_SIDE {
            let mut record = [0u8; UNIT_RECORD_LEN];
            let read = read_up_to(reader, &mut record)?;
            if read < UNIT_RECORD_LEN {
                if i != 2 * UNITS_PER_SIDE - 1 || read != UNIT_RECORD_LEN - 1 {
                    return Err(GameError::short("unit", UNIT_RECORD_LEN, read));
                }
                record[UNIT_RECORD_LEN - 1] = TRUNCATED_RECORD_MORALE;
            }
            let side = i / UNITS_PER_SIDE;
            let mut unit = Unit::parse(&record, unit_type_count)?;
            unit.side = side;
            unit.index = units[side].len();
            units[side].push(unit);
        }
        Ok(Self(units))
    }

    /// Write all records, padding each side to 64 slots with zeroes.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode())?;
        Ok(())
    }

    /// Encode all records, padding each side to 64 slots with zeroes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(2 * UNITS_PER_SIDE * UNIT_RECORD_LEN);
        for side_units in &self.0 {
            for unit in side_units {
                data.extend_from_slice(&unit.encode());
            }
            let padding = UNITS_PER_SIDE.saturating_sub(side_units.len());
            data.resize(data.len() + padding * UNIT_RECORD_LEN, 0);
        }
        data
    }

    /// Units of `side`.
    #[must_use]
    pub fn side(&self, side: usize) -> &[Unit] {
        &self.0[side]
    }

    /// Copy of unit `index` of `side`.
    ///
    /// # Panics
    ///
    /// Panics on an invalid slot.
    #[must_use]
    pub fn get(&self, side: usize, index: usize) -> Unit {
        self.0[side][index]
    }

    /// Mutable access to unit `index` of `side`.
    pub fn get_mut(&mut self, side: usize, index: usize) -> &mut Unit {
        &mut self.0[side][index]
    }

    /// Store `unit` in its slot.
    pub fn set(&mut self, unit: Unit) {
        self.0[unit.side][unit.index] = unit;
    }

    /// All units, side 0 first.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.0.iter().flatten()
    }

    /// All units, side 0 first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.0.iter_mut().flatten()
    }

    /// The in-game unit at `xy`, if any.
    #[must_use]
    pub fn find_unit_at(&self, xy: UnitCoords) -> Option<Unit> {
        self.iter().find(|u| u.in_game && u.xy == xy).copied()
    }

    /// The in-game unit of `side` at `xy`, if any.
    #[must_use]
    pub fn find_unit_of_side_at(&self, xy: UnitCoords, side: usize) -> Option<Unit> {
        self.0[side].iter().find(|u| u.in_game && u.xy == xy).copied()
    }

    /// Whether any in-game unit stands at `xy`.
    #[must_use]
    pub fn is_unit_at(&self, xy: UnitCoords) -> bool {
        self.iter().any(|u| u.in_game && u.xy == xy)
    }

    /// Whether an in-game unit of `side` stands at `xy`.
    #[must_use]
    pub fn is_unit_of_side_at(&self, xy: UnitCoords, side: usize) -> bool {
        self.0[side].iter().any(|u| u.in_game && u.xy == xy)
    }

    /// Number of the six neighbours of `xy` occupied by units of `side`.
    #[must_use]
    pub fn neighbour_unit_count(&self, xy: UnitCoords, side: usize) -> i32 {
        (0..6)
            .filter(|i| self.is_unit_of_side_at(ith_neighbour(xy, *i), side))
            .count() as i32
    }
}

/// Fill `buf` from `reader`, stopping early only at end of input.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> [u8; UNIT_RECORD_LEN] {
        [
            128 | 64 | 8 | 1,
            40,
            20,
            30,
            12,
            0x80 | (3 << 4) | 5,
            9,
            (2 << 4) | 4,
            7,
            (2 << 4) | 8 | 3,
            5,
            44,
            22,
            17,
            90,
            120,
        ]
    }

    #[test]
    fn test_parse_unit_record() {
        let unit = Unit::parse(&record(), 16).unwrap();
        assert!(unit.in_game);
        assert!(unit.in_contact);
        assert!(!unit.has_supply_line);
        assert!(unit.seen);
        assert!(!unit.state4);
        assert_eq!(unit.xy, UnitCoords::new(40, 20));
        assert_eq!(unit.men_count, 30);
        assert_eq!(unit.tank_count, 12);
        assert_eq!(unit.formation, 5);
        assert_eq!(unit.supply_unit, 3);
        assert!(unit.formation_top_bit);
        assert_eq!(unit.fatigue, 9);
        assert_eq!(unit.variant_bitmap, 9);
        assert_eq!(unit.unit_type, 4);
        assert_eq!(unit.color_palette, 2);
        assert_eq!(unit.name_index, 7);
        assert_eq!(unit.target_formation, 3);
        assert!(unit.order_bit4);
        assert_eq!(unit.order, Order::Attack);
        assert_eq!(unit.general_index, 5);
        assert_eq!(unit.objective, UnitCoords::new(44, 22));
        assert_eq!(unit.terrain, 17);
        assert_eq!(unit.supply_level, 90);
        assert_eq!(unit.morale, 120);
        assert_eq!(unit.encode(), record());
    }

    #[test]
    fn test_off_map_unit_uses_appearance_fields() {
        let mut data = record();
        data[0] = 0;
        let unit = Unit::parse(&data, 16).unwrap();
        assert!(!unit.in_game);
        assert_eq!(unit.half_days_until_appear, 44);
        assert_eq!(unit.inv_appear_probability, 22);
        assert_eq!(unit.objective, UnitCoords::default());
        assert_eq!(unit.encode()[11..13], [44, 22]);
    }

    #[test]
    fn test_invalid_unit_type() {
        let err = Unit::parse(&record(), 4).unwrap_err();
        assert!(matches!(err, GameError::InvalidUnitType(4)));
    }

    #[test]
    fn test_general_index_out_of_range_falls_back() {
        let mut data = record();
        data[10] = 200;
        assert_eq!(Unit::parse(&data, 16).unwrap().general_index, 0);
    }

    #[test]
    fn test_truncated_last_record() {
        let mut data = vec![0u8; 128 * UNIT_RECORD_LEN];
        data.pop();
        let units = Units::parse(&data, 16).unwrap();
        assert_eq!(units.side(1).len(), 64);
        assert_eq!(units.get(1, 63).morale, 100);
        assert_eq!(units.get(1, 62).morale, 0);

        data.pop();
        assert!(Units::parse(&data, 16).is_err());
    }

    #[test]
    fn test_units_round_trip_and_indices() {
        let mut data = vec![0u8; 128 * UNIT_RECORD_LEN];
        data[70 * UNIT_RECORD_LEN..71 * UNIT_RECORD_LEN].copy_from_slice(&record());
        let units = Units::parse(&data, 16).unwrap();
        let unit = units.get(1, 6);
        assert_eq!(unit.side, 1);
        assert_eq!(unit.index, 6);
        assert_eq!(units.encode(), data);
    }

    #[test]
    fn test_spatial_lookup() {
        let mut units = Units::default();
        for side in 0..2 {
            for index in 0..UNITS_PER_SIDE {
                units.0[side].push(Unit {
                    side,
                    index,
                    ..Unit::default()
                });
            }
        }
        let xy = UnitCoords::new(10, 10);
        let mut friend = units.get(0, 3);
        friend.in_game = true;
        friend.xy = xy;
        units.set(friend);
        let mut enemy = units.get(1, 0);
        enemy.in_game = true;
        enemy.xy = ith_neighbour(xy, 4);
        units.set(enemy);

        assert_eq!(units.find_unit_at(xy).unwrap().index, 3);
        assert!(units.is_unit_of_side_at(xy, 0));
        assert!(!units.is_unit_of_side_at(xy, 1));
        assert_eq!(units.neighbour_unit_count(xy, 1), 1);
        assert_eq!(units.neighbour_unit_count(xy, 0), 0);
        assert!(units.find_unit_of_side_at(UnitCoords::new(0, 0), 0).is_none());
    }

    #[test]
    fn test_clear_state() {
        let mut unit = Unit::parse(&record(), 16).unwrap();
        unit.clear_state();
        assert!(!unit.in_game);
        assert!(unit.has_supply_line);
        assert!(!unit.is_visible());
    }
}
