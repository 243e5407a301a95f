//! Per-scenario constant tables.
//!
//! The tables are decoded from a byte image laid out by offset. The same
//! offsets are used by the day-indexed patches that rewrite single entries
//! mid-game, so decoding goes through [`ScenarioData::update_data`] one byte
//! at a time.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{GameError, Result};
use crate::math::{in_range, signed_high_nibble, signed_low_nibble};
use crate::units::Order;

/// Smallest valid scenario data image.
pub const SCENARIO_DATA_MIN_LEN: usize = 512;

/// Offsets at or past this one are not patchable table entries.
pub const MAX_UPDATE_OFFSET: usize = 383;

/// Length of the re-encodable table prefix stored in saved games.
pub const FIRST_BYTES_LEN: usize = 255;

const STRING_LIST_COUNT: usize = 14;

/// At day `day` overwrite byte `offset` of the tables with `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataUpdate {
    /// Elapsed-day count at which the patch applies.
    pub day: i32,
    /// Table offset to patch.
    pub offset: usize,
    /// New byte value.
    pub value: u8,
}

/// Decoded scenario tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioData {
    /// Signed low nibble of bytes 0..16, per unit type.
    pub data0_low: [i32; 16],
    /// Signed high nibble of bytes 0..16, per unit type.
    pub data0_high: [i32; 16],
    /// Low nibble of bytes 16..32 (defensive tank factor), per unit type.
    pub data16_low: [i32; 16],
    /// High nibble of bytes 16..32 (offensive tank factor), per unit type.
    pub data16_high: [i32; 16],
    /// Attack range and ranged-fire flags, per unit type.
    pub data32: [i32; 16],
    /// Score for destroying a unit of this type. Types scoring above 7 are
    /// special units (supply depots, air wings).
    pub unit_scores: [i32; 16],
    /// Fatigue recovered per update, per unit type.
    pub recovery_rate: [i32; 16],
    /// Raw per-type flag byte.
    pub unit_mask: [u8; 16],
    /// Whether units of the type consume supplies (bit 3 clear).
    pub unit_uses_supplies: [bool; 16],
    /// Whether units of the type can move (bit 6 clear).
    pub unit_can_move: [bool; 16],
    /// Terrain multiplier for infantry attack, per terrain type.
    pub terrain_men_attack: [i32; 8],
    /// Terrain multiplier for tank attack, per terrain type.
    pub terrain_tank_attack: [i32; 8],
    /// Terrain multiplier for infantry defence, per terrain type.
    pub terrain_men_defence: [i32; 8],
    /// Terrain multiplier for tank defence, per terrain type.
    pub terrain_tank_defence: [i32; 8],
    /// Formation multiplier for infantry attack.
    pub formation_men_attack: [i32; 8],
    /// Formation multiplier for tank attack.
    pub formation_tank_attack: [i32; 8],
    /// Formation multiplier for infantry defence.
    pub formation_men_defence: [i32; 8],
    /// Formation multiplier for tank defence.
    pub formation_tank_defence: [i32; 8],
    /// Units of this type or above can supply others.
    pub min_supply_type: i32,
    /// Map scale.
    pub hex_size_in_miles: i32,
    /// Supply used by an attacker per attack.
    pub data162: i32,
    /// Supply lost by a defender per attack.
    pub data163: i32,
    /// Cap on a single resupply transfer.
    pub max_resupply_amount: i32,
    /// Budget of a supply truck route.
    pub max_supply_transport_cost: i32,
    /// Supplies used by each unit per day on average.
    pub avg_daily_supply_use: i32,
    /// Defence multiplier (/8) for units out of supplies.
    pub data167: i32,
    /// Game minutes per tick.
    pub minutes_per_tick: i32,
    /// Unit updates per tick, scaled by active unit count.
    pub unit_updates_per_time_increment: i32,
    /// Real men per stored man.
    pub men_multiplier: i32,
    /// Real tanks per stored tank.
    pub tanks_multiplier: i32,
    /// Fatigue gained per movement step.
    pub data173: i32,
    /// Divisor for city scores in Conflict.
    pub data174: i32,
    /// Chance (/8) that a Conflict unit gets spotted.
    pub data175: i32,
    /// Target formation per order and phase.
    pub data176: [[i32; 4]; 4],
    /// Move speed multiplier (/8) per formation.
    pub data192: [i32; 8],
    /// Low three bits of bytes 200..216, per unit type.
    pub data200_low: [i32; 16],
    /// Resupply amount per unit type.
    pub unit_resupply_per_type: [i32; 16],
    /// Formation change speed, `[direction][formation]`.
    pub formation_change_speed: [[i32; 8]; 2],
    /// Supply pool growth per side.
    pub resupply_rate: [i32; 2],
    /// Infantry replacement rate per side.
    pub men_replacement_rate: [i32; 2],
    /// Tank replacement rate per side.
    pub tank_replacement_rate: [i32; 2],
    /// Hue (/16) of each side.
    pub side_color: [i32; 2],
    /// Chance that a unit of the side stays spotted.
    pub data252: [i32; 2],
    /// Move speed `[terrain type][unit type]`.
    pub move_speed_per_terrain_type_and_unit: [[i32; 16]; 8],
    /// Four weather candidates per quarter of the year.
    pub possible_weather: [u8; 16],
    /// Daytime palette.
    pub daytime_palette: [u8; 8],
    /// Night palette.
    pub night_palette: [u8; 8],
    /// Replacement cap for men, per unit type.
    pub men_count_limit: [i32; 16],
    /// Replacement cap for tanks, per unit type.
    pub tank_count_limit: [i32; 16],
    /// Day-indexed table patches.
    pub data_updates: [DataUpdate; 21],
    /// Unit type names.
    pub unit_types: Vec<String>,
    /// Unnamed string list 1.
    pub strings1: Vec<String>,
    /// Formation names.
    pub formations: Vec<String>,
    /// Experience level names.
    pub experience: Vec<String>,
    /// Unnamed string list 4.
    pub strings4: Vec<String>,
    /// Equipment names.
    pub equipments: Vec<String>,
    /// Unit names per side.
    pub unit_names: [Vec<String>; 2],
    /// Unnamed string list 7.
    pub strings7: Vec<String>,
    /// Unnamed string list 9.
    pub strings9: Vec<String>,
    /// Month names.
    pub months: Vec<String>,
    /// Side names.
    pub sides: Vec<String>,
    /// Weather names.
    pub weather: Vec<String>,
    /// Colour names.
    pub colors: Vec<String>,
}

impl ScenarioData {
    /// Decode a scenario data image: the tables, then the string lists that
    /// start at byte 512.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < SCENARIO_DATA_MIN_LEN {
            return Err(GameError::short("scenario data", SCENARIO_DATA_MIN_LEN, data.len()));
        }
        let mut scenario = Self::default();
        for (i, value) in data[0..MAX_UPDATE_OFFSET].iter().enumerate() {
            scenario.update_data(i, *value);
        }
        scenario.possible_weather.copy_from_slice(&data[384..400]);
        scenario.daytime_palette.copy_from_slice(&data[400..408]);
        scenario.night_palette.copy_from_slice(&data[408..416]);
        for i in 0..16 {
            scenario.men_count_limit[i] = i32::from(data[416 + i]);
            scenario.tank_count_limit[i] = i32::from(data[432 + i]);
        }
        for (i, update) in scenario.data_updates.iter_mut().enumerate() {
            update.day = i32::from(data[448 + i * 3]);
            update.offset = usize::from(data[448 + 1 + i * 3]);
            update.value = data[448 + 2 + i * 3];
        }
        scenario.parse_strings(&data[SCENARIO_DATA_MIN_LEN..])?;
        Ok(scenario)
    }

    fn parse_strings(&mut self, data: &[u8]) -> Result<()> {
        // 16 little-endian offsets counted from the start of the 32-byte header.
        if data.len() < 32 {
            return Err(GameError::short("string header", 32, data.len()));
        }
        let offsets: Vec<i32> = data[..32]
            .chunks_exact(2)
            .map(|b| i32::from(b[0]) + 256 * i32::from(b[1]) - 32)
            .collect();
        let mut rest = &data[32..];
        for i in 0..STRING_LIST_COUNT {
            if offsets[i + 1] < offsets[i] {
                return Err(GameError::InvalidStrings(format!(
                    "non-monotonic string offsets num {}, {} ({}, {})",
                    i,
                    i + 1,
                    offsets[i],
                    offsets[i + 1]
                )));
            }
            let len = (offsets[i + 1] - offsets[i]) as usize;
            if rest.len() < len {
                return Err(GameError::short("string list", len, rest.len()));
            }
            let strings = split_strings(&rest[..len]);
            rest = &rest[len..];
            match i {
                0 => self.unit_types = strings,
                1 => self.strings1 = strings,
                2 => self.formations = strings,
                3 => self.experience = strings,
                4 => self.strings4 = strings,
                5 => self.equipments = strings,
                6 => self.unit_names[0] = strings,
                7 => self.strings7 = strings,
                8 => self.unit_names[1] = strings,
                9 => self.strings9 = strings,
                10 => self.months = strings,
                11 => self.sides = strings,
                12 => self.weather = strings,
                _ => self.colors = strings,
            }
        }
        Ok(())
    }

    /// String lists in storage order.
    fn string_lists(&self) -> [&Vec<String>; STRING_LIST_COUNT] {
        [
            &self.unit_types,
            &self.strings1,
            &self.formations,
            &self.experience,
            &self.strings4,
            &self.equipments,
            &self.unit_names[0],
            &self.strings7,
            &self.unit_names[1],
            &self.strings9,
            &self.months,
            &self.sides,
            &self.weather,
            &self.colors,
        ]
    }

    /// Set the table entry stored at `offset` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= 383`.
    pub fn update_data(&mut self, offset: usize, value: u8) {
        assert!(offset < MAX_UPDATE_OFFSET, "invalid offset {offset}");
        let v = i32::from(value);
        let o = offset as i32;
        match offset {
            _ if in_range(o, 0, 16) => {
                self.data0_low[offset] = signed_low_nibble(value);
                self.data0_high[offset] = signed_high_nibble(value);
            }
            _ if in_range(o, 16, 32) => {
                self.data16_low[offset - 16] = v & 15;
                self.data16_high[offset - 16] = v / 16;
            }
            _ if in_range(o, 32, 48) => self.data32[offset - 32] = v,
            _ if in_range(o, 48, 64) => self.unit_scores[offset - 48] = v,
            _ if in_range(o, 64, 80) => self.recovery_rate[offset - 64] = v,
            _ if in_range(o, 80, 96) => {
                self.unit_mask[offset - 80] = value;
                self.unit_uses_supplies[offset - 80] = value & 8 == 0;
                self.unit_can_move[offset - 80] = value & 64 == 0;
            }
            _ if in_range(o, 96, 104) => self.terrain_men_attack[offset - 96] = v,
            _ if in_range(o, 104, 112) => self.terrain_tank_attack[offset - 104] = v,
            _ if in_range(o, 112, 120) => self.terrain_men_defence[offset - 112] = v,
            _ if in_range(o, 120, 128) => self.terrain_tank_defence[offset - 120] = v,
            _ if in_range(o, 128, 136) => self.formation_men_attack[offset - 128] = v,
            _ if in_range(o, 136, 144) => self.formation_tank_attack[offset - 136] = v,
            _ if in_range(o, 144, 152) => self.formation_men_defence[offset - 144] = v,
            _ if in_range(o, 152, 160) => self.formation_tank_defence[offset - 152] = v,
            160 => self.min_supply_type = v,
            161 => self.hex_size_in_miles = v,
            162 => self.data162 = v,
            163 => self.data163 = v,
            164 => self.max_resupply_amount = v,
            165 => self.max_supply_transport_cost = v,
            166 => self.avg_daily_supply_use = v,
            167 => self.data167 = v,
            168 => self.minutes_per_tick = v,
            169 => self.unit_updates_per_time_increment = v,
            170 => self.men_multiplier = v,
            171 => self.tanks_multiplier = v,
            173 => self.data173 = v,
            174 => self.data174 = v,
            175 => self.data175 = v,
            _ if in_range(o, 176, 190) => {
                self.data176[(offset - 176) / 4][(offset - 176) % 4] = v;
            }
            _ if in_range(o, 192, 200) => self.data192[offset - 192] = v,
            _ if in_range(o, 200, 216) => {
                self.data200_low[offset - 200] = v & 7;
                self.unit_resupply_per_type[offset - 200] = (v & 240) >> 1;
            }
            _ if in_range(o, 216, 232) => {
                self.formation_change_speed[(offset - 216) / 8][(offset - 216) % 8] = v;
            }
            232 | 233 => self.resupply_rate[offset - 232] = v,
            234 | 235 => self.men_replacement_rate[offset - 234] = v,
            236 | 237 => self.tank_replacement_rate[offset - 236] = v,
            248 | 249 => self.side_color[offset - 248] = v,
            252 | 253 => self.data252[offset - 252] = v,
            _ if offset >= 255 => {
                self.move_speed_per_terrain_type_and_unit[(offset - 255) / 16][(offset - 255) % 16] =
                    v;
            }
            _ => {}
        }
    }

    /// Re-encode the first 255 bytes of the tables. Unused offsets are zero.
    #[must_use]
    pub fn first_255_bytes(&self) -> [u8; FIRST_BYTES_LEN] {
        let mut data = [0u8; FIRST_BYTES_LEN];
        for i in 0..16 {
            data[i] = (self.data0_low[i] as u8 & 15).wrapping_add((self.data0_high[i] as u8) << 4);
            data[16 + i] =
                (self.data16_low[i] as u8 & 15).wrapping_add((self.data16_high[i] as u8) << 4);
            data[32 + i] = self.data32[i] as u8;
            data[48 + i] = self.unit_scores[i] as u8;
            data[64 + i] = self.recovery_rate[i] as u8;
            data[80 + i] = self.unit_mask[i];
            data[200 + i] = (self.data200_low[i] + self.unit_resupply_per_type[i] * 2) as u8;
        }
        for i in 0..8 {
            data[96 + i] = self.terrain_men_attack[i] as u8;
            data[104 + i] = self.terrain_tank_attack[i] as u8;
            data[112 + i] = self.terrain_men_defence[i] as u8;
            data[120 + i] = self.terrain_tank_defence[i] as u8;
            data[128 + i] = self.formation_men_attack[i] as u8;
            data[136 + i] = self.formation_tank_attack[i] as u8;
            data[144 + i] = self.formation_men_defence[i] as u8;
            data[152 + i] = self.formation_tank_defence[i] as u8;
            data[192 + i] = self.data192[i] as u8;
        }
        let scalars = [
            (160, self.min_supply_type),
            (161, self.hex_size_in_miles),
            (162, self.data162),
            (163, self.data163),
            (164, self.max_resupply_amount),
            (165, self.max_supply_transport_cost),
            (166, self.avg_daily_supply_use),
            (167, self.data167),
            (168, self.minutes_per_tick),
            (169, self.unit_updates_per_time_increment),
            (170, self.men_multiplier),
            (171, self.tanks_multiplier),
            (173, self.data173),
            (174, self.data174),
            (175, self.data175),
        ];
        for (offset, value) in scalars {
            data[offset] = value as u8;
        }
        // The last order row only has two entries before offset 190.
        for offset in 176..190 {
            data[offset] = self.data176[(offset - 176) / 4][(offset - 176) % 4] as u8;
        }
        for dir in 0..2 {
            for formation in 0..8 {
                data[216 + dir * 8 + formation] = self.formation_change_speed[dir][formation] as u8;
            }
        }
        for side in 0..2 {
            data[232 + side] = self.resupply_rate[side] as u8;
            data[234 + side] = self.men_replacement_rate[side] as u8;
            data[236 + side] = self.tank_replacement_rate[side] as u8;
            data[248 + side] = self.side_color[side] as u8;
            data[252 + side] = self.data252[side] as u8;
        }
        data
    }

    /// Write the first 255 bytes of the tables.
    pub fn write_first_255_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.first_255_bytes())?;
        Ok(())
    }

    /// Read the first 255 bytes of the tables, overwriting the decoded values.
    pub fn read_first_255_bytes<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut data = [0u8; FIRST_BYTES_LEN];
        reader.read_exact(&mut data)?;
        for (i, v) in data.iter().enumerate() {
            self.update_data(i, *v);
        }
        Ok(())
    }

    /// Encode the complete data image, string lists included.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; SCENARIO_DATA_MIN_LEN];
        data[..FIRST_BYTES_LEN].copy_from_slice(&self.first_255_bytes());
        for terrain in 0..8 {
            for unit_type in 0..16 {
                data[255 + terrain * 16 + unit_type] =
                    self.move_speed_per_terrain_type_and_unit[terrain][unit_type] as u8;
            }
        }
        data[384..400].copy_from_slice(&self.possible_weather);
        data[400..408].copy_from_slice(&self.daytime_palette);
        data[408..416].copy_from_slice(&self.night_palette);
        for i in 0..16 {
            data[416 + i] = self.men_count_limit[i] as u8;
            data[432 + i] = self.tank_count_limit[i] as u8;
        }
        for (i, update) in self.data_updates.iter().enumerate() {
            data[448 + i * 3] = update.day as u8;
            data[448 + 1 + i * 3] = update.offset as u8;
            data[448 + 2 + i * 3] = update.value;
        }

        let lists: Vec<Vec<u8>> = self.string_lists().iter().map(|l| join_strings(l)).collect();
        let mut offset = 32usize;
        let mut header = Vec::with_capacity(32);
        for list in &lists {
            header.extend_from_slice(&(offset as u16).to_le_bytes());
            offset += list.len();
        }
        while header.len() < 32 {
            header.extend_from_slice(&(offset as u16).to_le_bytes());
        }
        data.extend_from_slice(&header);
        for list in lists {
            data.extend_from_slice(&list);
        }
        data
    }

    /// Formation entry `offset` (0..4) for `order`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not in `[0, 4)`.
    #[must_use]
    pub fn order_formation(&self, order: Order, offset: usize) -> i32 {
        assert!(offset < 4, "invalid formation table offset {offset}");
        self.data176[order as usize][offset]
    }

    /// Long-range attack reach, in hexes. The mask overlaps the weather
    /// flag at bit 8.
    #[must_use]
    pub fn attack_range(&self, unit_type: usize) -> i32 {
        self.data32[unit_type] & 31
    }

    /// Ranged fire is hampered by bad weather (non-Conflict flag).
    #[must_use]
    pub fn weather_hampers_fire(&self, unit_type: usize) -> bool {
        self.data32[unit_type] & 8 != 0
    }

    /// Ranged fire is hampered by bad weather (Conflict flag).
    #[must_use]
    pub fn weather_hampers_fire_alt(&self, unit_type: usize) -> bool {
        self.data32[unit_type] & 32 != 0
    }

    /// The unit targets its objective directly instead of stepping towards it.
    #[must_use]
    pub fn fires_directly(&self, unit_type: usize) -> bool {
        self.data32[unit_type] & 64 != 0
    }

    /// Ranged fire causes no losses to the firing unit.
    #[must_use]
    pub fn no_losses_at_range(&self, unit_type: usize) -> bool {
        self.data32[unit_type] & 128 != 0
    }

    /// Bit `bit` of the per-type flag byte.
    #[must_use]
    pub fn unit_mask_bit(&self, unit_type: usize, bit: u32) -> bool {
        self.unit_mask[unit_type] & (1 << bit) != 0
    }

    /// Units of this type score above 7: supply depots, air wings and the like.
    #[must_use]
    pub fn is_special_unit(&self, unit_type: usize) -> bool {
        self.unit_scores[unit_type] > 7
    }
}

/// Split a string list: every string ends with a byte above 0x7f, which
/// carries the last character plus 0x80. Bytes after the last terminator
/// are dropped.
fn split_strings(mut data: &[u8]) -> Vec<String> {
    let mut strings = Vec::new();
    while let Some(end) = data.iter().position(|b| *b > 0x7f) {
        let s: String = data[..=end]
            .iter()
            .enumerate()
            .map(|(j, b)| if j == end { char::from(b - 0x80) } else { char::from(*b) })
            .collect();
        strings.push(s);
        data = &data[end + 1..];
    }
    strings
}

fn join_strings(strings: &[String]) -> Vec<u8> {
    let mut out = Vec::new();
    for s in strings {
        let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
        if let Some((last, head)) = bytes.split_last() {
            out.extend_from_slice(head);
            out.push(last | 0x80);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> Vec<u8> {
        let mut data = ScenarioData::default();
        data.unit_types = vec!["INFANTRY".into(), "ARMOR".into()];
        data.formations = vec!["COLUMN".into(), "LINE".into()];
        data.months = vec!["JAN".into(), "FEB".into()];
        let mut bytes = data.encode();
        for (i, b) in bytes.iter_mut().enumerate().take(MAX_UPDATE_OFFSET) {
            *b = (i * 7 % 251) as u8;
        }
        bytes
    }

    #[test]
    fn test_parse_rejects_short_image() {
        let err = ScenarioData::parse(&[0u8; 100]).unwrap_err();
        assert!(matches!(err, GameError::ShortRecord { actual: 100, .. }));
    }

    #[test]
    fn test_nibble_decoding() {
        let mut data = ScenarioData::default();
        data.update_data(3, 0xf7);
        assert_eq!(data.data0_low[3], 7);
        assert_eq!(data.data0_high[3], -1);
        data.update_data(19, 0x5a);
        assert_eq!(data.data16_low[3], 10);
        assert_eq!(data.data16_high[3], 5);
    }

    #[test]
    fn test_unit_mask_flags() {
        let mut data = ScenarioData::default();
        data.update_data(80, 8);
        data.update_data(81, 64);
        assert!(!data.unit_uses_supplies[0]);
        assert!(data.unit_can_move[0]);
        assert!(data.unit_uses_supplies[1]);
        assert!(!data.unit_can_move[1]);
        assert!(data.unit_mask_bit(1, 6));
    }

    #[test]
    fn test_move_speed_offsets() {
        let mut data = ScenarioData::default();
        data.update_data(255, 9);
        data.update_data(255 + 16 * 7 + 15, 4);
        assert_eq!(data.move_speed_per_terrain_type_and_unit[0][0], 9);
        assert_eq!(data.move_speed_per_terrain_type_and_unit[7][15], 4);
    }

    #[test]
    #[should_panic(expected = "invalid offset")]
    fn test_update_data_rejects_large_offset() {
        ScenarioData::default().update_data(383, 1);
    }

    #[test]
    fn test_first_255_bytes_round_trip() {
        let parsed = ScenarioData::parse(&sample_image()).unwrap();
        let encoded = parsed.first_255_bytes();
        let mut reparsed = parsed.clone();
        reparsed
            .read_first_255_bytes(&mut std::io::Cursor::new(encoded.to_vec()))
            .unwrap();
        assert_eq!(parsed, reparsed);
        assert_eq!(reparsed.first_255_bytes(), encoded);
    }

    #[test]
    fn test_strings_decoding() {
        let parsed = ScenarioData::parse(&sample_image()).unwrap();
        assert_eq!(parsed.unit_types, vec!["INFANTRY", "ARMOR"]);
        assert_eq!(parsed.formations, vec!["COLUMN", "LINE"]);
        assert_eq!(parsed.months, vec!["JAN", "FEB"]);
        assert!(parsed.colors.is_empty());
    }

    #[test]
    fn test_attack_range_uses_low_five_bits() {
        let mut data = ScenarioData::default();
        data.update_data(32, 128 | 3);
        data.update_data(33, 8 | 2);
        data.update_data(34, 64 | 32 | 17);
        assert_eq!(data.attack_range(0), 3);
        assert_eq!(data.attack_range(1), 10);
        assert!(data.weather_hampers_fire(1));
        assert_eq!(data.attack_range(2), 17);
    }

    #[test]
    fn test_order_formation() {
        let mut data = ScenarioData::default();
        data.update_data(176 + 2 * 4 + 1, 5);
        assert_eq!(data.order_formation(Order::Attack, 1), 5);
    }

    #[test]
    #[should_panic(expected = "invalid formation table offset")]
    fn test_order_formation_rejects_offset() {
        let _ = ScenarioData::default().order_formation(Order::Reserve, 4);
    }
}
