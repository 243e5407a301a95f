//! Saved games.
//!
//! A save holds, in order: the unit records, the city owner and victory
//! point bytes, the first 255 bytes of the scenario tables, a fixed-layout
//! little-endian record of the clock, score and AI maps, and the flashback
//! history. The fixed record is written with `bincode`, whose default
//! encoding of the fields below has no padding and no length prefixes.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::debug;

use crate::error::{GameError, Result};
use crate::flashback::FlashbackHistory;
use crate::game_state::GameState;
use crate::influence::{SmallMap, TinyMap, SMALL_MAP_SIZE, TINY_MAP_SIZE};
use crate::units::Units;

/// Size of the encoded [`SaveData`] record.
pub const SAVE_DATA_LEN: usize = 3233;

type SavedSmallMap = [[[i16; SMALL_MAP_SIZE]; SMALL_MAP_SIZE]; 2];
type SavedTinyMap = [[[i16; TINY_MAP_SIZE]; TINY_MAP_SIZE]; 2];

/// Clock, score and AI state in their stored widths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SaveData {
    minute: u8,
    hour: u8,
    day: u8,
    month: u8,
    year: u16,
    days_elapsed: u8,
    weather: u8,
    is_night: bool,
    commander_flags: u8,
    supply_levels: [u16; 2],
    men_lost: [u16; 2],
    tanks_lost: [u16; 2],
    cities_held: [u16; 2],
    critical_locations_captured: [u8; 2],
    selected_variant: u8,
    units_updated: u8,
    update_quota: u8,
    last_updated_unit: u8,
    last_analysed_side: u8,
    troops: SavedSmallMap,
    importance: SavedSmallMap,
    strength: SavedSmallMap,
    tiny_troops: SavedTinyMap,
    tiny_importance: SavedTinyMap,
}

fn narrow(values: [i32; 2]) -> [u16; 2] {
    values.map(|v| v as u16)
}

fn save_small(map: &SmallMap) -> SavedSmallMap {
    map.map(|side| side.map(|column| column.map(|v| v as i16)))
}

fn save_tiny(map: &TinyMap) -> SavedTinyMap {
    map.map(|side| side.map(|column| column.map(|v| v as i16)))
}

fn load_small(map: &SavedSmallMap) -> SmallMap {
    map.map(|side| side.map(|column| column.map(i32::from)))
}

fn load_tiny(map: &SavedTinyMap) -> TinyMap {
    map.map(|side| side.map(|column| column.map(i32::from)))
}

fn widen(values: [u16; 2]) -> [i32; 2] {
    values.map(i32::from)
}

impl GameState {
    fn save_data(&self) -> SaveData {
        let score = &self.world.score;
        let maps = &self.ai.maps;
        SaveData {
            minute: self.minute as u8,
            hour: self.hour as u8,
            day: self.day as u8,
            month: self.month as u8,
            year: self.year as u16,
            days_elapsed: self.days_elapsed as u8,
            weather: self.weather as u8,
            is_night: self.is_night,
            commander_flags: self.world.commander_flags.serialize(),
            supply_levels: narrow(self.supply_levels),
            men_lost: narrow(score.men_lost),
            tanks_lost: narrow(score.tanks_lost),
            cities_held: narrow(score.cities_held),
            critical_locations_captured: score.critical_locations_captured.map(|v| v as u8),
            selected_variant: self.selected_variant as u8,
            units_updated: self.units_updated as u8,
            update_quota: self.update_quota as u8,
            last_updated_unit: self.ai.last_updated_unit as u8,
            last_analysed_side: self.ai.last_analysed_side as u8,
            troops: save_small(&maps.troops),
            importance: save_small(&maps.importance),
            strength: save_small(&maps.strength),
            tiny_troops: save_tiny(&maps.tiny_troops),
            tiny_importance: save_tiny(&maps.tiny_importance),
        }
    }

    fn apply_save_data(&mut self, data: &SaveData) -> Result<()> {
        let selected_variant = usize::from(data.selected_variant);
        if selected_variant >= self.variants.len() {
            return Err(GameError::InvalidVariant {
                index: selected_variant,
                count: self.variants.len(),
            });
        }
        self.minute = i32::from(data.minute);
        self.hour = i32::from(data.hour);
        self.day = i32::from(data.day);
        self.month = i32::from(data.month);
        self.year = i32::from(data.year);
        self.days_elapsed = i32::from(data.days_elapsed);
        self.weather = i32::from(data.weather);
        self.is_night = data.is_night;
        self.world.commander_flags.deserialize(data.commander_flags);
        self.supply_levels = widen(data.supply_levels);
        let score = &mut self.world.score;
        score.men_lost = widen(data.men_lost);
        score.tanks_lost = widen(data.tanks_lost);
        score.cities_held = widen(data.cities_held);
        score.critical_locations_captured = data.critical_locations_captured.map(i32::from);
        self.selected_variant = selected_variant;
        self.units_updated = i32::from(data.units_updated);
        self.update_quota = i32::from(data.update_quota);
        self.ai.last_updated_unit = usize::from(data.last_updated_unit);
        self.ai.last_analysed_side = usize::from(data.last_analysed_side);
        let maps = &mut self.ai.maps;
        maps.troops = load_small(&data.troops);
        maps.importance = load_small(&data.importance);
        maps.strength = load_small(&data.strength);
        maps.tiny_troops = load_tiny(&data.tiny_troops);
        maps.tiny_importance = load_tiny(&data.tiny_importance);
        Ok(())
    }

    /// Write the game to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or a table no longer fits its
    /// stored width.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.world.units.write(writer)?;
        self.world.terrain.write_owner_and_victory_points(writer)?;
        self.world.data.write_first_255_bytes(writer)?;
        bincode::serialize_into(&mut *writer, &self.save_data())
            .map_err(|e| GameError::InvalidState(format!("Failed to serialize game state: {e}")))?;
        self.flashback.write(writer)?;
        debug!(day = self.days_elapsed, hour = self.hour, "game saved");
        Ok(())
    }

    /// Replace the game with one written by [`GameState::save`] for the same
    /// scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is truncated or does not match the
    /// scenario.
    pub fn load<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let units = Units::read(reader, self.world.data.unit_types.len())?;
        self.world.terrain.read_owner_and_victory_points(reader)?;
        self.world.data.read_first_255_bytes(reader)?;
        let mut record = [0u8; SAVE_DATA_LEN];
        reader.read_exact(&mut record)?;
        let data: SaveData = bincode::deserialize(&record)
            .map_err(|e| GameError::InvalidState(format!("Failed to deserialize game state: {e}")))?;
        let flashback = FlashbackHistory::read(reader)?;

        self.hide_all_units();
        self.world.units = units;
        self.apply_save_data(&data)?;
        self.flashback = flashback;
        self.show_all_visible_units();
        debug!(day = self.days_elapsed, hour = self.hour, "game loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::UnitCoords;
    use crate::testing::{place_unit, test_game_state};

    #[test]
    fn test_record_size() {
        let state = test_game_state();
        let bytes = bincode::serialize(&state.save_data()).unwrap();
        assert_eq!(bytes.len(), SAVE_DATA_LEN);
    }

    #[test]
    fn test_record_layout_starts_with_clock() {
        let mut state = test_game_state();
        state.minute = 30;
        state.year = 0x0102;
        let bytes = bincode::serialize(&state.save_data()).unwrap();
        assert_eq!(&bytes[..6], &[30, 10, 0, 5, 2, 1]);
    }

    #[test]
    fn test_save_load_save_is_identical() {
        let mut state = test_game_state();
        place_unit(&mut state.world, 0, 3, UnitCoords::new(20, 20), 70, 9);
        place_unit(&mut state.world, 1, 7, UnitCoords::new(41, 21), 60, 0);
        assert!(state.init());
        for _ in 0..30 {
            assert!(state.update());
        }
        let mut first = Vec::new();
        state.save(&mut first).unwrap();

        let mut loaded = test_game_state();
        loaded.load(&mut first.as_slice()).unwrap();
        let mut second = Vec::new();
        loaded.save(&mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(loaded.hour(), state.hour());
        assert_eq!(loaded.flashback(), state.flashback());
    }

    #[test]
    fn test_truncated_save_is_rejected() {
        let state = test_game_state();
        let mut bytes = Vec::new();
        state.save(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 10);
        let mut loaded = test_game_state();
        assert!(loaded.load(&mut bytes.as_slice()).is_err());
    }
}
