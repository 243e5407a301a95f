//! Scenario bundles: every static input of a scenario in one serializable
//! document.
//!
//! Hand-authored fixtures are written in RON; compact files use bincode.
//! A bundle can also be decoded from the raw record images of the original
//! game files with [`ScenarioBundle::decode`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::data::generals::Generals;
use crate::data::generic::Generic;
use crate::data::hexes::Hexes;
use crate::data::map::{Map, MAP_HEIGHT, MAP_WIDTH};
use crate::data::scenario::{Game, ScenarioStart};
use crate::data::scenario_data::ScenarioData;
use crate::data::terrain::Terrain;
use crate::data::variants::{parse_variants, variant_at, Variant};
use crate::error::{GameError, Result};
use crate::game_state::GameState;
use crate::message_sync::MessageSync;
use crate::options::{CommanderFlags, Options};
use crate::rng::RandomSource;
use crate::score::Score;
use crate::terrain_types::TerrainTypeMap;
use crate::units::Units;
use crate::world::World;

/// Raw record images of one scenario, as stored by the original games.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRecords<'a> {
    /// Scenario start file.
    pub start: &'a [u8],
    /// Scenario data tables.
    pub data: &'a [u8],
    /// Generals.
    pub generals: &'a [u8],
    /// Neighbour score tables.
    pub hexes: &'a [u8],
    /// Shared terrain type table.
    pub generic: &'a [u8],
    /// City records and terrain weights.
    pub terrain: &'a [u8],
    /// Map tiles.
    pub map: &'a [u8],
    /// Unit records of both sides.
    pub units: &'a [u8],
    /// Variants.
    pub variants: &'a [u8],
}

/// All static inputs of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioBundle {
    /// Game of the series.
    pub game: Game,
    /// Clock, supply and viewport at the start.
    pub start: ScenarioStart,
    /// Per-type and per-terrain tables.
    pub data: ScenarioData,
    /// Generals of both sides.
    pub generals: Generals,
    /// Neighbour score tables.
    pub hexes: Hexes,
    /// Terrain type of each tile code.
    pub generic: Generic,
    /// Cities and terrain weights.
    pub terrain: Terrain,
    /// Map tiles.
    pub map: Map,
    /// Initial units.
    pub units: Units,
    /// Playable variants.
    pub variants: Vec<Variant>,
}

fn codec_error(action: &'static str, message: impl ToString) -> GameError {
    GameError::Serialization {
        action,
        what: "scenario bundle",
        message: message.to_string(),
    }
}

impl ScenarioBundle {
    /// Decode a bundle from raw record images.
    ///
    /// # Errors
    ///
    /// Returns an error if any record is malformed.
    pub fn decode(records: &ScenarioRecords<'_>) -> Result<Self> {
        let start = ScenarioStart::parse(records.start)?;
        let game = start.game()?;
        let data = ScenarioData::parse(records.data)?;
        let units = Units::parse(records.units, data.unit_types.len())?;
        Ok(Self {
            game,
            start,
            generals: Generals::parse(records.generals)?,
            hexes: Hexes::parse(records.hexes)?,
            generic: Generic::parse(records.generic)?,
            terrain: Terrain::parse(records.terrain)?,
            map: Map::parse(records.map, MAP_WIDTH, MAP_HEIGHT)?,
            units,
            variants: parse_variants(records.variants)?,
            data,
        })
    }

    /// Parse a RON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid bundle.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        ron::from_str(ron).map_err(|e| codec_error("decode", e))
    }

    /// Render as a pretty-printed RON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| codec_error("encode", e))
    }

    /// Decode a bincode blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is not a valid bundle.
    pub fn from_bincode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| codec_error("decode", e))
    }

    /// Encode as a bincode blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bincode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| codec_error("encode", e))
    }

    /// Load a bundle from a file. Files ending in `.ron` are read as RON,
    /// anything else as bincode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bundle = if is_ron(path) {
            Self::from_ron_str(&std::fs::read_to_string(path)?)
        } else {
            Self::from_bincode(&std::fs::read(path)?)
        }
        .map_err(|e| GameError::DataParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), name = %bundle.start.name, "scenario bundle loaded");
        Ok(bundle)
    }

    /// Write the bundle to a file, picking the format like [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if is_ron(path) {
            std::fs::write(path, self.to_ron_string()?)?;
        } else {
            std::fs::write(path, self.to_bincode()?)?;
        }
        Ok(())
    }

    /// Set up a game of variant `variant` in this scenario.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidVariant`] if the variant does not exist.
    pub fn new_game(
        &self,
        variant: usize,
        options: Options,
        rng: Box<dyn RandomSource>,
        sync: MessageSync,
    ) -> Result<GameState> {
        let score = Score::new(self.game, variant_at(&self.variants, variant)?.clone(), options.game_balance);
        let world = World::new(
            self.game,
            self.data.clone(),
            self.terrain.clone(),
            TerrainTypeMap::new(self.map.clone(), &self.generic),
            self.hexes.clone(),
            self.generals.clone(),
            self.units.clone(),
            score,
            CommanderFlags::new(&options),
            rng,
            sync,
        );
        debug!(scenario = %self.start.name, variant, "new game");
        Ok(GameState::new(world, &self.start, self.variants.clone(), variant, options))
    }
}

fn is_ron(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "ron")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generals::{General, GENERALS_PER_SIDE};
    use crate::data::terrain::City;
    use crate::rng::ChaChaSource;
    use crate::testing::{neutral_data, test_start};
    use crate::units::{Unit, UNITS_PER_SIDE};

    fn bundle() -> ScenarioBundle {
        let mut units = Units::default();
        for side in 0..2 {
            units.0[side] = (0..UNITS_PER_SIDE)
                .map(|index| Unit {
                    side,
                    index,
                    ..Unit::default()
                })
                .collect();
        }
        ScenarioBundle {
            game: Game::Crusade,
            start: test_start(),
            data: neutral_data(),
            generals: Generals([
                vec![General::default(); GENERALS_PER_SIDE],
                vec![General::default(); GENERALS_PER_SIDE],
            ]),
            hexes: Hexes::default(),
            generic: Generic::default(),
            terrain: Terrain {
                cities: vec![City {
                    name: "TOWN".into(),
                    ..City::default()
                }],
                coeffs: [[8; 16]; 16],
            },
            map: Map::filled(MAP_WIDTH, MAP_HEIGHT, 0),
            units,
            variants: vec![Variant {
                name: "SHORT".into(),
                length_in_days: 2,
                ..Variant::default()
            }],
        }
    }

    #[test]
    fn test_ron_document_parses_back() {
        let bundle = bundle();
        let ron = bundle.to_ron_string().unwrap();
        assert!(ron.contains("SHORT"));
        assert_eq!(ScenarioBundle::from_ron_str(&ron).unwrap(), bundle);
    }

    #[test]
    fn test_file_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = bundle();
        for name in ["scenario.ron", "scenario.bin"] {
            let path = dir.path().join(name);
            bundle.save(&path).unwrap();
            assert_eq!(ScenarioBundle::load(&path).unwrap(), bundle);
        }
        let text = std::fs::read_to_string(dir.path().join("scenario.ron")).unwrap();
        assert!(text.trim_start().starts_with('('));
    }

    #[test]
    fn test_malformed_document_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(game: Crusade").unwrap();
        let err = ScenarioBundle::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.ron"), "{err}");
    }

    #[test]
    fn test_new_game_rejects_missing_variant() {
        let result = bundle().new_game(
            3,
            Options::computer_vs_computer(),
            Box::new(ChaChaSource::new(1)),
            MessageSync::collecting(),
        );
        assert!(matches!(result, Err(GameError::InvalidVariant { index: 3, count: 1 })));
    }

    #[test]
    fn test_new_game_starts_at_scenario_clock() {
        let state = bundle()
            .new_game(
                0,
                Options::computer_vs_computer(),
                Box::new(ChaChaSource::new(1)),
                MessageSync::collecting(),
            )
            .unwrap();
        assert_eq!(state.hour(), 10);
        assert_eq!(state.supply_levels(), [500, 500]);
        assert_eq!(state.variant().name, "SHORT");
    }
}
