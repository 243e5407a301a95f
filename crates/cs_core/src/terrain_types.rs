//! Terrain type lookup with an overlay of tiles occupied by shown units.

use serde::{Deserialize, Serialize};

use crate::coords::{MapCoords, UnitCoords};
use crate::data::generic::Generic;
use crate::data::map::Map;

/// Terrain type reported for tiles that are blocked: off the map or occupied
/// by a shown unit.
pub const BLOCKED_TERRAIN_TYPE: i32 = 7;

/// Tile codes at or above this value have no terrain type.
const TERRAIN_CODE_LIMIT: u8 = 48;

/// Terrain types of the map tiles plus a "unit shown here" flag per tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTypeMap {
    map: Map,
    terrain_types: Vec<i32>,
    units: Vec<bool>,
}

impl TerrainTypeMap {
    /// Overlay over `map`, with tile codes typed by `generic`.
    #[must_use]
    pub fn new(map: Map, generic: &Generic) -> Self {
        let units = vec![false; map.len()];
        Self {
            map,
            terrain_types: generic.terrain_types.clone(),
            units,
        }
    }

    /// The underlying tiles.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Whether `xy` lies on the map.
    #[must_use]
    pub const fn are_coords_valid(&self, xy: MapCoords) -> bool {
        self.map.are_coords_valid(xy)
    }

    /// Whether unit cell `xy` lies on the map.
    #[must_use]
    pub const fn are_unit_coords_valid(&self, xy: UnitCoords) -> bool {
        self.map.are_coords_valid(xy.to_map_coords())
    }

    /// Terrain type at `xy`, or [`BLOCKED_TERRAIN_TYPE`] if the tile is off the
    /// map or shows a unit.
    #[must_use]
    pub fn terrain_or_unit_type_at(&self, xy: UnitCoords) -> i32 {
        let ix = self.map.coords_to_index(xy.to_map_coords());
        match usize::try_from(ix).ok().and_then(|i| self.units.get(i)) {
            Some(false) => self.type_of(self.map.get_tile_at_index(ix)),
            _ => BLOCKED_TERRAIN_TYPE,
        }
    }

    /// Terrain type at `xy`, ignoring units.
    ///
    /// # Panics
    ///
    /// Panics if the tile code has no terrain type, which includes every
    /// tile off the map.
    #[must_use]
    pub fn terrain_type_at(&self, xy: UnitCoords) -> usize {
        let tile = self.map.get_tile(xy.to_map_coords());
        assert!(
            tile & 63 < TERRAIN_CODE_LIMIT,
            "terrain code {tile} at {xy} has no terrain type"
        );
        self.type_of(tile) as usize
    }

    fn type_of(&self, tile: u8) -> i32 {
        self.terrain_types[usize::from(tile & 63)]
    }

    fn overlay_index(&self, xy: UnitCoords) -> Option<usize> {
        let ix = self.map.coords_to_index(MapCoords::new(xy.x / 2, xy.y));
        usize::try_from(ix).ok().filter(|i| *i < self.units.len())
    }

    /// Mark the tile of `xy` as showing a unit.
    pub fn show_unit_at(&mut self, xy: UnitCoords) {
        if let Some(i) = self.overlay_index(xy) {
            self.units[i] = true;
        }
    }

    /// Clear the unit mark of the tile of `xy`.
    pub fn hide_unit_at(&mut self, xy: UnitCoords) {
        if let Some(i) = self.overlay_index(xy) {
            self.units[i] = false;
        }
    }

    /// Whether the tile of `xy` shows a unit.
    #[must_use]
    pub fn contains_unit(&self, xy: UnitCoords) -> bool {
        self.overlay_index(xy).is_some_and(|i| self.units[i])
    }
}
