//! Terrain tile storage of the staggered hex map.
//!
//! Odd rows hold one tile fewer than even rows, so rows are packed with
//! index `y * width + x - y / 2`.

use serde::{Deserialize, Serialize};

use crate::coords::MapCoords;
use crate::error::{GameError, Result};

/// Width of every game map, in tiles.
pub const MAP_WIDTH: i32 = 64;

/// Height of every game map, in tiles.
pub const MAP_HEIGHT: i32 = 64;

/// Returned for tiles outside the map.
pub const OFF_MAP_TILE: u8 = 255;

/// Terrain tiles of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    /// Tiles per even row.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
    terrain: Vec<u8>,
}

impl Map {
    /// Number of tiles on a `width` x `height` staggered map.
    #[must_use]
    pub const fn tile_count(width: i32, height: i32) -> usize {
        (width * height - height / 2) as usize
    }

    /// Map filled with a single tile code.
    #[must_use]
    pub fn filled(width: i32, height: i32, tile: u8) -> Self {
        Self {
            width,
            height,
            terrain: vec![tile; Self::tile_count(width, height)],
        }
    }

    /// Decode packed rows.
    pub fn parse(data: &[u8], width: i32, height: i32) -> Result<Self> {
        let expected = Self::tile_count(width, height);
        if data.len() < expected {
            return Err(GameError::short("map", expected, data.len()));
        }
        Ok(Self {
            width,
            height,
            terrain: data[..expected].to_vec(),
        })
    }

    /// Packed rows.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.terrain.clone()
    }

    /// Whether `xy` is a tile of the map.
    #[must_use]
    pub const fn are_coords_valid(&self, xy: MapCoords) -> bool {
        xy.y >= 0 && xy.y < self.height && xy.x >= 0 && xy.x < self.width - xy.y % 2
    }

    /// Packed index of `xy`. May fall outside the map for invalid coordinates.
    #[must_use]
    pub const fn coords_to_index(&self, xy: MapCoords) -> i32 {
        xy.y * self.width + xy.x - xy.y / 2
    }

    /// Number of packed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terrain.len()
    }

    /// Whether the map holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terrain.is_empty()
    }

    /// Tile at `xy`, or [`OFF_MAP_TILE`] outside the packed range.
    #[must_use]
    pub fn get_tile(&self, xy: MapCoords) -> u8 {
        self.get_tile_at_index(self.coords_to_index(xy))
    }

    /// Set the tile at `xy`. Writes outside the packed range are ignored.
    pub fn set_tile(&mut self, xy: MapCoords, tile: u8) {
        self.set_tile_at_index(self.coords_to_index(xy), tile);
    }

    /// Tile at packed index `ix`, or [`OFF_MAP_TILE`] outside the range.
    #[must_use]
    pub fn get_tile_at_index(&self, ix: i32) -> u8 {
        usize::try_from(ix)
            .ok()
            .and_then(|ix| self.terrain.get(ix).copied())
            .unwrap_or(OFF_MAP_TILE)
    }

    /// Set the tile at packed index `ix`. Out-of-range writes are ignored.
    pub fn set_tile_at_index(&mut self, ix: i32, tile: u8) {
        if let Some(t) = usize::try_from(ix).ok().and_then(|ix| self.terrain.get_mut(ix)) {
            *t = tile;
        }
    }
}
