//! Strategic influence grids the AI plans on.
//!
//! The unit grid is folded into a 16x16 "small" grid (8 unit columns by 4
//! rows per cell) and a 4x4 "tiny" grid of 4x4 small cells. For each side
//! the maps record troop counts, defensive strength and the importance of
//! what is there: supply units, air wings, cities. They are rebuilt from
//! scratch whenever the AI starts planning for the other side.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::hex::small_map_offsets;
use crate::math::{abs, clamp, in_range, max, sign};
use crate::world::World;

/// Cells per side of the small grid.
pub const SMALL_MAP_SIZE: usize = 16;

/// Cells per side of the tiny grid.
pub const TINY_MAP_SIZE: usize = 4;

/// A small grid per side, indexed `[side][x][y]`.
pub type SmallMap = [[[i32; SMALL_MAP_SIZE]; SMALL_MAP_SIZE]; 2];

/// A tiny grid per side, indexed `[side][x][y]`.
pub type TinyMap = [[[i32; TINY_MAP_SIZE]; TINY_MAP_SIZE]; 2];

/// The AI's view of both sides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InfluenceMaps {
    /// Troop counts.
    pub troops: SmallMap,
    /// Importance of the objects in each cell, weighted by terrain.
    pub importance: SmallMap,
    /// Defensive strength, 0..=255.
    pub strength: SmallMap,
    /// `troops` summed over tiny cells.
    pub tiny_troops: TinyMap,
    /// `importance` summed over tiny cells.
    pub tiny_importance: TinyMap,
}

/// Small grid cell of unit coordinates, if on the grid.
pub(crate) fn small_cell(x: i32, y: i32) -> Option<(usize, usize)> {
    let size = SMALL_MAP_SIZE as i32;
    (in_range(x, 0, size) && in_range(y, 0, size)).then(|| (x as usize, y as usize))
}

impl InfluenceMaps {
    /// Zero every grid.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Recompute the grids as seen by `side`.
    ///
    /// Without intelligence, enemy units the side has not spotted are left
    /// out.
    pub fn rebuild(&mut self, world: &World, side: usize) {
        self.reset();
        let data = &world.data;
        for unit in world.units.iter() {
            if !unit.in_game || data.unit_mask_bit(unit.unit_type, 4) {
                continue;
            }
            let (sx, sy) = (unit.xy.x / 8, unit.xy.y / 4);
            let Some((cx, cy)) = small_cell(sx, sy) else {
                continue;
            };
            if unit.side != side
                && !world.commander_flags.player_has_intelligence[side]
                && !unit.seen
            {
                continue;
            }
            let mut count = unit.men_count + unit.tank_count;
            let formation = unit.formation as usize;
            let terrain_type = world.terrain_types.terrain_type_at(unit.xy);
            let mut strength = count * max(data.formation_men_defence[formation], 8) / 8;
            strength = strength * data.terrain_men_defence[terrain_type] / 8;
            if data.is_special_unit(unit.unit_type) {
                strength = 4;
                count = 4;
            }
            self.troops[unit.side][cx][cy] += (count + 4) / 8;
            self.strength[unit.side][cx][cy] =
                clamp(self.strength[unit.side][cx][cy] + (strength + 4) / 8, 0, 255);
            if unit.supply_level - 1 <= data.avg_daily_supply_use {
                continue;
            }
            let influence = data.unit_scores[unit.unit_type] / 4;
            if influence <= 0 {
                continue;
            }
            for radius in -1..=influence {
                let last = (abs(radius) - sign(abs(radius))) * 4;
                for i in 0..=last as usize {
                    let (dx, dy) = small_map_offsets(i);
                    if let Some((x, y)) = small_cell(sx + dx, sy + dy) {
                        self.importance[unit.side][x][y] += 2;
                        if unit.under_attack {
                            self.importance[unit.side][x][y] += 2;
                        }
                    }
                }
            }
        }
        for city in &world.terrain.cities {
            if city.victory_points == 0 {
                continue;
            }
            let (sx, sy) = (city.xy.x / 8, city.xy.y / 4);
            let influence = city.victory_points / 8;
            if influence <= 0 {
                continue;
            }
            if let Some((cx, cy)) = small_cell(sx, sy) {
                self.strength[city.owner][cx][cy] += 1;
            }
            for ring in 1..=influence {
                for j in 0..=((ring - 1) * 4) as usize {
                    let (dx, dy) = small_map_offsets(j);
                    if let Some((x, y)) = small_cell(sx + dx, sy + dy) {
                        self.importance[city.owner][x][y] += 2;
                    }
                }
            }
        }
        for side in 0..2 {
            for x in 0..SMALL_MAP_SIZE {
                for y in 0..SMALL_MAP_SIZE {
                    self.importance[side][x][y] =
                        self.importance[side][x][y] * world.terrain.coeffs[x][y] / 8;
                    self.tiny_troops[side][x / 4][y / 4] += self.troops[side][x][y];
                    self.tiny_importance[side][x / 4][y / 4] += self.importance[side][x][y];
                }
            }
        }
        trace!(side, "influence maps rebuilt");
    }
}
