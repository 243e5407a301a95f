//! Daily snapshots of unit positions, replayed by the flashback view.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::coords::UnitCoords;
use crate::error::{GameError, Result};
use crate::units::Units;

/// Where a unit stood at the start of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlashbackUnit {
    /// Position.
    pub xy: UnitCoords,
    /// Colour palette.
    pub color_palette: i32,
    /// Unit type.
    pub unit_type: usize,
}

/// One snapshot per elapsed day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlashbackHistory(pub Vec<Vec<FlashbackUnit>>);

impl FlashbackHistory {
    /// Append a snapshot of every unit in the game.
    pub fn record(&mut self, units: &Units) {
        let day = units
            .iter()
            .filter(|unit| unit.in_game)
            .map(|unit| FlashbackUnit {
                xy: unit.xy,
                color_palette: unit.color_palette,
                unit_type: unit.unit_type,
            })
            .collect();
        self.0.push(day);
    }

    /// Number of recorded days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no day was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Snapshot of day `day`, counting from 0.
    #[must_use]
    pub fn day(&self, day: usize) -> Option<&[FlashbackUnit]> {
        self.0.get(day).map(Vec::as_slice)
    }

    /// Write the history: a little-endian u16 day count, then per day a unit
    /// count byte and four bytes per unit.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let days = u16::try_from(self.0.len())
            .map_err(|_| GameError::InvalidState(format!("Too many flashback days: {}", self.0.len())))?;
        writer.write_all(&days.to_le_bytes())?;
        for day in &self.0 {
            let count = u8::try_from(day.len())
                .map_err(|_| GameError::InvalidState(format!("Too many flashback units: {}", day.len())))?;
            writer.write_all(&[count])?;
            for unit in day {
                writer.write_all(&[
                    unit.xy.x as u8,
                    unit.xy.y as u8,
                    unit.color_palette as u8,
                    unit.unit_type as u8,
                ])?;
            }
        }
        Ok(())
    }

    /// Read a history written by [`FlashbackHistory::write`].
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut days = [0u8; 2];
        reader.read_exact(&mut days)?;
        let days = u16::from_le_bytes(days);
        let mut history = Vec::with_capacity(usize::from(days));
        for _ in 0..days {
            let mut count = [0u8; 1];
            reader.read_exact(&mut count)?;
            let mut day = Vec::with_capacity(usize::from(count[0]));
            for _ in 0..count[0] {
                let mut data = [0u8; 4];
                reader.read_exact(&mut data)?;
                day.push(FlashbackUnit {
                    xy: UnitCoords::new(i32::from(data[0]), i32::from(data[1])),
                    color_palette: i32::from(data[2]),
                    unit_type: usize::from(data[3]),
                });
            }
            history.push(day);
        }
        Ok(Self(history))
    }
}
