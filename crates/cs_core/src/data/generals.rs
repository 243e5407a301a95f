//! Generals commanding the units of each side.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::math::signed_high_nibble;

/// Bytes per general record: four stat bytes and a 12-byte name.
pub const GENERAL_RECORD_LEN: usize = 16;

/// Generals per side.
pub const GENERALS_PER_SIDE: usize = 8;

/// A general and the bonuses applied to units under their command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct General {
    /// Personality toggles, one per bit.
    pub data0: u8,
    /// Attack bonus, 0..16.
    pub attack: i32,
    /// Aggressiveness, signed.
    pub data1_high: i32,
    /// Defence bonus, 0..16.
    pub defence: i32,
    /// Caution, signed.
    pub data2_high: i32,
    /// Movement bonus, 0..16.
    pub movement: i32,
    /// Name, trailing zero bytes trimmed.
    pub name: String,
}

impl General {
    /// Decode one record.
    #[must_use]
    pub fn parse(data: &[u8; GENERAL_RECORD_LEN]) -> Self {
        let mut name = &data[4..];
        while let Some((0, head)) = name.split_last() {
            name = head;
        }
        Self {
            data0: data[0],
            attack: i32::from(data[1] & 15),
            data1_high: signed_high_nibble(data[1]),
            defence: i32::from(data[2] & 15),
            data2_high: signed_high_nibble(data[2]),
            movement: i32::from(data[3] & 15),
            name: name.iter().map(|b| char::from(*b)).collect(),
        }
    }

    /// Personality toggle `n` (0..8).
    #[must_use]
    pub const fn data0_bit(&self, n: u32) -> bool {
        self.data0 & (1 << n) != 0
    }

    /// Encode the record.
    #[must_use]
    pub fn encode(&self) -> [u8; GENERAL_RECORD_LEN] {
        let mut data = [0u8; GENERAL_RECORD_LEN];
        data[0] = self.data0;
        data[1] = (self.attack as u8 & 15) | ((self.data1_high as u8) << 4);
        data[2] = (self.defence as u8 & 15) | ((self.data2_high as u8) << 4);
        data[3] = self.movement as u8 & 15;
        for (dst, c) in data[4..].iter_mut().zip(self.name.chars()) {
            *dst = c as u8;
        }
        data
    }
}

/// All generals, eight per side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Generals(pub [Vec<General>; 2]);

impl Generals {
    /// Decode 16 consecutive general records.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let expected = 2 * GENERALS_PER_SIDE * GENERAL_RECORD_LEN;
        if data.len() < expected {
            return Err(GameError::short("generals", expected, data.len()));
        }
        let mut generals: [Vec<General>; 2] = Default::default();
        for (i, chunk) in data.chunks_exact(GENERAL_RECORD_LEN).take(16).enumerate() {
            let mut record = [0u8; GENERAL_RECORD_LEN];
            record.copy_from_slice(chunk);
            generals[i / GENERALS_PER_SIDE].push(General::parse(&record));
        }
        Ok(Self(generals))
    }

    /// Encode all records.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.0.iter().flatten().flat_map(General::encode).collect()
    }

    /// Generals of `side`.
    #[must_use]
    pub fn side(&self, side: usize) -> &[General] {
        &self.0[side]
    }

    /// General `index` of `side`, or the first one if the index is out of range.
    ///
    /// # Panics
    ///
    /// Panics if the side has no generals at all.
    #[must_use]
    pub fn get(&self, side: usize, index: usize) -> &General {
        let generals = &self.0[side];
        generals.get(index).unwrap_or(&generals[0])
    }
}
