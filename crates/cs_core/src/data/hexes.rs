//! Neighbourhood score tables.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Bytes read from a hexes image. The trailing 64 bytes are always zero.
pub const HEXES_LEN: usize = 256;

/// A `[6][8]` table of signed scores indexed by neighbour kind and count.
pub type NeighbourTable = [[i32; 8]; 6];

/// Four score tables weighting how a hex's six neighbours are occupied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hexes {
    /// Defensive value of a position.
    pub arr0: NeighbourTable,
    /// Exposure of a position to attack.
    pub arr48: NeighbourTable,
    /// Retreat value of a position.
    pub arr96: NeighbourTable,
    /// Attack and defence support.
    pub arr144: NeighbourTable,
}

impl Hexes {
    /// Decode the four 48-byte tables.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 192 {
            return Err(GameError::short("hexes", 192, data.len()));
        }
        let table = |start: usize| {
            let mut t: NeighbourTable = [[0; 8]; 6];
            for (i, v) in data[start..start + 48].iter().enumerate() {
                t[i / 8][i % 8] = i32::from(*v as i8);
            }
            t
        };
        Ok(Self {
            arr0: table(0),
            arr48: table(48),
            arr96: table(96),
            arr144: table(144),
        })
    }

    /// Encode the tables, padded to [`HEXES_LEN`].
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEXES_LEN);
        for table in [&self.arr0, &self.arr48, &self.arr96, &self.arr144] {
            data.extend(table.iter().flatten().map(|v| *v as u8));
        }
        data.resize(HEXES_LEN, 0);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signed_tables() {
        let mut data = vec![0u8; HEXES_LEN];
        data[0] = 3;
        data[48 + 9] = 0xfe;
        data[191] = 0x80;
        let hexes = Hexes::parse(&data).unwrap();
        assert_eq!(hexes.arr0[0][0], 3);
        assert_eq!(hexes.arr48[1][1], -2);
        assert_eq!(hexes.arr144[5][7], -128);
        assert_eq!(hexes.encode(), data);
    }
}
