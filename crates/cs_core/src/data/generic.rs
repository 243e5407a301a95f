//! Terrain tile code to terrain type mapping, shared by every scenario.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Bytes read from a generic image.
pub const GENERIC_LEN: usize = 250;

/// Tables shared by all scenarios of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generic {
    /// Overview map terrain colours.
    pub data60: [i32; 4],
    /// Terrain type (0..8) of each of the 64 tile codes.
    pub terrain_types: Vec<i32>,
}

impl Default for Generic {
    fn default() -> Self {
        Self {
            data60: [0; 4],
            terrain_types: vec![0; 64],
        }
    }
}

impl Generic {
    /// Decode a generic image.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < GENERIC_LEN {
            return Err(GameError::short("generic", GENERIC_LEN, data.len()));
        }
        let mut data60 = [0; 4];
        for (dst, v) in data60.iter_mut().zip(&data[60..64]) {
            *dst = i32::from(*v);
        }
        Ok(Self {
            data60,
            terrain_types: data[64..128].iter().map(|v| i32::from(*v)).collect(),
        })
    }

    /// Encode into a generic image. Bytes outside the decoded ranges are zero.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; GENERIC_LEN];
        for (i, v) in self.data60.iter().enumerate() {
            data[60 + i] = *v as u8;
        }
        for (i, v) in self.terrain_types.iter().take(64).enumerate() {
            data[64 + i] = *v as u8;
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terrain_types() {
        let mut data = vec![0u8; GENERIC_LEN];
        data[64] = 1;
        data[127] = 7;
        let generic = Generic::parse(&data).unwrap();
        assert_eq!(generic.terrain_types.len(), 64);
        assert_eq!(generic.terrain_types[0], 1);
        assert_eq!(generic.terrain_types[63], 7);
        assert_eq!(generic.encode(), data);
    }

    #[test]
    fn test_short_generic() {
        assert!(Generic::parse(&[0u8; 128]).is_err());
    }
}
