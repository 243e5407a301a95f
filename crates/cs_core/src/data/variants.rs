//! Scenario variants: game length, victory thresholds and starting scores.

use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read, Write};

use crate::error::{GameError, Result};

const NAME_TERMINATOR: u8 = 0x9b;

/// Variant name that ends a variants file.
const END_MARKER: &str = "X";

/// One playable variant of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variant {
    /// Display name.
    pub name: String,
    /// Days until the game ends.
    pub length_in_days: i32,
    /// Critical locations a side must capture to win outright, per side.
    pub critical_locations: [i32; 2],
    /// Weight (/8) of side 1 losses in side 0's score.
    pub data3: i32,
    /// Victory points held at start, per side. Stored divided by ten.
    pub cities_held: [i32; 2],
}

impl Variant {
    /// Read one variant, or `None` at a clean end of input.
    pub fn read<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut name = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match reader.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof && name.is_empty() => {
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
            if byte[0] == NAME_TERMINATOR {
                break;
            }
            name.push(byte[0]);
        }
        let mut data = [0u8; 6];
        reader.read_exact(&mut data)?;
        Ok(Some(Self {
            name: name.iter().map(|b| char::from(*b)).collect(),
            length_in_days: i32::from(data[0]),
            critical_locations: [i32::from(data[1]), i32::from(data[2])],
            data3: i32::from(data[3]),
            cities_held: [i32::from(data[4]) * 10, i32::from(data[5]) * 10],
        }))
    }

    /// Write the variant record.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let name: Vec<u8> = self.name.chars().map(|c| c as u8).collect();
        writer.write_all(&name)?;
        writer.write_all(&[
            NAME_TERMINATOR,
            self.length_in_days as u8,
            self.critical_locations[0] as u8,
            self.critical_locations[1] as u8,
            self.data3 as u8,
            (self.cities_held[0] / 10) as u8,
            (self.cities_held[1] / 10) as u8,
        ])?;
        Ok(())
    }
}

/// Decode a variants file. Reading stops at end of input or at a variant
/// named `X`.
pub fn parse_variants(data: &[u8]) -> Result<Vec<Variant>> {
    let mut reader = data;
    let mut variants = Vec::new();
    while let Some(variant) = Variant::read(&mut reader)? {
        if variant.name == END_MARKER {
            break;
        }
        variants.push(variant);
    }
    Ok(variants)
}

/// Encode variants, followed by the end marker.
pub fn encode_variants(variants: &[Variant]) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    for variant in variants {
        variant.write(&mut data)?;
    }
    Variant {
        name: END_MARKER.into(),
        ..Variant::default()
    }
    .write(&mut data)?;
    Ok(data)
}

/// Look up variant `index`.
pub fn variant_at(variants: &[Variant], index: usize) -> Result<&Variant> {
    variants.get(index).ok_or(GameError::InvalidVariant {
        index,
        count: variants.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants_until_marker() {
        let mut data = b"HISTORICAL".to_vec();
        data.extend_from_slice(&[0x9b, 30, 2, 3, 12, 5, 7]);
        data.extend_from_slice(b"X");
        data.extend_from_slice(&[0x9b, 0, 0, 0, 0, 0, 0]);
        data.extend_from_slice(b"IGNORED");
        let variants = parse_variants(&data).unwrap();
        assert_eq!(variants.len(), 1);
        let v = &variants[0];
        assert_eq!(v.name, "HISTORICAL");
        assert_eq!(v.length_in_days, 30);
        assert_eq!(v.critical_locations, [2, 3]);
        assert_eq!(v.data3, 12);
        assert_eq!(v.cities_held, [50, 70]);
    }

    #[test]
    fn test_parse_variants_until_eof() {
        let mut data = b"A".to_vec();
        data.extend_from_slice(&[0x9b, 1, 1, 1, 8, 0, 0]);
        data.extend_from_slice(b"B");
        data.extend_from_slice(&[0x9b, 2, 1, 1, 8, 1, 1]);
        let variants = parse_variants(&data).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1].cities_held, [10, 10]);
    }

    #[test]
    fn test_truncated_variant_is_an_error() {
        let mut data = b"A".to_vec();
        data.extend_from_slice(&[0x9b, 1, 1]);
        assert!(parse_variants(&data).is_err());
    }

    #[test]
    fn test_encode_variants_round_trip() {
        let variants = vec![Variant {
            name: "SHORT".into(),
            length_in_days: 4,
            critical_locations: [1, 2],
            data3: 8,
            cities_held: [20, 30],
        }];
        let data = encode_variants(&variants).unwrap();
        assert_eq!(parse_variants(&data).unwrap(), variants);
    }

    #[test]
    fn test_variant_at() {
        let variants = vec![Variant::default()];
        assert!(variant_at(&variants, 0).is_ok());
        assert!(matches!(
            variant_at(&variants, 3),
            Err(GameError::InvalidVariant { index: 3, count: 1 })
        ));
    }
}
