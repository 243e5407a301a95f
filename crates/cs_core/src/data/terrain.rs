//! Cities and the strategic terrain coefficients of a scenario.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::coords::UnitCoords;
use crate::error::{GameError, Result};

/// Bytes per city record.
pub const CITY_RECORD_LEN: usize = 16;

/// City records in a terrain image.
pub const CITY_RECORD_COUNT: usize = 48;

/// A city or other victory location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct City {
    /// Side holding the city.
    pub owner: usize,
    /// Points gained by capturing it. Zero means the city is not an objective
    /// in the selected variant.
    pub victory_points: i32,
    /// Location.
    pub xy: UnitCoords,
    /// Bit `n` set means the city is absent from variant `n`.
    pub variant_bitmap: u8,
    /// Display name.
    pub name: String,
}

impl City {
    /// Decode a record. Records without the presence bit yield `None`.
    #[must_use]
    pub fn parse(data: &[u8; CITY_RECORD_LEN]) -> Option<Self> {
        if data[0] & 128 == 0 {
            return None;
        }
        let mut name = &data[4..];
        while let Some((b'\0' | b' ', head)) = name.split_last() {
            name = head;
        }
        Some(Self {
            owner: usize::from((data[0] & 64) >> 6),
            victory_points: i32::from(data[0] & 63),
            xy: UnitCoords::new(i32::from(data[1]), i32::from(data[2])),
            variant_bitmap: data[3],
            name: name.iter().map(|b| char::from(*b)).collect(),
        })
    }

    /// Encode the record.
    #[must_use]
    pub fn encode(&self) -> [u8; CITY_RECORD_LEN] {
        let mut data = [0u8; CITY_RECORD_LEN];
        data[0] = 128 | ((self.owner as u8) << 6) | (self.victory_points as u8 & 63);
        data[1] = self.xy.x as u8;
        data[2] = self.xy.y as u8;
        data[3] = self.variant_bitmap;
        for (dst, c) in data[4..].iter_mut().zip(self.name.chars()) {
            *dst = c as u8;
        }
        data
    }
}

/// Cities of a scenario plus a 16x16 grid of strategic coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Terrain {
    /// Cities in file order.
    pub cities: Vec<City>,
    /// Coefficient of each 4x4 tile square, `[x][y]`.
    pub coeffs: [[i32; 16]; 16],
}

impl Terrain {
    /// Decode a terrain image: 48 city records, then up to 256 coefficient
    /// bytes. Missing coefficients are zero.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let cities_len = CITY_RECORD_COUNT * CITY_RECORD_LEN;
        if data.len() < cities_len {
            return Err(GameError::short("terrain", cities_len, data.len()));
        }
        let cities = data[..cities_len]
            .chunks_exact(CITY_RECORD_LEN)
            .filter_map(|chunk| {
                let mut record = [0u8; CITY_RECORD_LEN];
                record.copy_from_slice(chunk);
                City::parse(&record)
            })
            .filter(|city| !city.name.is_empty())
            .collect();
        let mut coeffs = [[0; 16]; 16];
        for (i, v) in data[cities_len..].iter().take(256).enumerate() {
            coeffs[i % 16][i / 16] = i32::from(*v);
        }
        Ok(Self { cities, coeffs })
    }

    /// Encode into a terrain image.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; CITY_RECORD_COUNT * CITY_RECORD_LEN];
        for (chunk, city) in data.chunks_exact_mut(CITY_RECORD_LEN).zip(&self.cities) {
            chunk.copy_from_slice(&city.encode());
        }
        for i in 0..256 {
            data.push(self.coeffs[i % 16][i / 16] as u8);
        }
        data
    }

    /// The objective city at `xy`, if any.
    #[must_use]
    pub fn find_city_at(&self, xy: UnitCoords) -> Option<&City> {
        self.cities
            .iter()
            .find(|city| city.victory_points > 0 && city.xy == xy)
    }

    /// Mutable access to the objective city at `xy`.
    pub fn find_city_at_mut(&mut self, xy: UnitCoords) -> Option<&mut City> {
        self.cities
            .iter_mut()
            .find(|city| city.victory_points > 0 && city.xy == xy)
    }

    /// Whether an objective city stands at `xy`.
    #[must_use]
    pub fn is_city_at(&self, xy: UnitCoords) -> bool {
        self.find_city_at(xy).is_some()
    }

    /// Write the owner and victory points of every city.
    pub fn write_owner_and_victory_points<W: Write>(&self, writer: &mut W) -> Result<()> {
        let count = u8::try_from(self.cities.len()).map_err(|_| {
            GameError::InvalidState(format!("too many cities to encode {}", self.cities.len()))
        })?;
        let mut data = Vec::with_capacity(self.cities.len() + 1);
        data.push(count);
        data.extend(
            self.cities
                .iter()
                .map(|city| ((city.owner as u8) << 6).wrapping_add(city.victory_points as u8)),
        );
        writer.write_all(&data)?;
        Ok(())
    }

    /// Read owner and victory points written by
    /// [`Terrain::write_owner_and_victory_points`].
    pub fn read_owner_and_victory_points<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut count = [0u8; 1];
        reader.read_exact(&mut count)?;
        let found = usize::from(count[0]);
        if found != self.cities.len() {
            return Err(GameError::CityCountMismatch {
                found,
                expected: self.cities.len(),
            });
        }
        let mut data = vec![0u8; found];
        reader.read_exact(&mut data)?;
        for (city, b) in self.cities.iter_mut().zip(data) {
            city.owner = usize::from((b & 64) >> 6);
            city.victory_points = i32::from(b & 63);
        }
        Ok(())
    }

    /// Total victory points held by `side`.
    #[must_use]
    pub fn victory_points_of(&self, side: usize) -> i32 {
        self.cities
            .iter()
            .filter(|city| city.owner == side)
            .map(|city| city.victory_points)
            .sum()
    }
}
