//! Games of the series and the start parameters of a scenario.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GameError, Result};

const SEGMENT_SEPARATOR: u8 = 0x9b;
const SEGMENT_COUNT: usize = 11;
const BINARY_TAIL_LEN: usize = 8;

/// A game of the series. Rules differ slightly between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Game {
    /// Crusade in Europe.
    #[default]
    Crusade,
    /// Decision in the Desert.
    Decision,
    /// Conflict in Vietnam.
    Conflict,
}

impl Game {
    /// Game owning the scenario files with prefix `prefix`.
    pub fn from_file_prefix(prefix: &str) -> Result<Self> {
        match prefix {
            "DDAY" | "RACE" | "ARNHEM" | "BULGE" | "CAMPAIGN" => Ok(Self::Crusade),
            "SIDI" | "CRUSADER" | "GAZALA" | "FIRST" | "HALFA" => Ok(Self::Decision),
            "DINBINFU" | "IADRANG" | "KHESANH" | "FISHOOK" | "EASTER" => Ok(Self::Conflict),
            _ => Err(GameError::UnknownGame(prefix.to_string())),
        }
    }

    /// Game owning a file name such as `DDAY.SCN`.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        let prefix = base
            .split_once('.')
            .map(|(prefix, _)| prefix)
            .ok_or_else(|| GameError::UnknownGame(filename.to_string()))?;
        Self::from_file_prefix(prefix).map_err(|_| GameError::UnknownGame(filename.to_string()))
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Crusade => "Crusade in Europe",
            Self::Decision => "Decision in the Desert",
            Self::Conflict => "Conflict in Vietnam",
        };
        f.write_str(name)
    }
}

/// Start parameters of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioStart {
    /// Display name.
    pub name: String,
    /// Prefix of the scenario's data files.
    pub file_prefix: String,
    /// Start minute.
    pub start_minute: i32,
    /// Start hour.
    pub start_hour: i32,
    /// Start day, 0-based.
    pub start_day: i32,
    /// Start month, 0-based.
    pub start_month: i32,
    /// Start year.
    pub start_year: i32,
    /// Start weather index.
    pub start_weather: i32,
    /// Supply pool per side.
    pub start_supply_levels: [i32; 2],
    /// Viewport bounds.
    pub min_x: i32,
    /// Viewport bounds.
    pub max_x: i32,
    /// Viewport bounds.
    pub min_y: i32,
    /// Viewport bounds.
    pub max_y: i32,
}

impl ScenarioStart {
    /// Decode a scenario file: ten text segments separated by `0x9b`, then an
    /// 8-byte binary tail.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let segments: Vec<&[u8]> = data.splitn(SEGMENT_COUNT, |b| *b == SEGMENT_SEPARATOR).collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(scn_error(format!(
                "Expected {SEGMENT_COUNT} segments, got {}",
                segments.len()
            )));
        }
        let text = |i: usize| -> String { segments[i].iter().map(|b| char::from(*b)).collect() };
        let number = |i: usize, what: &str| -> Result<i32> {
            text(i)
                .parse()
                .map_err(|_| scn_error(format!("Cannot parse scenario {what}: \"{}\"", text(i))))
        };
        let prefix = text(1);
        let file_prefix = prefix
            .strip_prefix("D:")
            .ok_or_else(|| scn_error(format!("Unexpected scenario file prefix: \"{prefix}\"")))?
            .to_string();
        // Segments 7 and 8 hold the month and weather as text.
        let tail = segments[10];
        if tail.len() != BINARY_TAIL_LEN {
            return Err(scn_error(format!(
                "Expected length of binary data segment {BINARY_TAIL_LEN}, got {}",
                tail.len()
            )));
        }
        Ok(Self {
            name: text(0),
            file_prefix,
            start_minute: number(2, "start minute")?,
            start_hour: number(3, "start hour")?,
            start_day: number(4, "start day")?,
            start_month: number(5, "start month")?,
            start_year: number(6, "start year")?,
            start_weather: number(9, "start weather")?,
            start_supply_levels: [
                i32::from(u16::from_le_bytes([tail[0], tail[1]])),
                i32::from(u16::from_le_bytes([tail[2], tail[3]])),
            ],
            min_x: i32::from(tail[4]),
            max_x: i32::from(tail[5]),
            min_y: i32::from(tail[6]),
            max_y: i32::from(tail[7]),
        })
    }

    /// Game this scenario belongs to.
    pub fn game(&self) -> Result<Game> {
        Game::from_file_prefix(&self.file_prefix)
    }
}

fn scn_error(message: String) -> GameError {
    GameError::DataParseError {
        path: "scenario".to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scn(prefix: &str, tail: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        for segment in ["NORMANDY", prefix, "0", "6", "5", "5", "44", "JUNE", "CLEAR", "0"] {
            data.extend_from_slice(segment.as_bytes());
            data.push(0x9b);
        }
        data.extend_from_slice(tail);
        data
    }

    #[test]
    fn test_parse_scenario() {
        let start = ScenarioStart::parse(&scn("D:DDAY", &[0x10, 0x02, 0, 1, 2, 60, 3, 61])).unwrap();
        assert_eq!(start.name, "NORMANDY");
        assert_eq!(start.file_prefix, "DDAY");
        assert_eq!(start.start_hour, 6);
        assert_eq!(start.start_month, 5);
        assert_eq!(start.start_year, 44);
        assert_eq!(start.start_supply_levels, [0x210, 256]);
        assert_eq!((start.min_x, start.max_x, start.min_y, start.max_y), (2, 60, 3, 61));
        assert_eq!(start.game().unwrap(), Game::Crusade);
    }

    #[test]
    fn test_binary_tail_may_contain_separator() {
        let start = ScenarioStart::parse(&scn("D:SIDI", &[0x9b, 0, 0, 0, 0, 0, 0, 0])).unwrap();
        assert_eq!(start.start_supply_levels[0], 0x9b);
        assert_eq!(start.game().unwrap(), Game::Decision);
    }

    #[test]
    fn test_rejects_bad_prefix_and_tail() {
        assert!(ScenarioStart::parse(&scn("DDAY", &[0; 8])).is_err());
        assert!(ScenarioStart::parse(&scn("D:DDAY", &[0; 7])).is_err());
        assert!(ScenarioStart::parse(b"NAME").is_err());
    }

    #[test]
    fn test_game_from_filename() {
        assert_eq!(Game::from_filename("disk/KHESANH.SCN").unwrap(), Game::Conflict);
        assert!(Game::from_filename("UNKNOWN.SCN").is_err());
        assert!(Game::from_file_prefix("NOPE").is_err());
    }
}
