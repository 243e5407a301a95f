//! Game options chosen before a game, and the commander flags derived from
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};

use crate::error::Result;

/// Who commands a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Commander {
    /// A human player.
    #[default]
    Player = 0,
    /// The computer.
    Computer = 1,
}

impl Commander {
    /// The other commander kind.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Player => Self::Computer,
            Self::Computer => Self::Player,
        }
    }

    const fn from_byte(b: u8) -> Self {
        if b == 0 {
            Self::Player
        } else {
            Self::Computer
        }
    }
}

impl fmt::Display for Commander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Player => "PLAYER",
            Self::Computer => "COMPUTER",
        })
    }
}

/// How much a player knows about enemy units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intelligence {
    /// Every enemy unit is known.
    Full = 0,
    /// Only spotted enemy units are known.
    #[default]
    Limited = 1,
}

impl Intelligence {
    /// The other intelligence level.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Full => Self::Limited,
            Self::Limited => Self::Full,
        }
    }
}

impl fmt::Display for Intelligence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "FULL",
            Self::Limited => "LIMITED",
        })
    }
}

/// How units are drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitDisplay {
    /// NATO symbols.
    #[default]
    Symbols = 0,
    /// Pictograms.
    Icons = 1,
}

/// Delay between displayed game ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Speed {
    /// One second.
    Fast = 1,
    /// Two seconds.
    #[default]
    Medium = 2,
    /// Three seconds.
    Slow = 3,
}

impl Speed {
    /// Display delay in 60Hz ticks.
    #[must_use]
    pub const fn delay_ticks(self) -> i32 {
        60 * self as i32
    }

    /// One step faster, saturating.
    #[must_use]
    pub const fn faster(self) -> Self {
        match self {
            Self::Fast | Self::Medium => Self::Fast,
            Self::Slow => Self::Medium,
        }
    }

    /// One step slower, saturating.
    #[must_use]
    pub const fn slower(self) -> Self {
        match self {
            Self::Fast => Self::Medium,
            Self::Medium | Self::Slow => Self::Slow,
        }
    }

    const fn from_byte(b: u8) -> Self {
        match b {
            1 => Self::Fast,
            3 => Self::Slow,
            _ => Self::Medium,
        }
    }
}

/// Pre-game options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Commander of side 0.
    pub allied_commander: Commander,
    /// Commander of side 1.
    pub german_commander: Commander,
    /// Intelligence level.
    pub intelligence: Intelligence,
    /// Unit display style.
    pub unit_display: UnitDisplay,
    /// Balance, 0..=4. 2 is neutral, higher favours side 0.
    pub game_balance: i32,
    /// Display speed.
    pub speed: Speed,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allied_commander: Commander::Player,
            german_commander: Commander::Computer,
            intelligence: Intelligence::Limited,
            unit_display: UnitDisplay::Symbols,
            game_balance: 2,
            speed: Speed::Medium,
        }
    }
}

impl Options {
    /// Options for a game with no human player, used by headless runs.
    #[must_use]
    pub fn computer_vs_computer() -> Self {
        Self {
            allied_commander: Commander::Computer,
            german_commander: Commander::Computer,
            ..Self::default()
        }
    }

    /// Write the options as six bytes.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[
            self.allied_commander as u8,
            self.german_commander as u8,
            self.intelligence as u8,
            self.unit_display as u8,
            self.game_balance as u8,
            self.speed as u8,
        ])?;
        Ok(())
    }

    /// Read options written by [`Options::write`].
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = [0u8; 6];
        reader.read_exact(&mut data)?;
        Ok(Self {
            allied_commander: Commander::from_byte(data[0]),
            german_commander: Commander::from_byte(data[1]),
            intelligence: if data[2] == 0 {
                Intelligence::Full
            } else {
                Intelligence::Limited
            },
            unit_display: if data[3] == 0 {
                UnitDisplay::Symbols
            } else {
                UnitDisplay::Icons
            },
            game_balance: i32::from(data[4]),
            speed: Speed::from_byte(data[5]),
        })
    }

    /// Whether `side` is commanded by a human.
    #[must_use]
    pub fn is_player_controlled(&self, side: usize) -> bool {
        let commander = if side == 0 {
            self.allied_commander
        } else {
            self.german_commander
        };
        commander == Commander::Player
    }
}

/// Per-side control and visibility flags.
///
/// Serialized as one byte: bits 0/1 mark sides 0/1 as computer controlled,
/// bits 2/3 hide the units of sides 0/1 from the player, bits 4/5 give sides
/// 0/1 limited intelligence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommanderFlags {
    /// Side is commanded by a human.
    pub player_controlled: [bool; 2],
    /// The player may see the side's units.
    pub player_can_see_units: [bool; 2],
    /// The side knows the position of unspotted enemy units.
    pub player_has_intelligence: [bool; 2],
}

impl CommanderFlags {
    /// Flags derived from the options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let allied = options.allied_commander as u8;
        let german = options.german_commander as u8;
        let mut flags = allied + 2 * german;
        if options.intelligence == Intelligence::Limited {
            flags += 56 - 4 * (allied * german + allied);
        }
        Self::from_byte(flags)
    }

    /// Decode the flags byte.
    #[must_use]
    pub const fn from_byte(flags: u8) -> Self {
        Self {
            player_controlled: [flags & 1 == 0, flags & 2 == 0],
            player_can_see_units: [flags & 4 == 0, flags & 8 == 0],
            player_has_intelligence: [flags & 16 == 0, flags & 32 == 0],
        }
    }

    /// Encode the flags byte.
    #[must_use]
    pub const fn serialize(&self) -> u8 {
        let mut flags = 0;
        if !self.player_controlled[0] {
            flags |= 1;
        }
        if !self.player_controlled[1] {
            flags |= 2;
        }
        if !self.player_can_see_units[0] {
            flags |= 4;
        }
        if !self.player_can_see_units[1] {
            flags |= 8;
        }
        if !self.player_has_intelligence[0] {
            flags |= 16;
        }
        if !self.player_has_intelligence[1] {
            flags |= 32;
        }
        flags
    }

    /// Overwrite the flags from a byte.
    pub fn deserialize(&mut self, flags: u8) {
        *self = Self::from_byte(flags);
    }

    /// Swap which side's units the player can see.
    pub fn switch_sides(&mut self) {
        self.player_can_see_units.swap(0, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.game_balance, 2);
        assert!(options.is_player_controlled(0));
        assert!(!options.is_player_controlled(1));
        let mut buf = Vec::new();
        options.write(&mut buf).unwrap();
        assert_eq!(buf, vec![0, 1, 1, 0, 2, 2]);
        assert_eq!(Options::read(&mut buf.as_slice()).unwrap(), options);
    }

    #[test]
    fn test_commander_flags_from_options() {
        let options = Options::default();
        let flags = CommanderFlags::new(&options);
        assert_eq!(flags.serialize(), 58);
        assert_eq!(flags.player_controlled, [true, false]);
        assert_eq!(flags.player_can_see_units, [true, false]);
        assert_eq!(flags.player_has_intelligence, [false, false]);

        let flags = CommanderFlags::new(&Options {
            intelligence: Intelligence::Full,
            ..options
        });
        assert_eq!(flags.serialize(), 2);
        assert_eq!(flags.player_can_see_units, [true, true]);

        let flags = CommanderFlags::new(&Options::computer_vs_computer());
        assert_eq!(flags.serialize(), 51);
        assert_eq!(flags.player_controlled, [false, false]);
        assert_eq!(flags.player_can_see_units, [true, true]);
    }

    #[test]
    fn test_switch_sides_swaps_visibility() {
        let mut flags = CommanderFlags::from_byte(58);
        flags.switch_sides();
        assert_eq!(flags.serialize(), 54);
        flags.switch_sides();
        assert_eq!(flags.serialize(), 58);
    }

    #[test]
    fn test_speed_steps() {
        assert_eq!(Speed::Slow.faster(), Speed::Medium);
        assert_eq!(Speed::Fast.faster(), Speed::Fast);
        assert_eq!(Speed::Fast.slower(), Speed::Medium);
        assert_eq!(Speed::Medium.delay_ticks(), 120);
        assert_eq!(Intelligence::Full.other(), Intelligence::Limited);
        assert_eq!(Commander::Player.other(), Commander::Computer);
    }
}
