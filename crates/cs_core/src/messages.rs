//! Events emitted by the simulation, one per channel exchange.

use serde::{Deserialize, Serialize};
use std::cmp::min;

use crate::coords::{MapCoords, UnitCoords};
use crate::data::terrain::City;
use crate::units::Unit;

/// Icon shown next to a unit report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    /// Two units fighting.
    FightingUnit,
    /// A unit on its knees.
    UnitOnKnees,
    /// A unit waving a white flag.
    SurrenderingUnit,
    /// An exclamation mark.
    ExclamationMark,
    /// A smiling face.
    SmilingFace,
    /// A question mark.
    QuestionMark,
    /// A supply truck.
    SupplyTruck,
    /// A unit on the move.
    MovingUnit,
}

/// Report from a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitMessage {
    /// The unit attacked `enemy`. `outcome` grows as the attacker's losses
    /// shrink.
    WeAreAttacking {
        /// Reporting unit.
        unit: Unit,
        /// Attacked unit.
        enemy: Unit,
        /// Attack outcome, 0..=128.
        outcome: i32,
    },
    /// An attack was stopped by heavy losses.
    WeHaveMetStrongResistance {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit left the game.
    WeMustSurrender {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit made contact with the enemy.
    WeAreInContactWithEnemy {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit took a city.
    WeHaveCaptured {
        /// Reporting unit.
        unit: Unit,
        /// Captured city.
        city: City,
    },
    /// The unit reached its objective.
    WeHaveReachedOurObjective {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit ran out of supplies.
    WeHaveExhaustedSupplies {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit was pushed back.
    WeAreRetreating {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit was destroyed and will reform at its supply unit.
    WeHaveBeenOverrun {
        /// Reporting unit.
        unit: Unit,
    },
    /// The unit is being attacked.
    WeAreUnderFire {
        /// Reporting unit.
        unit: Unit,
    },
}

impl UnitMessage {
    /// The reporting unit, as it was when the report was made.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        match self {
            Self::WeAreAttacking { unit, .. }
            | Self::WeHaveMetStrongResistance { unit }
            | Self::WeMustSurrender { unit }
            | Self::WeAreInContactWithEnemy { unit }
            | Self::WeHaveCaptured { unit, .. }
            | Self::WeHaveReachedOurObjective { unit }
            | Self::WeHaveExhaustedSupplies { unit }
            | Self::WeAreRetreating { unit }
            | Self::WeHaveBeenOverrun { unit }
            | Self::WeAreUnderFire { unit } => unit,
        }
    }

    /// Icon of the report.
    #[must_use]
    pub const fn icon(&self) -> Icon {
        match self {
            Self::WeAreAttacking { .. } => Icon::FightingUnit,
            Self::WeHaveMetStrongResistance { .. } | Self::WeHaveBeenOverrun { .. } => {
                Icon::UnitOnKnees
            }
            Self::WeMustSurrender { .. } => Icon::SurrenderingUnit,
            Self::WeAreInContactWithEnemy { .. } | Self::WeAreUnderFire { .. } => {
                Icon::ExclamationMark
            }
            Self::WeHaveCaptured { .. } => Icon::SmilingFace,
            Self::WeHaveReachedOurObjective { .. } => Icon::QuestionMark,
            Self::WeHaveExhaustedSupplies { .. } => Icon::SupplyTruck,
            Self::WeAreRetreating { .. } => Icon::MovingUnit,
        }
    }

    /// Report text. `formation_names` names the enemy formation in attack
    /// reports.
    #[must_use]
    pub fn text(&self, formation_names: &[String]) -> String {
        match self {
            Self::WeAreAttacking { enemy, outcome, .. } => {
                const LOSSES: [&str; 4] = ["HEAVY", "MODERATE", "LIGHT", "VERY LIGHT"];
                let formation = usize::try_from(enemy.formation)
                    .ok()
                    .and_then(|f| formation_names.get(f))
                    .map_or("", String::as_str);
                let losses = LOSSES[min(usize::try_from(*outcome / 11).unwrap_or(0), 3)];
                format!(
                    "WE ARE ATTACKING.\nENEMY IS IN {formation} FORMATION.\nOUR LOSSES ARE {losses}."
                )
            }
            Self::WeHaveMetStrongResistance { .. } => {
                "WE HAVE MET STRONG RESISTANCE\nHEAVY LOSSES, ATTACK MUST BE HALTED.".to_string()
            }
            Self::WeMustSurrender { .. } => "WE MUST SURRENDER".to_string(),
            Self::WeAreInContactWithEnemy { .. } => "WE ARE IN CONTACT WITH ENEMY FORCES.".to_string(),
            Self::WeHaveCaptured { city, .. } => format!("WE HAVE CAPTURED {}", city.name),
            Self::WeHaveReachedOurObjective { .. } => {
                "WE HAVE REACHED OUR OBJECTIVE.\nAWAITING FURTHER ORDERS.".to_string()
            }
            Self::WeHaveExhaustedSupplies { .. } => "WE HAVE EXHAUSTED OUR SUPPLIES.".to_string(),
            Self::WeAreRetreating { .. } => "WE ARE RETREATING.".to_string(),
            Self::WeHaveBeenOverrun { .. } => "WE HAVE BEEN OVERRUN.".to_string(),
            Self::WeAreUnderFire { .. } => "WE ARE UNDER FIRE!".to_string(),
        }
    }

    /// The report the attacked unit gives about the same attack.
    #[must_use]
    pub fn enemy_message(&self) -> Option<Self> {
        match self {
            Self::WeAreAttacking { enemy, .. } => Some(Self::WeAreUnderFire { unit: *enemy }),
            _ => None,
        }
    }
}

/// One event of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// A unit update that produced no report.
    Empty,
    /// A unit report.
    Unit(UnitMessage),
    /// The first hourly pass is done.
    Initialized,
    /// Off-map units of the marked sides entered the game.
    Reinforcements {
        /// Sides that received reinforcements.
        sides: [bool; 2],
    },
    /// The game is over.
    GameOver,
    /// Combat at `xy`.
    UnitAttack {
        /// Attacked cell.
        xy: UnitCoords,
        /// Attack outcome.
        outcome: i32,
    },
    /// A visible unit moved one step.
    UnitMove {
        /// The unit before the move.
        unit: Unit,
        /// Origin tile.
        from: MapCoords,
        /// Destination tile.
        to: MapCoords,
    },
    /// A supply truck moved one step.
    SupplyTruckMove {
        /// Origin tile.
        from: MapCoords,
        /// Destination tile.
        to: MapCoords,
    },
    /// Weather for the new day.
    WeatherForecast {
        /// Weather index.
        weather: i32,
    },
    /// Supply distribution begins.
    SupplyDistributionStart,
    /// Supply distribution ended.
    SupplyDistributionEnd,
    /// Start-of-day summary.
    DailyUpdate {
        /// Days left, counting today.
        days_remaining: i32,
        /// Supply pool per side.
        supply_levels: [i32; 2],
    },
    /// The clock advanced.
    TimeChanged,
}

impl Message {
    /// Short name of the message kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Unit(UnitMessage::WeAreAttacking { .. }) => "WeAreAttacking",
            Self::Unit(UnitMessage::WeHaveMetStrongResistance { .. }) => "WeHaveMetStrongResistance",
            Self::Unit(UnitMessage::WeMustSurrender { .. }) => "WeMustSurrender",
            Self::Unit(UnitMessage::WeAreInContactWithEnemy { .. }) => "WeAreInContactWithEnemy",
            Self::Unit(UnitMessage::WeHaveCaptured { .. }) => "WeHaveCaptured",
            Self::Unit(UnitMessage::WeHaveReachedOurObjective { .. }) => "WeHaveReachedOurObjective",
            Self::Unit(UnitMessage::WeHaveExhaustedSupplies { .. }) => "WeHaveExhaustedSupplies",
            Self::Unit(UnitMessage::WeAreRetreating { .. }) => "WeAreRetreating",
            Self::Unit(UnitMessage::WeHaveBeenOverrun { .. }) => "WeHaveBeenOverrun",
            Self::Unit(UnitMessage::WeAreUnderFire { .. }) => "WeAreUnderFire",
            Self::Initialized => "Initialized",
            Self::Reinforcements { .. } => "Reinforcements",
            Self::GameOver => "GameOver",
            Self::UnitAttack { .. } => "UnitAttack",
            Self::UnitMove { .. } => "UnitMove",
            Self::SupplyTruckMove { .. } => "SupplyTruckMove",
            Self::WeatherForecast { .. } => "WeatherForecast",
            Self::SupplyDistributionStart => "SupplyDistributionStart",
            Self::SupplyDistributionEnd => "SupplyDistributionEnd",
            Self::DailyUpdate { .. } => "DailyUpdate",
            Self::TimeChanged => "TimeChanged",
        }
    }

    /// Supply pool level of `side` as shown in daily reports: 0 critical,
    /// 1 low, 2 good.
    #[must_use]
    pub const fn supply_level(supply_levels: [i32; 2], side: usize) -> i32 {
        crate::math::clamp(supply_levels[side] / 256, 0, 2)
    }
}

impl From<UnitMessage> for Message {
    fn from(message: UnitMessage) -> Self {
        Self::Unit(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(formation: i32) -> Unit {
        Unit {
            formation,
            ..Unit::default()
        }
    }

    #[test]
    fn test_attack_text_and_losses() {
        let names = vec!["COLUMN".to_string(), "LINE".to_string()];
        let msg = UnitMessage::WeAreAttacking {
            unit: unit(0),
            enemy: unit(1),
            outcome: 25,
        };
        assert_eq!(
            msg.text(&names),
            "WE ARE ATTACKING.\nENEMY IS IN LINE FORMATION.\nOUR LOSSES ARE LIGHT."
        );
        let msg = UnitMessage::WeAreAttacking {
            unit: unit(0),
            enemy: unit(0),
            outcome: 128,
        };
        assert!(msg.text(&names).ends_with("VERY LIGHT."));
        assert_eq!(msg.icon(), Icon::FightingUnit);
        assert!(matches!(
            msg.enemy_message(),
            Some(UnitMessage::WeAreUnderFire { .. })
        ));
    }

    #[test]
    fn test_icons() {
        let u = unit(0);
        assert_eq!(UnitMessage::WeHaveBeenOverrun { unit: u }.icon(), Icon::UnitOnKnees);
        assert_eq!(UnitMessage::WeHaveExhaustedSupplies { unit: u }.icon(), Icon::SupplyTruck);
        assert_eq!(UnitMessage::WeAreRetreating { unit: u }.icon(), Icon::MovingUnit);
        assert_eq!(UnitMessage::WeAreUnderFire { unit: u }.icon(), Icon::ExclamationMark);
        assert!(UnitMessage::WeMustSurrender { unit: u }.enemy_message().is_none());
    }

    #[test]
    fn test_captured_text() {
        let city = City {
            name: "PARIS".into(),
            ..City::default()
        };
        let msg = UnitMessage::WeHaveCaptured { unit: unit(0), city };
        assert_eq!(msg.text(&[]), "WE HAVE CAPTURED PARIS");
        assert_eq!(Message::from(msg).kind(), "WeHaveCaptured");
    }

    #[test]
    fn test_supply_level_display() {
        assert_eq!(Message::supply_level([100, 600], 0), 0);
        assert_eq!(Message::supply_level([300, 600], 0), 1);
        assert_eq!(Message::supply_level([300, 600], 1), 2);
    }
}
