//! # Command Series Core
//!
//! Deterministic turn-resolution engine for the Command Series hex
//! wargames (Crusade in Europe, Decision in the Desert, Conflict in
//! Vietnam).
//!
//! This crate contains **only** the simulation:
//! - No rendering
//! - No terminal or disk-image IO
//! - No system randomness (every draw comes from an injected [`rng::RandomSource`])
//!
//! The simulation runs on its own thread and hands every event to the host
//! through a blocking rendezvous ([`message_sync`]). The same inputs and the
//! same pull sequence always yield the same messages, which is what
//! [`transcript`] and [`runner`] rely on.
//!
//! ## Crate Structure
//!
//! - [`coords`], [`hex`] - Map/unit coordinates and hex neighbourhoods
//! - [`data`] - Record codecs for the static scenario inputs
//! - [`units`] - Unit records and the unit registry
//! - [`terrain_types`] - Terrain types with the shown-unit overlay
//! - [`world`] - Everything a unit update can touch
//! - [`influence`] - Strategic grids used by the computer commander
//! - [`ai`] - Order determination, movement, combat and supply
//! - [`game_state`] - Clock, daily passes and the unit update quota
//! - [`save`], [`flashback`] - Saved games and daily snapshots
//! - [`bundle`] - Serializable scenario bundles
//! - [`runner`], [`transcript`] - Headless runs and their records

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod bundle;
pub mod coords;
pub mod data;
pub mod error;
pub mod flashback;
pub mod game_state;
pub mod hex;
pub mod influence;
pub mod math;
pub mod message_sync;
pub mod messages;
pub mod options;
pub mod rng;
pub mod runner;
pub mod save;
pub mod score;
pub mod terrain_types;
pub mod transcript;
pub mod units;
pub mod world;

#[cfg(test)]
mod testing;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bundle::{ScenarioBundle, ScenarioRecords};
    pub use crate::coords::{MapCoords, UnitCoords};
    pub use crate::data::{Game, ScenarioData, ScenarioStart, Variant};
    pub use crate::error::{GameError, Result};
    pub use crate::game_state::GameState;
    pub use crate::message_sync::{MessageReceiver, MessageSync};
    pub use crate::messages::{Message, UnitMessage};
    pub use crate::options::{Commander, Intelligence, Options};
    pub use crate::rng::{ChaChaSource, Generator, GoSource, RandomSource};
    pub use crate::runner::{GameRunner, GameSummary, RunOutcome};
    pub use crate::transcript::{RunConfig, Transcript};
    pub use crate::units::{Order, Unit, Units};
    pub use crate::world::World;
}
