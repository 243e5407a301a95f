//! Record codecs for the static inputs of a scenario.
//!
//! Every type here decodes from (and encodes back to) the fixed byte layout
//! of the original game files. Locating and unpacking those files is left to
//! the caller; most hosts load a [`ScenarioBundle`](crate::bundle::ScenarioBundle)
//! instead.

pub mod generals;
pub mod generic;
pub mod hexes;
pub mod map;
pub mod scenario;
pub mod scenario_data;
pub mod terrain;
pub mod variants;

pub use generals::{General, Generals};
pub use generic::Generic;
pub use hexes::{Hexes, NeighbourTable};
pub use map::Map;
pub use scenario::{Game, ScenarioStart};
pub use scenario_data::{DataUpdate, ScenarioData};
pub use terrain::{City, Terrain};
pub use variants::{parse_variants, Variant};
