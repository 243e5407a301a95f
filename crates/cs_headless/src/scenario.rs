//! Loading run inputs and describing them.
//!
//! Bundles come from RON or bincode files (see
//! [`ScenarioBundle::load`]); option overrides come from RON files like:
//!
//! ```ron
//! (
//!     allied_commander: Computer,
//!     german_commander: Computer,
//!     intelligence: Full,
//!     unit_display: Symbols,
//!     game_balance: 3,
//!     speed: Fast,
//! )
//! ```

use std::path::Path;

use cs_core::bundle::ScenarioBundle;
use cs_core::data::Game;
use cs_core::options::Options;
use cs_core::transcript::Transcript;
use serde::Serialize;

use crate::error::BundleError;

/// Load a scenario bundle.
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<ScenarioBundle, BundleError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BundleError::FileNotFound(path.display().to_string()));
    }
    ScenarioBundle::load(path).map_err(BundleError::Load)
}

/// Load options from a RON file.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<Options, BundleError> {
    let contents = std::fs::read_to_string(path)?;
    let options: Options = ron::from_str(&contents)?;
    check_balance(options.game_balance)?;
    Ok(options)
}

/// Reject a game balance the score tables cannot index.
pub fn check_balance(balance: i32) -> Result<(), BundleError> {
    if (0..=4).contains(&balance) {
        Ok(())
    } else {
        Err(BundleError::InvalidBalance(balance))
    }
}

/// Reject a variant the bundle does not have.
pub fn check_variant(bundle: &ScenarioBundle, index: usize) -> Result<(), BundleError> {
    if index < bundle.variants.len() {
        Ok(())
    } else {
        Err(BundleError::NoSuchVariant {
            scenario: bundle.start.name.clone(),
            index,
            count: bundle.variants.len(),
        })
    }
}

/// One variant as shown by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantInfo {
    /// Variant name.
    pub name: String,
    /// Length in days.
    pub length_in_days: i32,
    /// Cities in play.
    pub cities: usize,
    /// Victory points at stake.
    pub victory_points: i32,
}

/// Summary of a scenario bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleInfo {
    /// Scenario name.
    pub name: String,
    /// Game of the series.
    pub game: Game,
    /// Start date as `year-month-day hour:minute`, 1-based.
    pub start: String,
    /// Units per side on the map at the start.
    pub units_in_game: [usize; 2],
    /// Units per side due to arrive later.
    pub reinforcements: [usize; 2],
    /// City records.
    pub cities: usize,
    /// Map width and height in tiles.
    pub map_size: [i32; 2],
    /// Playable variants.
    pub variants: Vec<VariantInfo>,
}

impl BundleInfo {
    /// Describe `bundle`.
    #[must_use]
    pub fn of(bundle: &ScenarioBundle) -> Self {
        let start = &bundle.start;
        let variants = bundle
            .variants
            .iter()
            .enumerate()
            .map(|(index, variant)| {
                let bit = 1u8 << index.min(7);
                let in_play = bundle
                    .terrain
                    .cities
                    .iter()
                    .filter(move |city| city.variant_bitmap & bit == 0);
                VariantInfo {
                    name: variant.name.clone(),
                    length_in_days: variant.length_in_days,
                    cities: in_play.clone().count(),
                    victory_points: in_play.map(|city| city.victory_points).sum(),
                }
            })
            .collect();
        Self {
            name: start.name.clone(),
            game: bundle.game,
            start: format!(
                "{}-{:02}-{:02} {:02}:{:02}",
                start.start_year,
                start.start_month + 1,
                start.start_day + 1,
                start.start_hour,
                start.start_minute
            ),
            units_in_game: [0, 1].map(|side| bundle.units.side(side).iter().filter(|u| u.in_game).count()),
            reinforcements: [0, 1].map(|side| {
                bundle
                    .units
                    .side(side)
                    .iter()
                    .filter(|u| !u.in_game && u.half_days_until_appear > 0)
                    .count()
            }),
            cities: bundle.terrain.cities.len(),
            map_size: [bundle.map.width, bundle.map.height],
            variants,
        }
    }
}

/// Count of one message kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    /// Message kind.
    pub kind: &'static str,
    /// Occurrences.
    pub count: usize,
}

/// Summary of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptInfo {
    /// Scenario the transcript was recorded on.
    pub scenario: String,
    /// Format version.
    pub version: u32,
    /// Variant played.
    pub variant: usize,
    /// Seed of the random stream.
    pub seed: u64,
    /// Side switches, as message indices.
    pub side_switches: Vec<usize>,
    /// Messages recorded.
    pub messages: usize,
    /// Whether the game reached its end.
    pub complete: bool,
    /// Message digest.
    pub digest: u64,
    /// Messages per kind.
    pub kinds: Vec<KindCount>,
}

impl TranscriptInfo {
    /// Describe `transcript`.
    #[must_use]
    pub fn of(transcript: &Transcript) -> Self {
        Self {
            scenario: transcript.scenario.clone(),
            version: transcript.version,
            variant: transcript.config.variant,
            seed: transcript.config.seed,
            side_switches: transcript.config.side_switches.clone(),
            messages: transcript.messages.len(),
            complete: transcript.is_complete(),
            digest: transcript.digest,
            kinds: transcript
                .kind_counts()
                .into_iter()
                .map(|(kind, count)| KindCount { kind, count })
                .collect(),
        }
    }
}
