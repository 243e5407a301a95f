//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the engine produces identical
//! message streams given identical inputs.
//!
//! # Testing Strategy
//!
//! A game must be reproducible from its scenario, options and seed alone.
//! Sources of non-determinism include:
//!
//! - **System randomness**: every draw goes through the injected
//!   [`RandomSource`](cs_core::rng::RandomSource); nothing reads the clock or
//!   the OS generator.
//!
//! - **Thread scheduling**: the simulation thread blocks at every message,
//!   so the host's timing cannot change what is produced.
//!
//! - **Host interventions**: side switches are applied only at the
//!   synchronization point, so the same pull sequence yields the same stream.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: individual passes (movement, combat, supply) with a
//!    scripted random source
//! 2. **Property tests**: random seeds must still produce reproducible runs
//! 3. **Integration tests**: full games are reproducible
//! 4. **Parallel tests**: running N games in parallel all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use cs_core::bundle::ScenarioBundle;
use cs_core::game_state::GameState;
use cs_core::runner::GameRunner;
use cs_core::transcript::RunConfig;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Digests from each run.
    pub hashes: Vec<u64>,
    /// Messages produced by the first run.
    pub messages: usize,
}

impl DeterminismResult {
    fn from_runs(hashes: Vec<u64>, messages: usize) -> Self {
        let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
        Self {
            is_deterministic,
            hashes,
            messages,
        }
    }

    /// Get all unique digests (should be 1 for a deterministic engine).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the engine was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different digests.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Engine is non-deterministic!\n\
                 Runs: {}\n\
                 Messages: {}\n\
                 Unique digests: {} (expected 1)\n\
                 All digests: {:?}",
                self.hashes.len(),
                self.messages,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a state machine multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `steps` - Number of steps per run
/// * `setup` - Function to create the initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute a state hash
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..steps {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    DeterminismResult::from_runs(hashes, steps as usize)
}

/// Play `bundle` `runs` times with the same configuration and compare the
/// transcript digests.
///
/// # Panics
///
/// Panics if the configured variant does not exist.
pub fn verify_run_determinism(bundle: &ScenarioBundle, config: &RunConfig, runs: usize) -> DeterminismResult {
    let mut hashes = Vec::with_capacity(runs);
    let mut messages = 0;
    for run in 0..runs {
        let outcome = GameRunner::run(bundle, config).expect("run failed");
        if run == 0 {
            messages = outcome.transcript.messages.len();
        }
        hashes.push(outcome.transcript.digest);
    }
    DeterminismResult::from_runs(hashes, messages)
}

/// Play `bundle` on `runs` threads at once and compare the digests.
///
/// Catches state accidentally shared between games.
///
/// # Panics
///
/// Panics if a run fails.
pub fn run_parallel_games(bundle: &ScenarioBundle, config: &RunConfig, runs: usize) -> DeterminismResult {
    let outcomes: Vec<(u64, usize)> = thread::scope(|s| {
        let handles: Vec<_> = (0..runs)
            .map(|_| {
                s.spawn(|| {
                    let outcome = GameRunner::run(bundle, config).expect("run failed");
                    (outcome.transcript.digest, outcome.transcript.messages.len())
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let messages = outcomes.first().map_or(0, |(_, n)| *n);
    DeterminismResult::from_runs(outcomes.into_iter().map(|(h, _)| h).collect(), messages)
}

/// Compare two runs message by message, finding the first divergence.
///
/// # Returns
///
/// `None` if the runs match, `Some(index)` of the first differing message
/// otherwise.
///
/// # Panics
///
/// Panics if a run fails.
pub fn find_first_divergence(bundle: &ScenarioBundle, config: &RunConfig) -> Option<usize> {
    let first = GameRunner::run(bundle, config).expect("run failed");
    let second = GameRunner::run(bundle, config).expect("run failed");
    first.transcript.first_divergence(&second.transcript.messages)
}

/// Verify that saving `state`, loading it into `fresh` and saving again
/// yields the same bytes.
///
/// # Panics
///
/// Panics if saving or loading fails.
pub fn verify_save_round_trip(state: &GameState, fresh: &mut GameState) -> bool {
    let mut first = Vec::new();
    state.save(&mut first).expect("save failed");
    fresh.load(&mut first.as_slice()).expect("load failed");
    let mut second = Vec::new();
    fresh.save(&mut second).expect("save failed");
    first == second
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for engine inputs.
pub mod strategies {
    use proptest::prelude::*;

    use cs_core::coords::{MapCoords, UnitCoords};
    use cs_core::data::map::{MAP_HEIGHT, MAP_WIDTH};
    use cs_core::options::Options;

    /// Any tile on the map. Odd rows are one tile shorter.
    pub fn arb_map_coords() -> impl Strategy<Value = MapCoords> {
        (0..MAP_HEIGHT)
            .prop_flat_map(|y| (0..MAP_WIDTH - y % 2).prop_map(move |x| MapCoords::new(x, y)))
    }

    /// Any unit cell, including cells off the map.
    pub fn arb_unit_coords() -> impl Strategy<Value = UnitCoords> {
        (-4i32..2 * MAP_WIDTH + 4, -4i32..MAP_HEIGHT + 4).prop_map(|(x, y)| UnitCoords::new(x, y))
    }

    /// Seeds for the random stream.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Computer-vs-computer options with any balance setting.
    pub fn arb_options() -> impl Strategy<Value = Options> {
        (0i32..=4).prop_map(|game_balance| Options {
            game_balance,
            ..Options::computer_vs_computer()
        })
    }

    /// Bounds and value for clamp properties.
    pub fn arb_clamp_input() -> impl Strategy<Value = (i32, i32, i32)> {
        (-1000i32..1000, -500i32..500, 0i32..500).prop_map(|(v, lo, span)| (v, lo, lo + span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::synthetic_bundle;

    #[test]
    fn test_verify_determinism_counter() {
        let result = verify_determinism(3, 10, || 0u64, |s| *s += 3, |s| compute_hash(s));
        result.assert_deterministic();
        assert_eq!(result.unique_hashes().len(), 1);
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_assert_reports_divergence() {
        let result = DeterminismResult::from_runs(vec![1, 2], 0);
        result.assert_deterministic();
    }

    #[test]
    fn test_capped_runs_match() {
        let config = RunConfig {
            seed: 11,
            max_messages: 300,
            ..RunConfig::default()
        };
        let result = verify_run_determinism(&synthetic_bundle(), &config, 2);
        result.assert_deterministic();
        assert_eq!(result.messages, 300);
    }
}
