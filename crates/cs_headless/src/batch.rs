//! Batch game runner for balance testing.
//!
//! Runs many seeded games in parallel using rayon and aggregates who came
//! out ahead.

use std::time::Instant;

use cs_core::bundle::ScenarioBundle;
use cs_core::options::Options;
use cs_core::rng::Generator;
use cs_core::runner::{GameRunner, GameSummary};
use cs_core::transcript::RunConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RunnerError;

/// Configuration for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Variant to play.
    pub variant: usize,
    /// Number of games to run.
    pub game_count: u32,
    /// Seed of the first game; game `i` uses `seed_start + i`.
    pub seed_start: u64,
    /// Generator the seeds feed.
    pub generator: Generator,
    /// Maximum parallel games (0 = use rayon default).
    pub parallel_games: u32,
    /// Options shared by every game.
    pub options: Options,
    /// Message cap per game.
    pub max_messages: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let run = RunConfig::default();
        Self {
            variant: run.variant,
            game_count: 100,
            seed_start: 0,
            generator: run.generator,
            parallel_games: 0,
            options: run.options,
            max_messages: run.max_messages,
        }
    }
}

impl BatchConfig {
    /// Create config for `game_count` games of `variant`.
    #[must_use]
    pub fn new(variant: usize, game_count: u32) -> Self {
        Self {
            variant,
            game_count,
            ..Default::default()
        }
    }

    /// Set seed start.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed_start = seed;
        self
    }

    /// Set options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    fn run_config(&self, index: u32) -> RunConfig {
        RunConfig {
            variant: self.variant,
            seed: self.seed_start.wrapping_add(u64::from(index)),
            generator: self.generator,
            options: self.options,
            max_messages: self.max_messages,
            side_switches: Vec::new(),
        }
    }
}

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchGame {
    /// Seed used.
    pub seed: u64,
    /// Messages produced.
    pub messages: usize,
    /// Transcript digest.
    pub digest: u64,
    /// Final standing.
    pub summary: GameSummary,
}

/// Error during batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// Game index.
    pub game_index: u32,
    /// Seed used.
    pub seed: u64,
    /// Error message.
    pub message: String,
}

/// Aggregate over the finished games of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Games finished.
    pub games: u32,
    /// Games each side was ahead at the end.
    pub wins: [u32; 2],
    /// Games that hit the message cap.
    pub unfinished: u32,
    /// Average advantage of the side ahead.
    pub avg_advantage: f64,
    /// Average days played.
    pub avg_days: f64,
    /// Average men lost per side.
    pub avg_men_lost: [f64; 2],
    /// Average tanks lost per side.
    pub avg_tanks_lost: [f64; 2],
}

impl BatchSummary {
    /// Aggregate `games`.
    #[must_use]
    pub fn from_games(games: &[BatchGame]) -> Self {
        let mut summary = Self::default();
        if games.is_empty() {
            return summary;
        }
        let n = games.len() as f64;
        let average = |f: &dyn Fn(&GameSummary) -> i32| games.iter().map(|g| f64::from(f(&g.summary))).sum::<f64>() / n;
        for game in games {
            summary.games += 1;
            if game.summary.game_over {
                summary.wins[game.summary.winning_side] += 1;
            } else {
                summary.unfinished += 1;
            }
        }
        summary.avg_advantage = average(&|s: &GameSummary| s.advantage);
        summary.avg_days = average(&|s: &GameSummary| s.days_elapsed);
        summary.avg_men_lost = [0, 1].map(|side| average(&|s: &GameSummary| s.men_lost[side]));
        summary.avg_tanks_lost = [0, 1].map(|side| average(&|s: &GameSummary| s.tanks_lost[side]));
        summary
    }

    /// Share of finished games side `side` was ahead in.
    #[must_use]
    pub fn win_rate(&self, side: usize) -> f64 {
        let finished = self.games - self.unfinished;
        if finished == 0 {
            return 0.0;
        }
        f64::from(self.wins[side]) / f64::from(finished)
    }
}

/// Results from a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResults {
    /// Scenario played.
    pub scenario: String,
    /// Configuration used.
    pub config: BatchConfig,
    /// Individual games, in seed order.
    pub games: Vec<BatchGame>,
    /// Aggregate summary.
    pub summary: BatchSummary,
    /// Total runtime.
    pub duration_seconds: f64,
    /// Errors encountered.
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

fn run_single_game(bundle: &ScenarioBundle, config: &BatchConfig, index: u32) -> Result<BatchGame, BatchError> {
    let run = config.run_config(index);
    let seed = run.seed;
    GameRunner::run(bundle, &run)
        .map(|outcome| BatchGame {
            seed,
            messages: outcome.transcript.messages.len(),
            digest: outcome.transcript.digest,
            summary: outcome.summary,
        })
        .map_err(|e| {
            warn!("Game {index} failed: {e}");
            BatchError {
                game_index: index,
                seed,
                message: e.to_string(),
            }
        })
}

/// Run a batch of games.
///
/// # Errors
///
/// Returns an error if the thread pool cannot be built. Failed games are
/// reported in [`BatchResults::errors`].
pub fn run_batch(bundle: &ScenarioBundle, config: BatchConfig) -> Result<BatchResults, RunnerError> {
    let start = Instant::now();
    info!(
        "Starting batch run: {} games of '{}'",
        config.game_count, bundle.start.name
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallel_games as usize)
        .build()?;
    let results: Vec<Result<BatchGame, BatchError>> = pool.install(|| {
        (0..config.game_count)
            .into_par_iter()
            .map(|i| {
                let result = run_single_game(bundle, &config, i);
                debug!(game = i, ok = result.is_ok(), "batch game finished");
                result
            })
            .collect()
    });

    let (games, errors): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let games: Vec<BatchGame> = games.into_iter().filter_map(Result::ok).collect();
    let errors: Vec<BatchError> = errors.into_iter().filter_map(Result::err).collect();

    let summary = BatchSummary::from_games(&games);
    let duration_seconds = start.elapsed().as_secs_f64();

    info!(
        "Batch complete: {} games in {:.1}s ({:.1} games/sec)",
        games.len(),
        duration_seconds,
        games.len() as f64 / duration_seconds.max(f64::EPSILON)
    );

    Ok(BatchResults {
        scenario: bundle.start.name.clone(),
        config,
        games,
        summary,
        duration_seconds,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_test_utils::fixtures::synthetic_bundle;

    fn game(winning_side: usize, game_over: bool, men_lost: [i32; 2]) -> BatchGame {
        BatchGame {
            seed: 0,
            messages: 10,
            digest: 0,
            summary: GameSummary {
                days_elapsed: 2,
                game_over,
                winning_side,
                advantage: 2,
                final_results: (0, 0, 0),
                men_lost,
                tanks_lost: [0, 0],
                cities_held: [0, 0],
            },
        }
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new(1, 500).with_seed(12345);
        assert_eq!(config.variant, 1);
        assert_eq!(config.game_count, 500);
        assert_eq!(config.seed_start, 12345);
        assert_eq!(config.run_config(3).seed, 12348);
        assert_eq!(config.options, Options::computer_vs_computer());
    }

    #[test]
    fn test_summary_from_games() {
        let games = [game(0, true, [100, 300]), game(1, true, [200, 100]), game(0, false, [0, 200])];
        let summary = BatchSummary::from_games(&games);
        assert_eq!(summary.games, 3);
        assert_eq!(summary.wins, [1, 1]);
        assert_eq!(summary.unfinished, 1);
        assert!((summary.avg_men_lost[0] - 100.0).abs() < 1e-9);
        assert!((summary.avg_men_lost[1] - 200.0).abs() < 1e-9);
        assert!((summary.win_rate(0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_games(&[]);
        assert_eq!(summary.games, 0);
        assert!(summary.win_rate(0).abs() < 1e-9);
    }

    #[test]
    fn test_run_batch_is_seed_ordered_and_reproducible() {
        let bundle = synthetic_bundle();
        let config = BatchConfig {
            parallel_games: 2,
            ..BatchConfig::new(0, 4).with_seed(10)
        };
        let first = run_batch(&bundle, config.clone()).unwrap();
        assert!(first.errors.is_empty());
        assert_eq!(first.games.iter().map(|g| g.seed).collect::<Vec<_>>(), vec![10, 11, 12, 13]);
        assert_eq!(first.summary.games, 4);
        assert!(first.games.iter().all(|g| g.summary.game_over));

        let second = run_batch(&bundle, config).unwrap();
        let digests = |r: &BatchResults| r.games.iter().map(|g| g.digest).collect::<Vec<_>>();
        assert_eq!(digests(&first), digests(&second));
    }

    #[test]
    fn test_bad_variant_is_reported_per_game() {
        let results = run_batch(&synthetic_bundle(), BatchConfig::new(9, 2)).unwrap();
        assert!(results.games.is_empty());
        assert_eq!(results.errors.len(), 2);
        assert_eq!(results.errors[1].game_index, 1);
    }

    #[test]
    fn test_results_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("batch_results.json");
        let results = run_batch(&synthetic_bundle(), BatchConfig::new(0, 1)).unwrap();
        results.save(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["scenario"], results.scenario.as_str());
        assert_eq!(json["games"].as_array().unwrap().len(), 1);
    }
}
