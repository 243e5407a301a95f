//! Balance testing utilities for headless games.
//!
//! Plays many seeded games and aggregates who came out ahead, to check that
//! the game balance option shifts the odds the way it should.

use cs_core::bundle::ScenarioBundle;
use cs_core::runner::{GameRunner, GameSummary};
use cs_core::transcript::RunConfig;
use tracing::debug;

/// Statistics for a set of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceStats {
    /// Total games played.
    pub total_games: u32,
    /// Games each side was ahead at the end.
    pub wins: [u32; 2],
    /// Games that hit the message cap before ending.
    pub unfinished: u32,
    /// Average advantage of the winning side.
    pub avg_advantage: f64,
    /// Average days played.
    pub avg_days: f64,
}

impl BalanceStats {
    /// Aggregate game summaries.
    #[must_use]
    pub fn from_summaries<'a>(summaries: impl IntoIterator<Item = &'a GameSummary>) -> Self {
        let mut stats = Self::default();
        let mut advantage = 0i64;
        let mut days = 0i64;
        for summary in summaries {
            stats.total_games += 1;
            if summary.game_over {
                stats.wins[summary.winning_side] += 1;
            } else {
                stats.unfinished += 1;
            }
            advantage += i64::from(summary.advantage);
            days += i64::from(summary.days_elapsed);
        }
        if stats.total_games > 0 {
            stats.avg_advantage = advantage as f64 / f64::from(stats.total_games);
            stats.avg_days = days as f64 / f64::from(stats.total_games);
        }
        stats
    }

    /// Share of games won by `side` (0.0 to 1.0).
    #[must_use]
    pub fn win_rate(&self, side: usize) -> f64 {
        if self.total_games == 0 {
            return 0.5;
        }
        f64::from(self.wins[side]) / f64::from(self.total_games)
    }

    /// Check if side 0's win rate lies within the given range.
    #[must_use]
    pub fn is_balanced(&self, min_rate: f64, max_rate: f64) -> bool {
        let rate = self.win_rate(0);
        rate >= min_rate && rate <= max_rate
    }
}

/// Play `seeds` games at every game balance setting from 0 to 4.
///
/// # Panics
///
/// Panics if a run fails.
pub fn sweep_game_balance(bundle: &ScenarioBundle, base: &RunConfig, seeds: u64) -> Vec<(i32, BalanceStats)> {
    (0..=4)
        .map(|game_balance| {
            let summaries: Vec<GameSummary> = (0..seeds)
                .map(|seed| {
                    let mut config = base.clone();
                    config.seed = base.seed.wrapping_add(seed);
                    config.options.game_balance = game_balance;
                    GameRunner::run(bundle, &config).expect("run failed").summary
                })
                .collect();
            let stats = BalanceStats::from_summaries(&summaries);
            debug!(game_balance, wins = ?stats.wins, "balance sweep");
            (game_balance, stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(winning_side: usize, advantage: i32, game_over: bool) -> GameSummary {
        GameSummary {
            days_elapsed: 2,
            game_over,
            winning_side,
            advantage,
            final_results: (0, 0, 0),
            men_lost: [0, 0],
            tanks_lost: [0, 0],
            cities_held: [0, 0],
        }
    }

    #[test]
    fn test_stats_from_summaries() {
        let summaries = [summary(0, 2, true), summary(1, 4, true), summary(0, 0, true), summary(0, 2, false)];
        let stats = BalanceStats::from_summaries(&summaries);
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.wins, [2, 1]);
        assert_eq!(stats.unfinished, 1);
        assert!((stats.avg_advantage - 2.0).abs() < 1e-9);
        assert!((stats.win_rate(0) - 0.5).abs() < 1e-9);
        assert!(stats.is_balanced(0.45, 0.55));
    }

    #[test]
    fn test_empty_stats_are_even() {
        let stats = BalanceStats::from_summaries(&Vec::<GameSummary>::new());
        assert!((stats.win_rate(1) - 0.5).abs() < 1e-9);
    }
}
