//! Casualty and territory tallies, victory checks and final results.

use serde::{Deserialize, Serialize};

use crate::data::scenario::Game;
use crate::data::variants::Variant;
use crate::math::{clamp, min};

/// Running score of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    game: Game,
    variant: Variant,
    game_balance: i32,
    /// Men lost per side, in scenario units.
    pub men_lost: [i32; 2],
    /// Tanks lost per side, in scenario units.
    pub tanks_lost: [i32; 2],
    /// Victory points held per side.
    pub cities_held: [i32; 2],
    /// Critical locations captured per side.
    pub critical_locations_captured: [i32; 2],
}

impl Score {
    /// Fresh score for `variant`.
    #[must_use]
    pub fn new(game: Game, variant: Variant, game_balance: i32) -> Self {
        let cities_held = variant.cities_held;
        Self {
            game,
            variant,
            game_balance,
            men_lost: [0; 2],
            tanks_lost: [0; 2],
            cities_held,
            critical_locations_captured: [0; 2],
        }
    }

    /// The variant being played.
    #[must_use]
    pub const fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Critical locations captured by side 0 minus those captured by side 1.
    #[must_use]
    pub const fn critical_location_balance(&self) -> i32 {
        self.critical_locations_captured[0] - self.critical_locations_captured[1]
    }

    /// Whether the game has ended after `days_elapsed` days.
    #[must_use]
    pub const fn is_game_over(&self, days_elapsed: i32) -> bool {
        let balance = self.critical_location_balance();
        days_elapsed >= self.variant.length_in_days
            || balance >= self.variant.critical_locations[0]
            || -balance >= self.variant.critical_locations[1]
    }

    /// Side currently ahead and by how much, 0..=4.
    ///
    /// `data174` scales city points in Conflict in Vietnam.
    #[must_use]
    pub fn winning_side_and_advantage(&self, data174: i32) -> (usize, i32) {
        let mut side0 = (1 + self.men_lost[1] + self.tanks_lost[1]) * self.variant.data3 / 8;
        let mut side1 = 1 + self.men_lost[0] + self.tanks_lost[0];
        if self.game == Game::Conflict {
            side0 += self.cities_held[0] * 6 / (data174 + 1);
            side1 += self.cities_held[1] * 6 / (data174 + 1);
        } else {
            side0 += self.cities_held[0] * 3;
            side1 += self.cities_held[1] * 3;
        }
        let (score, winner) = if side0 < side1 {
            (side1 * 3 / side0.max(1), 1)
        } else {
            (side0 * 3 / side1.max(1), 0)
        };
        let advantage = if score >= 3 { clamp(score - 3, 0, 4) } else { 4 };
        (winner, advantage)
    }

    /// Result (0..=9, higher is better for the reference side), difficulty
    /// and rank (0..=11) as seen by `player_side`.
    #[must_use]
    pub fn final_results(
        &self,
        player_side: usize,
        player_controlled: [bool; 2],
        data174: i32,
    ) -> (i32, i32, i32) {
        let (winner, advantage) = self.winning_side_and_advantage(data174);
        let absolute = if winner == 0 {
            advantage + 6
        } else {
            5 - advantage
        };
        let mut reference = player_side as i32;
        if player_controlled[0] && player_controlled[1] {
            reference = i32::from(advantage < 6);
        }
        let mut result = if reference == 0 {
            absolute
        } else {
            11 - absolute
        };
        let balance = self.critical_location_balance();
        if balance >= self.variant.critical_locations[0] {
            result = 1 + 9 * (1 - reference);
        }
        if -balance >= self.variant.critical_locations[1] {
            result = 1 + 9 * reference;
        }
        let difficulty = if reference == 0 {
            self.game_balance
        } else {
            4 - self.game_balance
        };
        let rank = min(result - 2 * difficulty + 4, 12);
        (result - 1, difficulty, rank - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant() -> Variant {
        Variant {
            name: "TEST".into(),
            length_in_days: 5,
            critical_locations: [3, 2],
            data3: 8,
            cities_held: [20, 30],
        }
    }

    #[test]
    fn test_initial_cities_held_come_from_variant() {
        let score = Score::new(Game::Crusade, variant(), 2);
        assert_eq!(score.cities_held, [20, 30]);
        assert_eq!(score.variant().length_in_days, 5);
    }

    #[test]
    fn test_winning_side() {
        let mut score = Score::new(Game::Crusade, variant(), 2);
        // side0 = 1 + 60 = 61, side1 = 1 + 90 = 91 -> 91*3/61 = 4
        assert_eq!(score.winning_side_and_advantage(0), (1, 1));
        score.men_lost[1] = 200;
        // side0 = 201 + 60 = 261, side1 = 91 -> 261*3/91 = 8
        assert_eq!(score.winning_side_and_advantage(0), (0, 4));
    }

    #[test]
    fn test_conflict_scales_cities() {
        let score = Score::new(Game::Conflict, variant(), 2);
        // side0 = 1 + 20*6/3 = 41, side1 = 1 + 30*6/3 = 61 -> 61*3/41 = 4
        assert_eq!(score.winning_side_and_advantage(2), (1, 1));
    }

    #[test]
    fn test_game_over_conditions() {
        let mut score = Score::new(Game::Crusade, variant(), 2);
        assert!(!score.is_game_over(4));
        assert!(score.is_game_over(5));
        score.critical_locations_captured[1] = 2;
        assert!(score.is_game_over(0));
        score.critical_locations_captured = [3, 0];
        assert!(score.is_game_over(0));
    }

    #[test]
    fn test_final_results() {
        let mut score = Score::new(Game::Crusade, variant(), 2);
        // side 1 ahead by 1: absolute = 4.
        assert_eq!(score.final_results(0, [true, false], 0), (3, 2, 3));
        assert_eq!(score.final_results(1, [false, true], 0), (6, 2, 6));
        score.critical_locations_captured = [3, 0];
        assert_eq!(score.final_results(0, [true, false], 0), (9, 2, 9));
    }
}
