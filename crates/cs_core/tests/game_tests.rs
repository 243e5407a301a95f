//! Whole-game tests on the synthetic front.
//!
//! The disk-image regression fixtures of the original games are not
//! redistributable; these tests run the same checks on synthetic bundles.

use cs_core::game_state::GameState;
use cs_core::message_sync::MessageSync;
use cs_core::messages::Message;
use cs_core::options::Options;
use cs_core::rng::{ChaChaSource, Generator, GoSource};
use cs_core::runner::GameRunner;
use cs_core::transcript::RunConfig;
use cs_test_utils::balance::sweep_game_balance;
use cs_test_utils::determinism::strategies::{arb_options, arb_seed};
use cs_test_utils::determinism::{
    compute_hash, find_first_divergence, run_parallel_games, verify_determinism, verify_run_determinism,
    verify_save_round_trip,
};
use cs_test_utils::fixtures::{synthetic_bundle, ScenarioBuilder};
use cs_test_utils::proptest::prelude::*;

fn collecting_game(seed: u64) -> GameState {
    synthetic_bundle()
        .new_game(
            0,
            Options::computer_vs_computer(),
            Box::new(ChaChaSource::new(seed)),
            MessageSync::collecting(),
        )
        .unwrap()
}

fn assert_units_in_range(state: &GameState) {
    for unit in state.world().units.iter().filter(|u| u.in_game) {
        assert!((0..=250).contains(&unit.morale), "morale {} of {:?}", unit.morale, unit.xy);
        assert!((0..=255).contains(&unit.fatigue), "fatigue {} of {:?}", unit.fatigue, unit.xy);
        assert!((0..=255).contains(&unit.supply_level), "supply {} of {:?}", unit.supply_level, unit.xy);
    }
}

#[test]
fn test_game_runs_to_game_over() {
    let config = RunConfig {
        seed: 3,
        ..RunConfig::default()
    };
    let outcome = GameRunner::run(&synthetic_bundle(), &config).unwrap();
    let messages = &outcome.transcript.messages;
    assert_eq!(messages.first(), Some(&Message::Initialized));
    assert_eq!(messages.last(), Some(&Message::GameOver));
    assert!(outcome.summary.game_over);
    assert_eq!(outcome.summary.days_elapsed, 2);
    let daily = messages
        .iter()
        .filter(|m| matches!(m, Message::DailyUpdate { .. }))
        .count();
    assert_eq!(daily, 2);
    assert!(outcome.summary.advantage >= 0 && outcome.summary.advantage <= 4);
    let (result, _, _) = outcome.summary.final_results;
    assert!((0..=9).contains(&result), "result {result}");
}

#[test]
fn test_message_stream_is_deterministic() {
    let config = RunConfig {
        seed: 17,
        ..RunConfig::default()
    };
    let bundle = synthetic_bundle();
    verify_run_determinism(&bundle, &config, 3).assert_deterministic();
    assert_eq!(find_first_divergence(&bundle, &config), None);
}

#[test]
fn test_different_seeds_diverge() {
    let bundle = synthetic_bundle();
    let a = GameRunner::run(&bundle, &RunConfig { seed: 1, ..RunConfig::default() }).unwrap();
    let b = GameRunner::run(&bundle, &RunConfig { seed: 2, ..RunConfig::default() }).unwrap();
    assert_ne!(a.transcript.digest, b.transcript.digest);
}

#[test]
fn test_generator_choice_is_recorded() {
    let bundle = synthetic_bundle();
    let go = GameRunner::run(&bundle, &RunConfig { seed: 6, ..RunConfig::default() }).unwrap();
    let config = RunConfig {
        seed: 6,
        generator: Generator::ChaCha,
        ..RunConfig::default()
    };
    let chacha = GameRunner::run(&bundle, &config).unwrap();
    assert_ne!(go.transcript.digest, chacha.transcript.digest);
    assert_eq!(chacha.transcript.config.generator, Generator::ChaCha);
    assert_eq!(GameRunner::verify(&bundle, &chacha.transcript).unwrap(), None);
}

#[test]
fn test_transcript_verifies() {
    let bundle = synthetic_bundle();
    let config = RunConfig {
        seed: 5,
        side_switches: vec![100, 400],
        ..RunConfig::default()
    };
    let outcome = GameRunner::run(&bundle, &config).unwrap();
    assert_eq!(GameRunner::verify(&bundle, &outcome.transcript).unwrap(), None);
}

#[test]
fn test_side_switch_mid_game() {
    let bundle = synthetic_bundle();
    // Side 0 is played by a human with limited intelligence.
    let options = Options::default();
    let config = RunConfig {
        seed: 8,
        options,
        side_switches: vec![50],
        ..RunConfig::default()
    };
    let before = bundle
        .new_game(0, options, Box::new(ChaChaSource::new(8)), MessageSync::collecting())
        .unwrap()
        .world()
        .commander_flags;
    let outcome = GameRunner::run(&bundle, &config).unwrap();
    let after = outcome.state.world().commander_flags;
    assert_eq!(after.player_can_see_units[0], before.player_can_see_units[1]);
    assert_eq!(after.player_can_see_units[1], before.player_can_see_units[0]);
    assert!(outcome.summary.game_over);
}

#[test]
fn test_message_cap_stops_the_game() {
    let config = RunConfig {
        seed: 4,
        max_messages: 50,
        ..RunConfig::default()
    };
    let outcome = GameRunner::run(&synthetic_bundle(), &config).unwrap();
    assert_eq!(outcome.transcript.messages.len(), 50);
    assert!(!outcome.summary.game_over);
    assert!(!outcome.transcript.is_complete());
}

#[test]
fn test_unit_values_stay_in_range() {
    let mut state = collecting_game(21);
    assert!(state.init());
    assert_units_in_range(&state);
    while state.update() {
        assert_units_in_range(&state);
    }
}

#[test]
fn test_victory_points_are_conserved() {
    let mut state = collecting_game(9);
    let total = |state: &GameState| state.cities_held(0) + state.cities_held(1);
    let start = total(&state);
    assert!(state.init());
    while state.update() {
        assert_eq!(total(&state), start);
    }
    assert_eq!(total(&state), start);
}

#[test]
fn test_reinforcements_arrive() {
    let mut state = collecting_game(2);
    assert!(state.init());
    while state.update() {}
    let messages = state.world_mut().take_collected();
    assert!(messages
        .iter()
        .any(|m| matches!(m, Message::Reinforcements { .. })));
}

#[test]
fn test_save_round_trip_mid_game() {
    let mut state = collecting_game(12);
    assert!(state.init());
    for _ in 0..40 {
        assert!(state.update());
    }
    let mut fresh = collecting_game(99);
    assert!(verify_save_round_trip(&state, &mut fresh));
    assert_eq!(fresh.hour(), state.hour());
    assert_eq!(fresh.days_elapsed(), state.days_elapsed());
    assert_eq!(fresh.flashback(), state.flashback());
}

#[test]
fn test_longer_campaign_variant() {
    let bundle = ScenarioBuilder::new().front_units(36).length_in_days(1).build();
    let config = RunConfig {
        variant: 1,
        seed: 6,
        ..RunConfig::default()
    };
    let outcome = GameRunner::run(&bundle, &config).unwrap();
    assert!(outcome.summary.game_over);
    assert_eq!(outcome.summary.days_elapsed, 3);
    assert_eq!(outcome.state.variant().name, "CAMPAIGN");
}

#[test]
fn test_stepped_state_is_deterministic() {
    let result = verify_determinism(
        3,
        60,
        || {
            let mut state = synthetic_bundle()
                .new_game(
                    0,
                    Options::computer_vs_computer(),
                    Box::new(GoSource::new(14)),
                    MessageSync::collecting(),
                )
                .unwrap();
            assert!(state.init());
            state
        },
        |state| assert!(state.update()),
        |state| {
            let mut bytes = Vec::new();
            state.save(&mut bytes).unwrap();
            compute_hash(&bytes)
        },
    );
    result.assert_deterministic();
}

#[test]
fn test_parallel_games_do_not_share_state() {
    let config = RunConfig {
        seed: 23,
        ..RunConfig::default()
    };
    let bundle = synthetic_bundle();
    let parallel = run_parallel_games(&bundle, &config, 4);
    parallel.assert_deterministic();
    let sequential = GameRunner::run(&bundle, &config).unwrap();
    assert_eq!(parallel.unique_hashes(), vec![sequential.transcript.digest]);
    assert_eq!(parallel.messages, sequential.transcript.messages.len());
}

#[test]
fn test_balance_sweep_covers_every_setting() {
    let sweep = sweep_game_balance(&synthetic_bundle(), &RunConfig::default(), 3);
    assert_eq!(sweep.iter().map(|(b, _)| *b).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    for (balance, stats) in &sweep {
        assert_eq!(stats.total_games, 3, "balance {balance}");
        assert_eq!(stats.unfinished, 0, "balance {balance}");
        assert_eq!(stats.wins[0] + stats.wins[1], 3, "balance {balance}");
        assert!(stats.avg_days > 0.0, "balance {balance}");
        assert!(stats.is_balanced(0.0, 1.0));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_any_seed_and_balance_replays(seed in arb_seed(), options in arb_options()) {
        let config = RunConfig {
            seed,
            options,
            max_messages: 400,
            ..RunConfig::default()
        };
        let bundle = synthetic_bundle();
        let outcome = GameRunner::run(&bundle, &config).unwrap();
        prop_assert_eq!(outcome.transcript.messages.first(), Some(&Message::Initialized));
        prop_assert!(outcome.transcript.messages.len() <= 400);
        prop_assert_eq!(GameRunner::verify(&bundle, &outcome.transcript).unwrap(), None);
    }
}
