//! Synchronous driver for batch runs and tests.
//!
//! [`GameRunner`] plays a scenario on a simulation thread and pulls every
//! message through the rendezvous channel, the same way an interactive host
//! would, until the game ends or the message cap is hit.

use serde::{Deserialize, Serialize};
use std::thread;
use tracing::{debug, info};

use crate::bundle::ScenarioBundle;
use crate::error::Result;
use crate::game_state::GameState;
use crate::message_sync::MessageSync;
use crate::messages::Message;
use crate::transcript::{RunConfig, Transcript};

/// Final standing of a game, as reported by headless runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Days played.
    pub days_elapsed: i32,
    /// Whether the game reached its end.
    pub game_over: bool,
    /// Side ahead.
    pub winning_side: usize,
    /// Advantage of the winning side, 0..=4.
    pub advantage: i32,
    /// Result, difficulty and rank as seen by side 0.
    pub final_results: (i32, i32, i32),
    /// Men lost per side, in soldiers.
    pub men_lost: [i32; 2],
    /// Tanks lost per side, in vehicles.
    pub tanks_lost: [i32; 2],
    /// Victory points held per side.
    pub cities_held: [i32; 2],
}

impl GameSummary {
    /// Summarize `state`.
    #[must_use]
    pub fn of(state: &GameState, game_over: bool) -> Self {
        let (winning_side, advantage) = state.winning_side_and_advantage();
        Self {
            days_elapsed: state.days_elapsed(),
            game_over,
            winning_side,
            advantage,
            final_results: state.final_results(0),
            men_lost: [state.men_lost(0), state.men_lost(1)],
            tanks_lost: [state.tanks_lost(0), state.tanks_lost(1)],
            cities_held: [state.cities_held(0), state.cities_held(1)],
        }
    }
}

/// Outcome of a run.
pub struct RunOutcome {
    /// Everything the simulation produced.
    pub transcript: Transcript,
    /// Final standing.
    pub summary: GameSummary,
    /// The game as it stood when the run ended.
    pub state: GameState,
}

/// Plays scenarios headlessly.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameRunner;

impl GameRunner {
    /// Play `bundle` with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variant does not exist.
    ///
    /// # Panics
    ///
    /// Re-raises a panic of the simulation thread.
    pub fn run(bundle: &ScenarioBundle, config: &RunConfig) -> Result<RunOutcome> {
        let (sync, receiver) = MessageSync::channel();
        let mut state = bundle.new_game(
            config.variant,
            config.options,
            config.generator.source(config.seed),
            sync,
        )?;
        debug!(scenario = %bundle.start.name, seed = config.seed, generator = ?config.generator, "starting run");
        let producer = thread::spawn(move || {
            state.play();
            state
        });

        let mut messages = Vec::new();
        let mut switches = config.side_switches.iter().copied().peekable();
        while messages.len() < config.max_messages {
            while switches.next_if(|&at| at <= messages.len()).is_some() {
                receiver.switch_sides();
            }
            let Some(message) = receiver.get_update() else {
                break;
            };
            let game_over = message == Message::GameOver;
            messages.push(message);
            if game_over {
                break;
            }
        }
        drop(receiver);

        let state = match producer.join() {
            Ok(state) => state,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        let game_over = messages.last() == Some(&Message::GameOver);
        let summary = GameSummary::of(&state, game_over);
        info!(
            scenario = %bundle.start.name,
            messages = messages.len(),
            days = summary.days_elapsed,
            game_over,
            "run finished"
        );
        Ok(RunOutcome {
            transcript: Transcript::new(bundle.start.name.clone(), config.clone(), messages),
            summary,
            state,
        })
    }

    /// Re-run the inputs of `transcript` and return the index of the first
    /// message that differs, or `None` if the run reproduced it.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded variant does not exist.
    pub fn verify(bundle: &ScenarioBundle, transcript: &Transcript) -> Result<Option<usize>> {
        let outcome = Self::run(bundle, &transcript.config)?;
        if outcome.transcript.digest == transcript.digest {
            return Ok(None);
        }
        Ok(transcript
            .first_divergence(&outcome.transcript.messages)
            .or(Some(0)))
    }
}
