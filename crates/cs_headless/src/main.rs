//! Headless Command Series runner.
//!
//! Plays scenarios without a display and reports as JSON on stdout.
//! Designed for balance sweeps, CI determinism checks and replay
//! verification.
//!
//! # Usage
//!
//! ```bash
//! # Play one game, computer against computer
//! cargo run -p cs_headless -- run scenarios/arnhem.ron --seed 7 --transcript arnhem.cst
//!
//! # Check a seed plays the same three times
//! cargo run -p cs_headless -- verify scenarios/arnhem.ron --seed 7 --runs 3
//!
//! # Balance sweep over 200 seeds
//! cargo run -p cs_headless -- batch scenarios/arnhem.ron --count 200 --output results/
//!
//! # Dump a transcript, or re-run it against its scenario
//! cargo run -p cs_headless -- replay arnhem.cst --kind WeAreAttacking
//! cargo run -p cs_headless -- replay arnhem.cst --bundle scenarios/arnhem.ron
//!
//! # Describe a bundle or transcript
//! cargo run -p cs_headless -- inspect bundle scenarios/arnhem.ron
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cs_core::options::{Intelligence, Options};
use cs_core::rng::Generator;
use cs_core::transcript::RunConfig;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cs_headless::{
    batch::{run_batch, BatchConfig},
    commands,
    error::RunnerError,
    scenario::{load_bundle, load_options, BundleInfo, TranscriptInfo},
};

#[derive(Parser)]
#[command(name = "cs_headless")]
#[command(about = "Headless Command Series runner for balance testing and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Run {
        /// Scenario bundle (.ron or bincode)
        bundle: PathBuf,

        #[command(flatten)]
        game: GameArgs,

        /// Swap the commanders before this message index (repeatable)
        #[arg(long = "switch-at")]
        switch_at: Vec<usize>,

        /// Write the transcript to this file
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },

    /// Play the same seed several times and compare the message streams
    Verify {
        /// Scenario bundle
        bundle: PathBuf,

        #[command(flatten)]
        game: GameArgs,

        /// Number of runs to compare
        #[arg(short, long, default_value = "3")]
        runs: usize,
    },

    /// Run many seeded games in parallel
    Batch {
        /// Scenario bundle
        bundle: PathBuf,

        #[command(flatten)]
        game: GameArgs,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Maximum parallel games (0 = all cores)
        #[arg(short, long, default_value = "0")]
        parallel: u32,

        /// Directory for batch_results.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a transcript's messages, or re-run it against its scenario
    Replay {
        /// Transcript file
        transcript: PathBuf,

        /// Re-run the recorded inputs on this bundle and compare
        #[arg(short, long)]
        bundle: Option<PathBuf>,

        /// Only print messages of this kind (repeatable)
        #[arg(short, long)]
        kind: Vec<String>,
    },

    /// Describe a scenario bundle or a transcript
    Inspect {
        #[command(subcommand)]
        target: InspectTarget,
    },
}

#[derive(Subcommand)]
enum InspectTarget {
    /// Scenario bundle summary
    Bundle {
        /// Scenario bundle
        path: PathBuf,

        /// Also write the bundle to this file (.ron or bincode)
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Transcript summary
    Transcript {
        /// Transcript file
        path: PathBuf,
    },
}

/// Options shared by the commands that play games.
#[derive(Args)]
struct GameArgs {
    /// Variant index
    #[arg(long, default_value = "0")]
    variant: usize,

    /// Seed of the random stream (first seed for batches)
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Draw from ChaCha8 instead of the Go-compatible stream
    #[arg(long)]
    chacha: bool,

    /// Game balance, 0..=4; higher favours side 0
    #[arg(long)]
    balance: Option<i32>,

    /// Let both commanders see every enemy unit
    #[arg(long)]
    full_intelligence: bool,

    /// RON file with the full options; flags above override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// Stop after this many messages
    #[arg(long, default_value = "1000000")]
    max_messages: usize,
}

impl GameArgs {
    fn run_config(&self) -> Result<RunConfig, RunnerError> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => Options::computer_vs_computer(),
        };
        if let Some(balance) = self.balance {
            options.game_balance = balance;
        }
        if self.full_intelligence {
            options.intelligence = Intelligence::Full;
        }
        Ok(RunConfig {
            variant: self.variant,
            seed: self.seed,
            generator: if self.chacha { Generator::ChaCha } else { Generator::Go },
            options,
            max_messages: self.max_messages,
            side_switches: Vec::new(),
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for reports)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match dispatch(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run a command. `Ok(false)` means it ran but found a mismatch.
fn dispatch(command: Commands) -> Result<bool, RunnerError> {
    match command {
        Commands::Run {
            bundle,
            game,
            switch_at,
            transcript,
        } => {
            let bundle = load_bundle(&bundle)?;
            let mut config = game.run_config()?;
            config.side_switches = switch_at;
            config.side_switches.sort_unstable();
            let report = commands::run(&bundle, &config, transcript.as_deref())?;
            print_json(&report)?;
            Ok(true)
        }
        Commands::Verify { bundle, game, runs } => {
            let bundle = load_bundle(&bundle)?;
            let report = commands::verify(&bundle, &game.run_config()?, runs.max(2))?;
            print_json(&report)?;
            Ok(report.deterministic)
        }
        Commands::Batch {
            bundle,
            game,
            count,
            parallel,
            output,
        } => cmd_batch(&bundle, &game, count, parallel, output.as_deref()),
        Commands::Replay {
            transcript,
            bundle,
            kind,
        } => {
            let transcript = commands::load_transcript(&transcript)?;
            match bundle {
                Some(path) => {
                    let report = commands::replay(&load_bundle(&path)?, &transcript)?;
                    print_json(&report)?;
                    Ok(report.reproduced)
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut out = stdout.lock();
                    let written = commands::write_messages(&transcript, &kind, &mut out)?;
                    out.flush()?;
                    tracing::debug!(written, "messages printed");
                    Ok(true)
                }
            }
        }
        Commands::Inspect { target } => {
            match target {
                InspectTarget::Bundle { path, export } => {
                    let bundle = load_bundle(&path)?;
                    if let Some(export) = export {
                        bundle.save(&export)?;
                        tracing::info!(path = %export.display(), "bundle exported");
                    }
                    print_json(&BundleInfo::of(&bundle))?;
                }
                InspectTarget::Transcript { path } => {
                    print_json(&TranscriptInfo::of(&commands::load_transcript(&path)?))?;
                }
            }
            Ok(true)
        }
    }
}

/// Run a batch of games for balance testing.
fn cmd_batch(
    bundle_path: &Path,
    game: &GameArgs,
    count: u32,
    parallel: u32,
    output: Option<&Path>,
) -> Result<bool, RunnerError> {
    let bundle = load_bundle(bundle_path)?;
    let run = game.run_config()?;
    cs_headless::scenario::check_variant(&bundle, run.variant)?;
    cs_headless::scenario::check_balance(run.options.game_balance)?;

    let num_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        scenario = %bundle.start.name,
        count,
        parallel,
        seed = run.seed,
        cpus_available = num_cpus,
        "Batch configuration"
    );

    let config = BatchConfig {
        variant: run.variant,
        game_count: count,
        seed_start: run.seed,
        generator: run.generator,
        parallel_games: parallel,
        options: run.options,
        max_messages: run.max_messages,
    };
    let results = run_batch(&bundle, config)?;

    if let Some(dir) = output {
        let path = dir.join("batch_results.json");
        results.save(&path)?;
        tracing::info!(path = %path.display(), "results saved");
    }

    eprintln!("\n{}", "=".repeat(50));
    eprintln!("BATCH COMPLETE");
    eprintln!("{}", "=".repeat(50));
    eprintln!("Games played: {}", results.games.len());
    if !results.errors.is_empty() {
        eprintln!("Games failed: {}", results.errors.len());
    }
    for side in 0..2 {
        eprintln!(
            "Side {side} ahead: {:.1}%",
            results.summary.win_rate(side) * 100.0
        );
    }
    eprintln!("Unfinished: {}", results.summary.unfinished);

    print_json(&results.summary)?;
    Ok(results.errors.is_empty())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), RunnerError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
