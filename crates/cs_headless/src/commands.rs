//! The runner's commands, one function per subcommand.
//!
//! Every command returns a serializable report; the binary prints it as JSON.

use std::io::Write;
use std::path::Path;

use cs_core::bundle::ScenarioBundle;
use cs_core::messages::Message;
use cs_core::runner::{GameRunner, GameSummary};
use cs_core::transcript::{RunConfig, Transcript};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::RunnerError;
use crate::scenario::{check_balance, check_variant};

/// Result of `run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Scenario played.
    pub scenario: String,
    /// Variant played.
    pub variant: String,
    /// Seed of the random stream.
    pub seed: u64,
    /// Messages produced.
    pub messages: usize,
    /// Transcript digest.
    pub digest: u64,
    /// Final standing.
    pub summary: GameSummary,
    /// Where the transcript was written, if anywhere.
    pub transcript: Option<String>,
}

/// Play one game and optionally record its transcript.
///
/// # Errors
///
/// Returns an error for a bad variant or balance, or if the transcript
/// cannot be written.
pub fn run(bundle: &ScenarioBundle, config: &RunConfig, transcript_path: Option<&Path>) -> Result<RunReport, RunnerError> {
    check_variant(bundle, config.variant)?;
    check_balance(config.options.game_balance)?;
    let outcome = GameRunner::run(bundle, config)?;
    if let Some(path) = transcript_path {
        outcome.transcript.save(path).map_err(|source| RunnerError::Transcript {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "transcript written");
    }
    Ok(RunReport {
        scenario: bundle.start.name.clone(),
        variant: outcome.state.variant().name.clone(),
        seed: config.seed,
        messages: outcome.transcript.messages.len(),
        digest: outcome.transcript.digest,
        summary: outcome.summary,
        transcript: transcript_path.map(|p| p.display().to_string()),
    })
}

/// Result of `verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Scenario played.
    pub scenario: String,
    /// Seed of the random stream.
    pub seed: u64,
    /// Digest of every run.
    pub digests: Vec<u64>,
    /// Whether all runs produced the same messages.
    pub deterministic: bool,
    /// First run that differed from the first, and where.
    pub first_divergence: Option<Divergence>,
}

/// Where two runs parted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Divergence {
    /// Run that differed.
    pub run: usize,
    /// Index of the first differing message.
    pub message: usize,
}

/// Play the same seeded game `runs` times and compare the message streams.
///
/// # Errors
///
/// Returns an error for a bad variant or balance.
pub fn verify(bundle: &ScenarioBundle, config: &RunConfig, runs: usize) -> Result<VerifyReport, RunnerError> {
    check_variant(bundle, config.variant)?;
    check_balance(config.options.game_balance)?;
    let mut reference: Option<Transcript> = None;
    let mut digests = Vec::with_capacity(runs);
    let mut first_divergence = None;
    for run in 0..runs {
        let transcript = GameRunner::run(bundle, config)?.transcript;
        digests.push(transcript.digest);
        match &reference {
            None => reference = Some(transcript),
            Some(first) => {
                if first_divergence.is_none() {
                    first_divergence = first
                        .first_divergence(&transcript.messages)
                        .map(|message| Divergence { run, message });
                }
            }
        }
    }
    let deterministic = first_divergence.is_none();
    if !deterministic {
        warn!(seed = config.seed, divergence = ?first_divergence, "runs diverged");
    }
    Ok(VerifyReport {
        scenario: bundle.start.name.clone(),
        seed: config.seed,
        digests,
        deterministic,
        first_divergence,
    })
}

/// One line of `replay` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayLine<'a> {
    /// Position in the transcript.
    pub index: usize,
    /// Message kind.
    pub kind: &'static str,
    /// The message.
    pub message: &'a Message,
}

/// Result of `replay` against a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Scenario of the transcript.
    pub scenario: String,
    /// Messages recorded.
    pub messages: usize,
    /// Whether re-running the inputs gave the same messages.
    pub reproduced: bool,
    /// Index of the first differing message.
    pub first_divergence: Option<usize>,
}

/// Load a transcript.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed or tampered with.
pub fn load_transcript(path: &Path) -> Result<Transcript, RunnerError> {
    Transcript::load(path).map_err(|source| RunnerError::Transcript {
        path: path.display().to_string(),
        source,
    })
}

/// Write the messages of `transcript` as JSON lines, optionally keeping only
/// `kinds`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_messages<W: Write>(transcript: &Transcript, kinds: &[String], out: &mut W) -> Result<usize, RunnerError> {
    let mut written = 0;
    for (index, message) in transcript.messages.iter().enumerate() {
        let kind = message.kind();
        if !kinds.is_empty() && !kinds.iter().any(|k| k == kind) {
            continue;
        }
        serde_json::to_writer(&mut *out, &ReplayLine { index, kind, message })?;
        writeln!(out)?;
        written += 1;
    }
    Ok(written)
}

/// Re-run the inputs recorded in `transcript` on `bundle`.
///
/// # Errors
///
/// Returns an error if the transcript was recorded on another scenario or
/// its variant does not exist.
pub fn replay(bundle: &ScenarioBundle, transcript: &Transcript) -> Result<ReplayReport, RunnerError> {
    if transcript.scenario != bundle.start.name {
        return Err(RunnerError::ScenarioMismatch {
            transcript: transcript.scenario.clone(),
            bundle: bundle.start.name.clone(),
        });
    }
    check_variant(bundle, transcript.config.variant)?;
    let first_divergence = GameRunner::verify(bundle, transcript)?;
    if let Some(index) = first_divergence {
        warn!(index, "replay diverged");
    }
    Ok(ReplayReport {
        scenario: transcript.scenario.clone(),
        messages: transcript.messages.len(),
        reproduced: first_divergence.is_none(),
        first_divergence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BundleError;
    use cs_test_utils::fixtures::{synthetic_bundle, ScenarioBuilder};

    fn config(seed: u64) -> RunConfig {
        RunConfig {
            seed,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_run_writes_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.cst");
        let bundle = synthetic_bundle();
        let report = run(&bundle, &config(3), Some(&path)).unwrap();
        assert_eq!(report.variant, "MEETING ENGAGEMENT");
        assert!(report.summary.game_over);

        let transcript = load_transcript(&path).unwrap();
        assert_eq!(transcript.digest, report.digest);
        assert_eq!(transcript.messages.len(), report.messages);
    }

    #[test]
    fn test_run_rejects_bad_inputs() {
        let bundle = synthetic_bundle();
        let bad_variant = RunConfig {
            variant: 5,
            ..config(1)
        };
        assert!(matches!(
            run(&bundle, &bad_variant, None),
            Err(RunnerError::Bundle(BundleError::NoSuchVariant { .. }))
        ));
        let mut bad_balance = config(1);
        bad_balance.options.game_balance = 7;
        assert!(matches!(
            run(&bundle, &bad_balance, None),
            Err(RunnerError::Bundle(BundleError::InvalidBalance(7)))
        ));
    }

    #[test]
    fn test_verify_is_deterministic() {
        let report = verify(&synthetic_bundle(), &config(11), 3).unwrap();
        assert!(report.deterministic);
        assert_eq!(report.digests.len(), 3);
        assert!(report.digests.iter().all(|&d| d == report.digests[0]));
    }

    #[test]
    fn test_replay_reproduces_run() {
        let bundle = synthetic_bundle();
        let transcript = GameRunner::run(&bundle, &config(4)).unwrap().transcript;
        let report = replay(&bundle, &transcript).unwrap();
        assert!(report.reproduced);
        assert_eq!(report.first_divergence, None);
    }

    #[test]
    fn test_replay_detects_other_inputs() {
        let bundle = synthetic_bundle();
        let mut transcript = GameRunner::run(&bundle, &config(4)).unwrap().transcript;
        transcript.config.seed = 5;
        let report = replay(&bundle, &transcript).unwrap();
        assert!(!report.reproduced);
        assert!(report.first_divergence.is_some());
    }

    #[test]
    fn test_replay_rejects_other_scenario() {
        let bundle = synthetic_bundle();
        let transcript = GameRunner::run(&bundle, &config(4)).unwrap().transcript;
        let mut other = ScenarioBuilder::new().build();
        other.start.name = "ELSEWHERE".into();
        assert!(matches!(
            replay(&other, &transcript),
            Err(RunnerError::ScenarioMismatch { .. })
        ));
    }

    #[test]
    fn test_write_messages_filters_kinds() {
        let transcript = Transcript::new(
            "TEST",
            RunConfig::default(),
            vec![
                Message::Initialized,
                Message::TimeChanged,
                Message::WeatherForecast { weather: 1 },
                Message::TimeChanged,
                Message::GameOver,
            ],
        );
        let mut out = Vec::new();
        let written = write_messages(&transcript, &["TimeChanged".to_string()], &mut out).unwrap();
        assert_eq!(written, 2);
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["index"], 1);
        assert_eq!(lines[1]["index"], 3);
        assert_eq!(lines[1]["kind"], "TimeChanged");

        let mut all = Vec::new();
        assert_eq!(write_messages(&transcript, &[], &mut all).unwrap(), 5);
    }
}
