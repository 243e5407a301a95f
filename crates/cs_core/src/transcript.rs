//! Transcripts of played games.
//!
//! A transcript stores the inputs of a run (scenario, variant, seed,
//! options and the points where the host switched sides) together with
//! every message the simulation produced. Since the engine is deterministic,
//! replaying the inputs must reproduce the same messages, which is checked
//! through [`Transcript::digest`].

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::error::{GameError, Result};
use crate::messages::Message;
use crate::options::Options;
use crate::rng::Generator;

/// Transcript file format version.
pub const TRANSCRIPT_VERSION: u32 = 2;

/// Inputs that fully determine a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Variant index.
    pub variant: usize,
    /// Seed of the random stream.
    pub seed: u64,
    /// Generator the seed feeds.
    #[serde(default)]
    pub generator: Generator,
    /// Pre-game options.
    pub options: Options,
    /// Message count after which to stop if the game is not over yet.
    pub max_messages: usize,
    /// Switch sides before pulling the message with each of these indices.
    pub side_switches: Vec<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            variant: 0,
            seed: 0,
            generator: Generator::Go,
            options: Options::computer_vs_computer(),
            max_messages: 1_000_000,
            side_switches: Vec::new(),
        }
    }
}

/// A recorded run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Format version.
    pub version: u32,
    /// Name of the scenario played.
    pub scenario: String,
    /// Inputs of the run.
    pub config: RunConfig,
    /// Messages in the order they were produced.
    pub messages: Vec<Message>,
    /// Digest of `messages`.
    pub digest: u64,
}

/// Digest of a message sequence. Equal sequences give equal digests.
#[must_use]
pub fn digest_messages(messages: &[Message]) -> u64 {
    let mut hasher = DefaultHasher::new();
    messages.len().hash(&mut hasher);
    for message in messages {
        // Messages encode to a canonical byte form; hash that.
        match bincode::serialize(message) {
            Ok(bytes) => bytes.hash(&mut hasher),
            Err(_) => message.kind().hash(&mut hasher),
        }
    }
    hasher.finish()
}

impl Transcript {
    /// Record `messages` produced by `config` on `scenario`.
    #[must_use]
    pub fn new(scenario: impl Into<String>, config: RunConfig, messages: Vec<Message>) -> Self {
        let digest = digest_messages(&messages);
        Self {
            version: TRANSCRIPT_VERSION,
            scenario: scenario.into(),
            config,
            messages,
            digest,
        }
    }

    /// Whether the run reached the end of the game.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.messages.last() == Some(&Message::GameOver)
    }

    /// Index of the first message that differs from `other`, if any.
    #[must_use]
    pub fn first_divergence(&self, other: &[Message]) -> Option<usize> {
        let common = self.messages.len().min(other.len());
        (0..common)
            .find(|&i| self.messages[i] != other[i])
            .or_else(|| (self.messages.len() != other.len()).then_some(common))
    }

    /// Count of each message kind, sorted by kind.
    #[must_use]
    pub fn kind_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for message in &self.messages {
            let kind = message.kind();
            match counts.binary_search_by(|(k, _)| k.cmp(&kind)) {
                Ok(i) => counts[i].1 += 1,
                Err(i) => counts.insert(i, (kind, 1)),
            }
        }
        counts
    }

    /// Save the transcript to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)
            .map_err(|e| GameError::InvalidState(format!("Failed to serialize transcript: {e}")))?;
        std::fs::write(path.as_ref(), bytes)
            .map_err(|e| GameError::InvalidState(format!("Failed to write transcript file: {e}")))?;
        Ok(())
    }

    /// Load a transcript from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the data is malformed, the
    /// version differs or the digest does not match the messages.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| GameError::InvalidState(format!("Failed to read transcript file: {e}")))?;
        let transcript: Self = bincode::deserialize(&bytes)
            .map_err(|e| GameError::InvalidState(format!("Failed to deserialize transcript: {e}")))?;

        if transcript.version != TRANSCRIPT_VERSION {
            return Err(GameError::InvalidState(format!(
                "Transcript version mismatch: expected {TRANSCRIPT_VERSION}, got {}",
                transcript.version
            )));
        }
        if digest_messages(&transcript.messages) != transcript.digest {
            return Err(GameError::InvalidState("Transcript digest does not match its messages".into()));
        }

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<Message> {
        vec![
            Message::Initialized,
            Message::Empty,
            Message::TimeChanged,
            Message::Empty,
            Message::GameOver,
        ]
    }

    #[test]
    fn test_digest_depends_on_order() {
        let a = messages();
        let mut b = messages();
        b.swap(1, 2);
        assert_eq!(digest_messages(&a), digest_messages(&messages()));
        assert_ne!(digest_messages(&a), digest_messages(&b));
    }

    #[test]
    fn test_kind_counts_and_completion() {
        let transcript = Transcript::new("TEST", RunConfig::default(), messages());
        assert!(transcript.is_complete());
        assert_eq!(
            transcript.kind_counts(),
            vec![("Empty", 2), ("GameOver", 1), ("Initialized", 1), ("TimeChanged", 1)]
        );
    }

    #[test]
    fn test_first_divergence() {
        let transcript = Transcript::new("TEST", RunConfig::default(), messages());
        assert_eq!(transcript.first_divergence(&messages()), None);
        let mut other = messages();
        other[3] = Message::TimeChanged;
        assert_eq!(transcript.first_divergence(&other), Some(3));
        assert_eq!(transcript.first_divergence(&messages()[..2]), Some(2));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.transcript");
        let transcript = Transcript::new("TEST", RunConfig::default(), messages());
        transcript.save(&path).unwrap();
        assert_eq!(Transcript::load(&path).unwrap(), transcript);
    }

    #[test]
    fn test_load_rejects_tampered_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.transcript");
        let mut transcript = Transcript::new("TEST", RunConfig::default(), messages());
        transcript.messages.pop();
        transcript.save(&path).unwrap();
        assert!(Transcript::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.transcript");
        let mut transcript = Transcript::new("TEST", RunConfig::default(), messages());
        transcript.version = TRANSCRIPT_VERSION + 1;
        transcript.save(&path).unwrap();
        let err = Transcript::load(&path).unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
    }
}
