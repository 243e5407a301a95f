//! Error types for the command-line runner.

use cs_core::error::GameError;
use thiserror::Error;

/// Failure to load the inputs of a run.
#[derive(Error, Debug)]
pub enum BundleError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// The bundle could not be decoded.
    #[error("Failed to load scenario bundle: {0}")]
    Load(#[source] GameError),
    /// The requested variant does not exist.
    #[error("Scenario '{scenario}' has no variant {index} ({count} available)")]
    NoSuchVariant {
        /// Scenario name.
        scenario: String,
        /// Requested variant.
        index: usize,
        /// Number of variants.
        count: usize,
    },
    /// Failed to read an options file.
    #[error("Failed to read options file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse an options file.
    #[error("Failed to parse options: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Game balance outside 0..=4.
    #[error("Game balance must be between 0 and 4, got {0}")]
    InvalidBalance(i32),
}

/// Failure of a command.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The inputs could not be loaded.
    #[error(transparent)]
    Bundle(#[from] BundleError),
    /// The engine refused the run.
    #[error("Game error: {0}")]
    Game(#[from] GameError),
    /// A transcript could not be read or written.
    #[error("Transcript '{path}': {source}")]
    Transcript {
        /// Transcript path.
        path: String,
        /// Underlying error.
        #[source]
        source: GameError,
    },
    /// A transcript was recorded on another scenario.
    #[error("Transcript was recorded on '{transcript}', bundle is '{bundle}'")]
    ScenarioMismatch {
        /// Scenario named by the transcript.
        transcript: String,
        /// Scenario of the bundle.
        bundle: String,
    },
    /// A batch thread pool could not be built.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// JSON output failed.
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
