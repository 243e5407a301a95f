//! Error types for decoding scenario records and persisted games.
//!
//! Logic errors inside the simulation (an invalid unit slot, a terrain code
//! outside the generic table, an out-of-range data offset) are not represented
//! here: they panic, since no caller could recover from them.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for fallible IO and decoding.
#[derive(Debug, Error)]
pub enum GameError {
    /// A fixed-size record was shorter than its layout requires.
    #[error("Too short {record} data: expected {expected} bytes, got {actual}")]
    ShortRecord {
        /// Kind of record being decoded.
        record: &'static str,
        /// Number of bytes required.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },

    /// A unit record referenced a type with no name in the scenario tables.
    #[error("Invalid unit type number: {0}")]
    InvalidUnitType(usize),

    /// A string list in the scenario data was malformed.
    #[error("Invalid scenario strings: {0}")]
    InvalidStrings(String),

    /// The number of city records in a saved game did not match the scenario.
    #[error("Mismatched number of cities, {found} vs {expected}")]
    CityCountMismatch {
        /// Count stored in the data.
        found: usize,
        /// Count expected by the scenario.
        expected: usize,
    },

    /// A scenario file prefix could not be mapped to a game.
    #[error("Cannot infer game from the file prefix: {0}")]
    UnknownGame(String),

    /// A referenced scenario variant does not exist.
    #[error("Invalid variant index {index}, scenario has {count} variants")]
    InvalidVariant {
        /// Requested variant.
        index: usize,
        /// Number of variants available.
        count: usize,
    },

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// A scenario bundle or transcript could not be encoded or decoded.
    #[error("Failed to {action} {what}: {message}")]
    Serialization {
        /// `encode` or `decode`.
        action: &'static str,
        /// Kind of document.
        what: &'static str,
        /// Underlying error.
        message: String,
    },

    /// Invalid game state.
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Convenience constructor for [`GameError::ShortRecord`].
    #[must_use]
    pub const fn short(record: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShortRecord {
            record,
            expected,
            actual,
        }
    }
}
