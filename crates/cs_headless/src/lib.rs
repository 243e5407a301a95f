//! Headless runner for Command Series scenarios.
//!
//! Drives the engine from a scenario bundle without any display. This
//! enables:
//!
//! - **Balance testing**: Play many seeded games in parallel
//! - **CI verification**: Check that a seeded game always produces the same messages
//! - **Replay verification**: Check that a recorded transcript still reproduces
//!
//! # Output
//!
//! - **stdout**: Reports and message streams (JSON)
//! - **stderr**: Logs (human-readable)
//!
//! # Example
//!
//! ```bash
//! # Play one game and record it
//! cargo run -p cs_headless -- run scenarios/arnhem.ron --seed 7 --transcript arnhem.cst
//!
//! # Check the recording still reproduces
//! cargo run -p cs_headless -- replay arnhem.cst --bundle scenarios/arnhem.ron
//! ```

pub mod batch;
pub mod commands;
pub mod error;
pub mod scenario;

pub use batch::{run_batch, BatchConfig, BatchResults, BatchSummary};
pub use commands::{replay, run, verify, ReplayReport, RunReport, VerifyReport};
pub use error::{BundleError, RunnerError};
pub use scenario::{load_bundle, load_options, BundleInfo, TranscriptInfo};
