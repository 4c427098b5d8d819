//! Error types for the engine.

use derive_more::{Display, Error};
use tracing::instrument;

/// Invalid or unreadable game configuration, tagged with where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors returned by the engine.
///
/// Ignored submissions (wrong turn, occupied cell, finished game) are not
/// errors; see [`Submission`](crate::Submission).
#[derive(Debug, Clone, Display, Error)]
pub enum GameError {
    /// The game could not be built from its configuration.
    #[display("{_0}")]
    Config(ConfigError),

    /// Coordinates fall outside the board.
    #[display("Cell ({col}, {row}) is outside the {width}x{height} board")]
    OutOfRange {
        /// Requested column.
        col: usize,
        /// Requested row.
        row: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}
