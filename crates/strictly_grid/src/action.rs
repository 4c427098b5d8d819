//! Applied moves and submission results.

use crate::types::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A mark placed at a position.
///
/// The engine records every applied move in order; the history backs the
/// debug-build invariant checks and lets a display replay the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// What happened to a human move submission.
///
/// Only [`Submission::Applied`] changes the game; the other variants are
/// benign input races (double clicks, clicks after the game ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Submission {
    /// The mark was placed (and the computer replied unless the game ended).
    #[display("applied")]
    Applied,
    /// The game has already finished.
    #[display("game is over")]
    GameOver,
    /// It is the computer's turn.
    #[display("not your turn")]
    NotYourTurn,
    /// The cell already holds a mark.
    #[display("cell is occupied")]
    Occupied,
}

impl Submission {
    /// Returns true if the move changed the board.
    pub fn is_applied(self) -> bool {
        matches!(self, Submission::Applied)
    }
}
