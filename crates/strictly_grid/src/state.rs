//! Snapshot of a game's mutable state.

use crate::action::Move;
use crate::outcome::Outcome;
use crate::types::{Board, Mark, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Complete state of one game.
///
/// The engine owns the live copy; callers get clones through
/// [`Game::snapshot`](crate::Game::snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Cells in a row needed to win.
    win_length: usize,
    /// Mark played by the human.
    human: Mark,
    /// Whose move is accepted next; `None` once the game is over.
    turn: Option<Mark>,
    /// Set exactly when `turn` becomes `None`.
    outcome: Option<Outcome>,
    /// Applied moves, oldest first.
    history: Vec<Move>,
}

impl GameState {
    /// Fresh state: empty board, first mark to move.
    pub(crate) fn new(width: usize, height: usize, win_length: usize, human: Mark) -> Self {
        Self {
            board: Board::new(width, height),
            win_length,
            human,
            turn: Some(Mark::FIRST),
            outcome: None,
            history: Vec::new(),
        }
    }

    /// Mark played by the computer.
    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.turn.is_none()
    }

    /// Places a mark and records it. Caller checks the cell is empty.
    pub(crate) fn apply(&mut self, pos: Position, mark: Mark) {
        self.board.place(pos, mark);
        self.history.push(Move::new(mark, pos));
    }

    /// Hands the turn to `mark`.
    pub(crate) fn pass_turn(&mut self, mark: Mark) {
        if self.outcome.is_none() {
            self.turn = Some(mark);
        }
    }

    /// Ends the game. Terminal: later calls are ignored.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.turn = None;
            self.outcome = Some(outcome);
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_turn(&mut self, turn: Option<Mark>) {
        self.turn = turn;
    }
}
