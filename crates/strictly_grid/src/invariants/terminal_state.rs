//! Terminal state invariant: turn and outcome agree with the board.

use super::Invariant;
use crate::outcome::Outcome;
use crate::rules;
use crate::state::GameState;
use crate::types::Mark;
use strum::IntoEnumIterator;

/// Invariant: the game is over exactly when the board says so.
///
/// - No turn if and only if there is an outcome.
/// - A running game has an empty cell and no completed line.
/// - A recorded winner owns a completed line.
pub struct TerminalStateInvariant;

impl Invariant<GameState> for TerminalStateInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let win_length = *state.win_length();

        match (state.turn(), state.outcome()) {
            (Some(_), None) => {
                !rules::is_full(board)
                    && Mark::iter().all(|mark| !rules::has_line(board, mark, win_length))
            }
            (None, Some(Outcome::Winner(mark))) => rules::has_line(board, *mark, win_length),
            (None, Some(Outcome::Draw)) => rules::is_full(board),
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Game is over exactly when a line exists or the board is full"
    }
}
