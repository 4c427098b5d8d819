//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::state::GameState;
use crate::types::Board;

/// Invariant: Board cells are monotonic (never overwritten).
///
/// Once a cell transitions from Empty to Occupied, it never changes.
/// This is verified by replaying the move history and comparing.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let mut reconstructed = Board::new(board.width(), board.height());

        for mov in state.history() {
            // Cell must be on the board and empty before placing
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.place(mov.position, mov.mark);
        }

        reconstructed == *board
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
