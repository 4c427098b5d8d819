//! Game rules.
//!
//! Pure functions over a [`Board`]; the engine decides when to call them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Direction, check_winner, has_line};

use crate::outcome::Outcome;
use crate::types::{Board, Mark};
use tracing::instrument;

/// Decides whether the game is over after `mover` played.
///
/// A win always takes precedence over a full board.
#[instrument(skip(board), fields(width = board.width(), height = board.height()))]
pub fn evaluate(board: &Board, mover: Mark, win_length: usize) -> Option<Outcome> {
    if let Some(winner) = check_winner(board, mover, win_length) {
        return Some(Outcome::Winner(winner));
    }
    is_full(board).then_some(Outcome::Draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn test_in_progress() {
        let mut board = Board::new(3, 3);
        board.place(Position::new(0, 0), Mark::X);
        assert_eq!(evaluate(&board, Mark::X, 3), None);
    }

    #[test]
    fn test_single_cell_board() {
        let mut board = Board::new(1, 1);
        board.place(Position::new(0, 0), Mark::X);
        assert_eq!(evaluate(&board, Mark::X, 1), Some(Outcome::Winner(Mark::X)));
        assert_eq!(evaluate(&board, Mark::X, 2), Some(Outcome::Draw));
    }
}
