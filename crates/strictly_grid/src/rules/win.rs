//! Win detection for arbitrary board sizes and win-lengths.

use crate::types::{Board, Cell, Mark, Position};
use strum::IntoEnumIterator;

/// A direction a line can run in, as a `(dcol, drow)` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    DiagonalDown,
    /// Bottom-left to top-right.
    DiagonalUp,
}

impl Direction {
    /// Column and row step for one cell along this direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (1, -1),
        }
    }
}

/// Checks whether `len` cells starting at `start` along `dir` all hold `mark`.
///
/// Stops at the first cell that is off the board or does not match.
pub fn line_from(board: &Board, start: Position, dir: Direction, len: usize, mark: Mark) -> bool {
    let (dcol, drow) = dir.step();
    let target = Some(Cell::Occupied(mark));
    (0..len).all(|i| {
        let Ok(i) = isize::try_from(i) else {
            return false;
        };
        let col = start.col.checked_add_signed(dcol * i);
        let row = start.row.checked_add_signed(drow * i);
        match (col, row) {
            (Some(col), Some(row)) => board.get(Position::new(col, row)) == target,
            _ => false,
        }
    })
}

/// Returns true if `mark` has `win_length` in a row anywhere on the board.
pub fn has_line(board: &Board, mark: Mark, win_length: usize) -> bool {
    board.positions().any(|start| {
        Direction::iter().any(|dir| line_from(board, start, dir, win_length, mark))
    })
}

/// Returns the mark that owns a winning line, checking `first` before its opponent.
pub fn check_winner(board: &Board, first: Mark, win_length: usize) -> Option<Mark> {
    [first, first.opponent()]
        .into_iter()
        .find(|&mark| has_line(board, mark, win_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(width: usize, height: usize, marks: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new(width, height);
        for &(col, row, mark) in marks {
            board.place(Position::new(col, row), mark);
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(3, 3);
        assert_eq!(check_winner(&board, Mark::X, 3), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(3, 3, &[(0, 0, Mark::X), (1, 0, Mark::X), (2, 0, Mark::X)]);
        assert!(has_line(&board, Mark::X, 3));
        assert!(!has_line(&board, Mark::O, 3));
    }

    #[test]
    fn test_winner_column() {
        let board = board_with(3, 4, &[(2, 1, Mark::O), (2, 2, Mark::O), (2, 3, Mark::O)]);
        assert_eq!(check_winner(&board, Mark::X, 3), Some(Mark::O));
    }

    #[test]
    fn test_winner_diagonal_down() {
        let board = board_with(3, 3, &[(0, 0, Mark::O), (1, 1, Mark::O), (2, 2, Mark::O)]);
        assert_eq!(check_winner(&board, Mark::O, 3), Some(Mark::O));
    }

    #[test]
    fn test_winner_diagonal_up() {
        let board = board_with(3, 3, &[(0, 2, Mark::X), (1, 1, Mark::X), (2, 0, Mark::X)]);
        assert_eq!(check_winner(&board, Mark::O, 3), Some(Mark::X));
    }

    #[test]
    fn test_line_away_from_origin() {
        // Four in a row in the middle of a wide board.
        let board = board_with(
            8,
            5,
            &[(3, 3, Mark::X), (4, 3, Mark::X), (5, 3, Mark::X), (6, 3, Mark::X)],
        );
        assert!(has_line(&board, Mark::X, 4));
        assert!(!has_line(&board, Mark::X, 5));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(3, 3, &[(0, 0, Mark::X), (1, 0, Mark::X), (2, 0, Mark::O)]);
        assert_eq!(check_winner(&board, Mark::X, 3), None);
    }

    #[test]
    fn test_line_does_not_wrap_rows() {
        // (2,0) followed by (0,1) is adjacent in storage but not on the board.
        let board = board_with(3, 3, &[(1, 0, Mark::X), (2, 0, Mark::X), (0, 1, Mark::X)]);
        assert!(!has_line(&board, Mark::X, 3));
    }

    #[test]
    fn test_win_length_longer_than_board() {
        let board = board_with(3, 3, &[(0, 0, Mark::X), (1, 0, Mark::X), (2, 0, Mark::X)]);
        assert!(!has_line(&board, Mark::X, 5));
    }

    #[test]
    fn test_win_length_one() {
        let board = board_with(2, 2, &[(1, 1, Mark::O)]);
        assert!(has_line(&board, Mark::O, 1));
        assert!(!has_line(&board, Mark::X, 1));
    }
}
