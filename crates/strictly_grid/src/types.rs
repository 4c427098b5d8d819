//! Core domain types: marks, cells, positions and the board.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// The first mark (always moves first).
    X,
    /// The second mark.
    O,
}

impl Mark {
    /// The mark that opens every game.
    pub const FIRST: Mark = Mark::X;

    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl TryFrom<Cell> for Mark {
    type Error = ConfigError;

    #[track_caller]
    fn try_from(cell: Cell) -> Result<Self, Self::Error> {
        match cell {
            Cell::Occupied(mark) => Ok(mark),
            Cell::Empty => Err(ConfigError::new(
                "a player must control X or O, not an empty cell",
            )),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns true if no mark has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Occupied(mark) => Some(mark),
            Cell::Empty => None,
        }
    }
}

/// A `(column, row)` coordinate on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_new::new,
)]
pub struct Position {
    /// Column index, 0 is the leftmost column.
    pub col: usize,
    /// Row index, 0 is the top row.
    pub row: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A fixed-size grid of cells, stored row-major.
///
/// Callers only ever see snapshots; writes go through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if `(col, row)` lies on the board.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    /// Gets the cell at the given position, or `None` off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Checks if a position is on the board and unoccupied.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every position in scan order: rows top to bottom, columns left to right.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Position::new(col, row)))
    }

    /// Unoccupied positions in scan order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.is_empty(pos))
    }

    /// Places a mark. Callers check the cell is empty first.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = Cell::Occupied(mark);
        }
    }

    /// Clears a cell. Only used on scratch copies for provisional moves.
    pub(crate) fn clear(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = Cell::Empty;
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos.col, pos.row)
            .then(|| pos.row * self.width + pos.col)
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show as `.`, rows are separated by newlines.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = match self.cells[row * self.width + col] {
                    Cell::Empty => '.',
                    Cell::Occupied(Mark::X) => 'X',
                    Cell::Occupied(Mark::O) => 'O',
                };
                result.push(symbol);
                if col + 1 < self.width {
                    result.push(' ');
                }
            }
            if row + 1 < self.height {
                result.push('\n');
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 2);
        assert_eq!(board.cells().len(), 8);
        assert!(board.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new(3, 3);
        assert_eq!(board.get(Position::new(3, 0)), None);
        assert_eq!(board.get(Position::new(0, 3)), None);
        assert_eq!(board.get(Position::new(2, 2)), Some(Cell::Empty));
    }

    #[test]
    fn test_scan_order_is_row_major() {
        let board = Board::new(2, 2);
        let order: Vec<_> = board.positions().collect();
        assert_eq!(
            order,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_place_and_clear() {
        let mut board = Board::new(3, 2);
        let pos = Position::new(2, 1);
        board.place(pos, Mark::O);
        assert_eq!(board.get(pos), Some(Cell::Occupied(Mark::O)));
        assert_eq!(board.empty_positions().count(), 5);
        board.clear(pos);
        assert!(board.is_empty(pos));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 2);
        board.place(Position::new(0, 0), Mark::X);
        board.place(Position::new(2, 1), Mark::O);
        assert_eq!(board.display(), "X . .\n. . O");
    }

    #[test]
    fn test_mark_parsing() {
        assert_eq!("x".parse::<Mark>().ok(), Some(Mark::X));
        assert_eq!("O".parse::<Mark>().ok(), Some(Mark::O));
        assert!("empty".parse::<Mark>().is_err());
        assert_eq!(Mark::X.opponent(), Mark::O);
    }

    #[test]
    fn test_empty_cell_is_not_a_mark() {
        assert!(Mark::try_from(Cell::Empty).is_err());
        assert_eq!(Mark::try_from(Cell::Occupied(Mark::O)).ok(), Some(Mark::O));
    }
}
