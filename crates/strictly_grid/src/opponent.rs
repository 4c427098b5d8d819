//! Computer players.

use crate::rules;
use crate::types::{Board, Mark, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Something that can pick the computer's next move.
pub trait Opponent: Send {
    /// Chooses an empty cell for `me` to play.
    ///
    /// Only called while the board has at least one empty cell. Returning
    /// `None`, an occupied cell or an off-board cell makes the engine fall
    /// back to the first empty cell.
    fn choose_move(&mut self, board: &Board, me: Mark, win_length: usize) -> Option<Position>;

    /// Display name for logs.
    fn name(&self) -> &str;
}

/// Why the heuristic picked a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Reason {
    /// Completes a line for the computer.
    Win,
    /// Occupies the cell that would complete the opponent's line.
    Block,
    /// Nothing urgent; picked at random.
    Random,
}

/// Win if possible, otherwise block, otherwise play a random empty cell.
#[derive(Debug)]
pub struct HeuristicOpponent {
    rng: StdRng,
}

impl HeuristicOpponent {
    /// Creates the opponent. A seed makes the random fallback reproducible.
    #[instrument]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Picks a move and reports why.
    pub fn decide(&mut self, board: &Board, me: Mark, win_length: usize) -> Option<(Position, Reason)> {
        if let Some(pos) = completing_cell(board, me, win_length) {
            return Some((pos, Reason::Win));
        }
        if let Some(pos) = completing_cell(board, me.opponent(), win_length) {
            return Some((pos, Reason::Block));
        }
        let empty: Vec<Position> = board.empty_positions().collect();
        empty.choose(&mut self.rng).map(|&pos| (pos, Reason::Random))
    }
}

impl Opponent for HeuristicOpponent {
    fn choose_move(&mut self, board: &Board, me: Mark, win_length: usize) -> Option<Position> {
        let (pos, reason) = self.decide(board, me, win_length)?;
        debug!(%pos, %reason, mark = %me, "Heuristic chose move");
        Some(pos)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// First empty cell in scan order where `mark` would complete a line.
///
/// Each candidate is tried on a scratch copy and reverted if it does not win.
pub fn completing_cell(board: &Board, mark: Mark, win_length: usize) -> Option<Position> {
    let mut scratch = board.clone();
    let candidates: Vec<Position> = board.empty_positions().collect();
    candidates.into_iter().find(|&pos| {
        scratch.place(pos, mark);
        let wins = rules::has_line(&scratch, mark, win_length);
        scratch.clear(pos);
        wins
    })
}
