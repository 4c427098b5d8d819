//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::Invariant;
use crate::state::GameState;
use crate::types::Mark;

/// Invariant: Marks alternate turns.
///
/// Move history must show X, O, X, O, ... pattern and, while the game is
/// running, the mark to move must be the one after the last move.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();

        if history.first().is_some_and(|first| first.mark != Mark::FIRST) {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        match state.turn() {
            None => true,
            Some(turn) => {
                let expected = history
                    .last()
                    .map_or(Mark::FIRST, |last| last.mark.opponent());
                *turn == expected
            }
        }
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}
