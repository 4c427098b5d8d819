//! The game engine: one human against the computer.
//!
//! A [`Game`] is a cheap, cloneable handle. Board, turn and opponent sit
//! behind one mutex and the listener registry behind another; listeners are
//! called only after the state lock is released, so a callback may query the
//! game it is observing.

use crate::action::{Move, Submission};
use crate::config::GameConfig;
use crate::dispatch::Dispatcher;
use crate::error::GameError;
use crate::events::{CellChanged, EventKind, GameEvent, GameOver, ListenerId, Listeners};
use crate::invariants::{GridInvariants, InvariantSet};
use crate::opponent::{HeuristicOpponent, Opponent};
use crate::outcome::Outcome;
use crate::rules;
use crate::state::GameState;
use crate::types::{Board, Cell, Mark, Position};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, error, info, instrument, warn};

/// A single game from empty board to win or draw.
///
/// There is no reset; start a new game with a new instance.
#[derive(Clone)]
pub struct Game {
    shared: Arc<Shared>,
}

struct Shared {
    config: GameConfig,
    engine: Mutex<Engine>,
    listeners: Mutex<Listeners>,
}

struct Engine {
    state: GameState,
    opponent: Box<dyn Opponent>,
}

impl Game {
    /// Starts a game against the built-in heuristic opponent.
    ///
    /// If the computer plays the first mark, its opening move is posted to
    /// `dispatcher` and runs when the matching event loop is pumped.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    #[instrument(skip(dispatcher))]
    pub fn new(config: GameConfig, dispatcher: &Dispatcher) -> Result<Self, GameError> {
        let opponent = HeuristicOpponent::new(*config.seed());
        Self::with_opponent(config, dispatcher, Box::new(opponent))
    }

    /// Starts a game against a custom opponent.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    #[instrument(skip(dispatcher, opponent), fields(opponent = opponent.name()))]
    pub fn with_opponent(
        config: GameConfig,
        dispatcher: &Dispatcher,
        opponent: Box<dyn Opponent>,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let state = GameState::new(
            *config.width(),
            *config.height(),
            *config.win_length(),
            *config.human(),
        );
        let computer_opens = state.computer() == Mark::FIRST;

        info!(
            width = config.width(),
            height = config.height(),
            win_length = config.win_length(),
            human = %config.human(),
            "Starting game"
        );

        let game = Self {
            shared: Arc::new(Shared {
                config,
                engine: Mutex::new(Engine { state, opponent }),
                listeners: Mutex::new(Listeners::new()),
            }),
        };

        if computer_opens {
            debug!("Computer moves first, deferring opening move");
            let weak = Arc::downgrade(&game.shared);
            dispatcher.post(move || Self::run_opening_move(&weak));
        }

        Ok(game)
    }

    fn run_opening_move(weak: &Weak<Shared>) {
        match weak.upgrade() {
            Some(shared) => Game { shared }.computer_turn(),
            None => debug!("Game dropped before its opening move"),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The configuration this game was started with.
    pub fn config(&self) -> &GameConfig {
        &self.shared.config
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        *self.shared.config.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        *self.shared.config.height()
    }

    /// Cells in a row needed to win.
    pub fn win_length(&self) -> usize {
        *self.shared.config.win_length()
    }

    /// Mark played by the human.
    pub fn human(&self) -> Mark {
        *self.shared.config.human()
    }

    /// Mark played by the computer.
    pub fn computer(&self) -> Mark {
        self.shared.config.computer()
    }

    /// Occupant of `(col, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] outside `[0, width) x [0, height)`.
    pub fn cell(&self, col: usize, row: usize) -> Result<Cell, GameError> {
        let engine = self.shared.engine.lock();
        let pos = checked_position(engine.state.board(), col, row)?;
        Ok(engine.state.board().get(pos).unwrap_or_default())
    }

    /// Whose move is accepted next; `None` once the game is over.
    pub fn turn(&self) -> Option<Mark> {
        *self.shared.engine.lock().state.turn()
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.shared.engine.lock().state.is_over()
    }

    /// How the game ended, or `None` while it is running.
    pub fn outcome(&self) -> Option<Outcome> {
        *self.shared.engine.lock().state.outcome()
    }

    /// The winning mark. `None` while running or after a draw.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome().and_then(|outcome| outcome.winner())
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.shared.engine.lock().state.board().clone()
    }

    /// Moves applied so far, oldest first.
    pub fn history(&self) -> Vec<Move> {
        self.shared.engine.lock().state.history().to_vec()
    }

    /// Copy of the full game state.
    pub fn snapshot(&self) -> GameState {
        self.shared.engine.lock().state.clone()
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Submits the human's move at `(col, row)`.
    ///
    /// Ignored (with a non-[`Applied`](Submission::Applied) result) when the
    /// game is over, it is the computer's turn, or the cell is taken.
    /// Otherwise the mark is placed and its notifications are delivered with
    /// the computer still to move. Unless the move ended the game, the
    /// computer then replies before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] for coordinates off the board, on
    /// the human's turn only.
    #[instrument(skip(self))]
    pub fn submit_move(&self, col: usize, row: usize) -> Result<Submission, GameError> {
        let mut events = Vec::new();
        let submission = {
            let mut engine = self.shared.engine.lock();
            let submission = engine.human_move(col, row, &mut events)?;
            if submission.is_applied() {
                engine.verify();
            }
            submission
        };
        self.emit(events);

        if submission.is_applied() {
            self.computer_turn();
        }
        Ok(submission)
    }

    fn computer_turn(&self) {
        let mut events = Vec::new();
        {
            let mut engine = self.shared.engine.lock();
            engine.computer_move(&mut events);
            engine.verify();
        }
        self.emit(events);
    }

    // ─────────────────────────────────────────────────────────────
    //  Listeners
    // ─────────────────────────────────────────────────────────────

    /// Calls `f` every time a mark is placed.
    pub fn on_cell_changed(
        &self,
        f: impl Fn(&CellChanged) + Send + Sync + 'static,
    ) -> ListenerId {
        self.on_event(EventKind::CellChanged, move |event| {
            if let GameEvent::CellChanged(change) = event {
                f(change);
            }
        })
    }

    /// Calls `f` once, when the game ends.
    pub fn on_game_over(&self, f: impl Fn(&GameOver) + Send + Sync + 'static) -> ListenerId {
        self.on_event(EventKind::GameOver, move |event| {
            if let GameEvent::GameOver(over) = event {
                f(over);
            }
        })
    }

    /// Calls `f` for every event of `kind`.
    pub fn on_event(
        &self,
        kind: EventKind,
        f: impl Fn(&GameEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.shared.listeners.lock().add(kind, Arc::new(f));
        debug!(%id, %kind, "Listener registered");
        id
    }

    /// Unregisters a listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.shared.listeners.lock().remove(id)
    }

    fn emit(&self, events: Vec<GameEvent>) {
        for event in events {
            let listeners = self.shared.listeners.lock().snapshot(event.kind());
            for listener in listeners {
                listener(&event);
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.shared.config)
            .field("turn", &self.turn())
            .field("outcome", &self.outcome())
            .finish()
    }
}

fn checked_position(board: &Board, col: usize, row: usize) -> Result<Position, GameError> {
    if board.contains(col, row) {
        return Ok(Position::new(col, row));
    }
    let (width, height) = (board.width(), board.height());
    warn!(col, row, width, height, "Coordinates out of range");
    Err(GameError::OutOfRange {
        col,
        row,
        width,
        height,
    })
}

impl Engine {
    /// Applies the human's move and hands the turn to the computer.
    ///
    /// The computer's reply is left to the caller so the human's
    /// notifications go out first.
    fn human_move(
        &mut self,
        col: usize,
        row: usize,
        events: &mut Vec<GameEvent>,
    ) -> Result<Submission, GameError> {
        let human = *self.state.human();
        match *self.state.turn() {
            None => {
                debug!(col, row, "Game is over, ignoring move");
                return Ok(Submission::GameOver);
            }
            Some(turn) if turn != human => {
                debug!(col, row, "Not the human's turn, ignoring move");
                return Ok(Submission::NotYourTurn);
            }
            Some(_) => {}
        }
        let pos = checked_position(self.state.board(), col, row)?;
        if !self.state.board().is_empty(pos) {
            debug!(%pos, "Cell occupied, ignoring move");
            return Ok(Submission::Occupied);
        }

        if self.place(pos, human, events).is_none() {
            self.state.pass_turn(self.state.computer());
        }
        Ok(Submission::Applied)
    }

    fn computer_move(&mut self, events: &mut Vec<GameEvent>) {
        let computer = self.state.computer();
        if *self.state.turn() != Some(computer) {
            return;
        }

        let win_length = *self.state.win_length();
        let choice = self
            .opponent
            .choose_move(self.state.board(), computer, win_length);
        let pos = match choice.filter(|&pos| self.state.board().is_empty(pos)) {
            Some(pos) => pos,
            None => {
                warn!(
                    ?choice,
                    opponent = self.opponent.name(),
                    "Opponent chose an unplayable cell, taking the first empty one"
                );
                let Some(pos) = self.state.board().empty_positions().next() else {
                    error!("No empty cell left for the computer");
                    return;
                };
                pos
            }
        };

        if self.place(pos, computer, events).is_none() {
            self.state.pass_turn(*self.state.human());
        }
    }

    /// Places `mark`, queues notifications and ends the game if it is over.
    fn place(&mut self, pos: Position, mark: Mark, events: &mut Vec<GameEvent>) -> Option<Outcome> {
        self.state.apply(pos, mark);
        debug!(%pos, %mark, "Move applied");
        events.push(GameEvent::CellChanged(CellChanged::new(pos, mark)));

        let outcome = rules::evaluate(self.state.board(), mark, *self.state.win_length())?;
        self.state.finish(outcome);
        info!(%outcome, moves = self.state.history().len(), "Game over");
        events.push(GameEvent::GameOver(GameOver::new(outcome)));
        Some(outcome)
    }

    fn verify(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = GridInvariants::check_all(&self.state)
        {
            error!(?violations, "Game invariants violated");
            debug_assert!(violations.is_empty(), "Game invariants violated: {:?}", violations);
        }
    }
}
