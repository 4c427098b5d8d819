//! Strictly Grid - generalized tic-tac-toe engine
//!
//! Any board size, any win-length, one human against a heuristic computer
//! opponent.
//!
//! # Architecture
//!
//! - **Types**: marks, cells, positions and the board
//! - **Rules**: win detection along four directions, draw detection
//! - **Opponent**: win, else block, else a random empty cell
//! - **Game**: turn state machine, notifications, deferred opening move
//! - **Dispatch**: caller-owned event loop for deferred work
//!
//! # Example
//!
//! ```
//! use strictly_grid::{Game, GameConfig, Mark, Submission, dispatch};
//!
//! let (dispatcher, mut event_loop) = dispatch::event_loop();
//! let config = GameConfig::new(5, 5, 4, Mark::X).with_seed(1);
//! let game = Game::new(config, &dispatcher).unwrap();
//! game.on_game_over(|over| println!("game over: {}", over.outcome));
//!
//! // Nothing was deferred: the human opens.
//! assert_eq!(event_loop.run_pending(), 0);
//!
//! assert_eq!(game.submit_move(2, 2).unwrap(), Submission::Applied);
//! // The computer has already replied.
//! assert_eq!(game.turn(), Some(Mark::X));
//! assert_eq!(game.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
pub mod dispatch;
mod error;
mod events;
mod game;
pub mod invariants;
mod opponent;
mod outcome;
pub mod rules;
mod state;
mod types;

pub use action::{Move, Submission};
pub use config::GameConfig;
pub use dispatch::{Dispatcher, EventLoop};
pub use error::{ConfigError, GameError};
pub use events::{CellChanged, EventKind, GameEvent, GameOver, Listener, ListenerId, Listeners};
pub use game::Game;
pub use opponent::{HeuristicOpponent, Opponent, Reason, completing_cell};
pub use outcome::Outcome;
pub use state::GameState;
pub use types::{Board, Cell, Mark, Position};
