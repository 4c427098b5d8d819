//! Deferred task queue owned by the caller's execution context.
//!
//! The engine never runs the computer's opening move from inside its
//! constructor. It posts the move through a [`Dispatcher`] instead, and the
//! move runs when the owner of the matching [`EventLoop`] next pumps it. Any
//! listener registered between construction and that pump sees the move.
//!
//! ```
//! use strictly_grid::{Game, GameConfig, Mark, dispatch};
//!
//! let (dispatcher, mut event_loop) = dispatch::event_loop();
//! let game = Game::new(GameConfig::default().with_human(Mark::O), &dispatcher).unwrap();
//! game.on_cell_changed(|change| println!("{} at {}", change.mark, change.position));
//! assert_eq!(event_loop.run_pending(), 1);
//! assert_eq!(game.turn(), Some(Mark::O));
//! ```

use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Creates a connected dispatcher and event loop.
#[instrument]
pub fn event_loop() -> (Dispatcher, EventLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { tx }, EventLoop { rx })
}

/// Posts tasks to an [`EventLoop`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Task>,
}

impl Dispatcher {
    /// Queues a task. Never runs it inline.
    ///
    /// If the event loop has been dropped the task is discarded.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        if self.tx.send(Box::new(task)).is_err() {
            warn!("Event loop closed, dropping posted task");
        }
    }

    /// Returns true if the receiving event loop is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Runs posted tasks in FIFO order on whichever context drives it.
#[derive(Debug)]
pub struct EventLoop {
    rx: mpsc::UnboundedReceiver<Task>,
}

impl EventLoop {
    /// Runs every task queued so far and returns how many ran.
    ///
    /// Tasks posted by a running task are picked up in the same call.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        if ran > 0 {
            debug!(ran, "Ran pending tasks");
        }
        ran
    }

    /// Runs tasks as they arrive until every [`Dispatcher`] is dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task();
        }
        debug!("All dispatchers dropped, event loop finished");
    }
}
