//! Game notifications and the listener registry.
//!
//! Display adapters subscribe to two kinds of event: a cell received a mark,
//! and the game finished. Listeners run in registration order.

use crate::outcome::Outcome;
use crate::types::{Mark, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A mark was placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct CellChanged {
    /// Where the mark was placed.
    pub position: Position,
    /// The mark now in that cell.
    pub mark: Mark,
}

/// The game reached a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct GameOver {
    /// How the game ended.
    pub outcome: Outcome,
}

impl GameOver {
    /// The winning mark, or `None` for a draw.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }
}

/// Any engine notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// See [`CellChanged`].
    CellChanged(CellChanged),
    /// See [`GameOver`].
    GameOver(GameOver),
}

impl GameEvent {
    /// The kind used to route this event to listeners.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::CellChanged(_) => EventKind::CellChanged,
            GameEvent::GameOver(_) => EventKind::GameOver,
        }
    }
}

/// Event kinds a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum EventKind {
    /// [`GameEvent::CellChanged`].
    CellChanged,
    /// [`GameEvent::GameOver`].
    GameOver,
}

/// Handle returned on registration, used to remove the listener later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("listener#{_0}")]
pub struct ListenerId(u64);

/// A registered callback.
pub type Listener = Arc<dyn Fn(&GameEvent) + Send + Sync>;

/// Ordered listener lists keyed by event kind.
///
/// Not synchronised itself; the engine keeps it behind a mutex and calls
/// [`Listeners::snapshot`] so callbacks run without the lock held.
#[derive(Default)]
pub struct Listeners {
    by_kind: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl Listeners {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener for `kind`.
    pub fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_kind.entry(kind).or_default().push((id, listener));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.by_kind.values_mut().any(|list| {
            let before = list.len();
            list.retain(|(existing, _)| *existing != id);
            list.len() != before
        })
    }

    /// Number of listeners registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Listeners for `kind` in registration order.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Listener> {
        self.by_kind
            .get(&kind)
            .map(|list| list.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("cell_changed", &self.count(EventKind::CellChanged))
            .field("game_over", &self.count(EventKind::GameOver))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Listener {
        let log = Arc::clone(log);
        Arc::new(move |_event: &GameEvent| log.lock().push(tag.to_string()))
    }

    fn cell_event() -> GameEvent {
        GameEvent::CellChanged(CellChanged::new(Position::new(1, 2), Mark::X))
    }

    #[test]
    fn test_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        listeners.add(EventKind::CellChanged, recorder(&log, "first"));
        listeners.add(EventKind::CellChanged, recorder(&log, "second"));
        listeners.add(EventKind::GameOver, recorder(&log, "over"));

        for listener in listeners.snapshot(EventKind::CellChanged) {
            listener(&cell_event());
        }
        assert_eq!(*log.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        let first = listeners.add(EventKind::CellChanged, recorder(&log, "first"));
        listeners.add(EventKind::CellChanged, recorder(&log, "second"));

        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        assert_eq!(listeners.count(EventKind::CellChanged), 1);
        assert_eq!(listeners.count(EventKind::GameOver), 0);
    }

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        let a = listeners.add(EventKind::CellChanged, recorder(&log, "a"));
        let b = listeners.add(EventKind::GameOver, recorder(&log, "b"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(cell_event().kind(), EventKind::CellChanged);
        let over = GameEvent::GameOver(GameOver::new(Outcome::Draw));
        assert_eq!(over.kind(), EventKind::GameOver);
        assert_eq!(GameOver::new(Outcome::Winner(Mark::O)).winner(), Some(Mark::O));
    }
}
