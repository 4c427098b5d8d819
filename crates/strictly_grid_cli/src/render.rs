//! Terminal output for game events.

use strictly_grid::{EventKind, Game, GameEvent};
use tracing::warn;

/// How events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One sentence per event, plus the board after each accepted move.
    Text,
    /// One JSON object per event, nothing else on stdout.
    Json,
}

impl Format {
    /// Picks the format from the `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json { Format::Json } else { Format::Text }
    }
}

/// Renders one event as a single line.
pub fn render_event(event: &GameEvent, format: Format) -> Option<String> {
    match format {
        Format::Text => Some(match event {
            GameEvent::CellChanged(change) => {
                format!("{} plays {}", change.mark, change.position)
            }
            GameEvent::GameOver(over) => format!("Game over: {}", over.outcome),
        }),
        Format::Json => match serde_json::to_string(event) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(error = %e, "Failed to serialize event");
                None
            }
        },
    }
}

/// Subscribes stdout printers for both event kinds.
pub fn attach(game: &Game, format: Format) {
    for kind in [EventKind::CellChanged, EventKind::GameOver] {
        game.on_event(kind, move |event| {
            if let Some(line) = render_event(event, format) {
                println!("{line}");
            }
        });
    }
}
