//! Strictly Grid - terminal player
//!
//! Reads `col row` lines from stdin and plays them against the computer.

#![warn(missing_docs)]

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use render::Format;
use strictly_grid::{Game, Submission, dispatch};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the board and JSON events
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.game_config().context("Failed to load game config")?;
    let format = Format::from_json_flag(cli.json);

    let (dispatcher, mut event_loop) = dispatch::event_loop();
    let game = Game::new(config, &dispatcher).context("Failed to start game")?;
    render::attach(&game, format);

    // Lets the computer's opening move land before the first prompt
    let ran = event_loop.run_pending();
    debug!(ran, "Pumped event loop after construction");

    play(&game, format).await
}

/// Feeds stdin lines to the game until it ends or input closes.
async fn play(game: &Game, format: Format) -> Result<()> {
    if format == Format::Text {
        print_board(game);
        prompt(game);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((col, row)) = parse_move(line) else {
            warn!(line, "Malformed move");
            report(format, &format!("Expected `col row`, got `{line}`"));
            continue;
        };

        match game.submit_move(col, row) {
            Ok(Submission::Applied) => {
                if format == Format::Text {
                    print_board(game);
                }
            }
            Ok(other) => report(format, &format!("Move ignored: {other}")),
            Err(e) => report(format, &e.to_string()),
        }

        if game.is_over() {
            break;
        }
        if format == Format::Text {
            prompt(game);
        }
    }

    info!(outcome = ?game.outcome(), moves = game.history().len(), "Session finished");
    Ok(())
}

/// Parses `col row`, separated by whitespace or a comma.
fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let col = parts.next()?.parse().ok()?;
    let row = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((col, row))
}

fn print_board(game: &Game) {
    println!("{}\n", game.board().display());
}

fn prompt(game: &Game) {
    println!("{} to move (col row):", game.human());
}

/// User-facing problems go to stderr in JSON mode, stdout otherwise.
fn report(format: Format, message: &str) {
    match format {
        Format::Text => println!("{message}"),
        Format::Json => eprintln!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("1 2"), Some((1, 2)));
        assert_eq!(parse_move("  3\t0 "), Some((3, 0)));
        assert_eq!(parse_move("4,5"), Some((4, 5)));
    }

    #[test]
    fn test_parse_move_rejects_malformed() {
        for line in ["", "1", "a b", "1 2 3", "-1 2", "1.5 2"] {
            assert_eq!(parse_move(line), None, "accepted {line:?}");
        }
    }
}
