//! Command-line interface for strictly_grid.

use clap::Parser;
use std::path::PathBuf;
use strictly_grid::{ConfigError, GameConfig, Mark};

/// Strictly Grid - tic-tac-toe on any board, against the computer
#[derive(Parser, Debug)]
#[command(name = "strictly_grid")]
#[command(about = "Play generalized tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file with game settings; flags given here override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<usize>,

    /// Cells in a row needed to win
    #[arg(long)]
    pub win_length: Option<usize>,

    /// Mark played by the human (x or o)
    #[arg(long)]
    pub human: Option<Mark>,

    /// Seed for the computer's random moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the game configuration: file values first, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config = config.with_width(width);
        }
        if let Some(height) = self.height {
            config = config.with_height(height);
        }
        if let Some(win_length) = self.win_length {
            config = config.with_win_length(win_length);
        }
        if let Some(human) = self.human {
            config = config.with_human(human);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["strictly_grid"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
        assert!(!cli.json);
    }

    #[test]
    fn test_flags_set_config() {
        let cli = Cli::parse_from([
            "strictly_grid",
            "--width",
            "5",
            "--height",
            "4",
            "--win-length",
            "4",
            "--human",
            "O",
            "--seed",
            "7",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!(config, GameConfig::new(5, 4, 4, Mark::O).with_seed(7));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 6\nheight = 6\nwin_length = 5\nhuman = \"o\"").unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["strictly_grid", "--config", &path, "--win-length", "4"]);
        let config = cli.game_config().unwrap();

        assert_eq!(*config.width(), 6);
        assert_eq!(*config.win_length(), 4);
        assert_eq!(*config.human(), Mark::O);
    }
}
