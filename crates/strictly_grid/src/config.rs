//! Game configuration.

use crate::error::ConfigError;
use crate::types::Mark;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Everything needed to start a game.
///
/// Loadable from TOML:
///
/// ```toml
/// width = 15
/// height = 15
/// win_length = 5
/// human = "o"
/// seed = 7
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Number of columns.
    #[serde(default = "default_size")]
    width: usize,

    /// Number of rows.
    #[serde(default = "default_size")]
    height: usize,

    /// Same-mark cells in a line needed to win.
    #[serde(default = "default_size")]
    win_length: usize,

    /// Mark controlled by the human. The computer plays the other one.
    #[serde(default = "default_human")]
    human: Mark,

    /// Seed for the computer's random fallback. `None` draws from entropy.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

fn default_size() -> usize {
    3
}

fn default_human() -> Mark {
    Mark::FIRST
}

impl GameConfig {
    /// Creates a configuration without a fixed seed.
    #[instrument]
    pub fn new(width: usize, height: usize, win_length: usize, human: Mark) -> Self {
        Self {
            width,
            height,
            win_length,
            human,
            seed: None,
        }
    }

    /// The mark the computer plays.
    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }

    /// Rejects dimensions or win-length of zero, and boards whose cell count
    /// overflows.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::new(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = self.width.checked_mul(self.height);
        if cells.is_none_or(|cells| cells > isize::MAX as usize) {
            return Err(ConfigError::new(format!(
                "board of {}x{} cells is too large",
                self.width, self.height
            )));
        }
        if self.win_length == 0 {
            return Err(ConfigError::new("win_length must be at least 1"));
        }
        Ok(())
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;

        info!(
            width = config.width,
            height = config.height,
            win_length = config.win_length,
            human = %config.human,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_size(), default_size(), default_size(), default_human())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_is_classic() {
        let config = GameConfig::default();
        assert_eq!(*config.width(), 3);
        assert_eq!(*config.height(), 3);
        assert_eq!(*config.win_length(), 3);
        assert_eq!(*config.human(), Mark::X);
        assert_eq!(config.computer(), Mark::O);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let config = GameConfig::default().with_width(7).with_human(Mark::O).with_seed(42);
        assert_eq!(*config.width(), 7);
        assert_eq!(config.computer(), Mark::X);
        assert_eq!(*config.seed(), Some(42));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(GameConfig::new(0, 3, 3, Mark::X).validate().is_err());
        assert!(GameConfig::new(3, 0, 3, Mark::X).validate().is_err());
        assert!(GameConfig::new(3, 3, 0, Mark::X).validate().is_err());
        assert!(GameConfig::new(1, 1, 1, Mark::O).validate().is_ok());
    }

    #[test]
    fn test_overflowing_board_rejected() {
        let err = GameConfig::new(1 << 33, 1 << 31, 3, Mark::X)
            .validate()
            .unwrap_err();
        assert!(err.message.contains("too large"));
        assert!(GameConfig::new(usize::MAX, 2, 3, Mark::X).validate().is_err());
        assert!(GameConfig::new(usize::MAX, 1, 3, Mark::X).validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let file = write_config("width = 15\nheight = 10\nwin_length = 5\nhuman = \"o\"\nseed = 9\n");
        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.width(), 15);
        assert_eq!(*config.height(), 10);
        assert_eq!(*config.win_length(), 5);
        assert_eq!(*config.human(), Mark::O);
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let file = write_config("width = 4\n");
        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.width(), 4);
        assert_eq!(*config.height(), 3);
        assert_eq!(*config.human(), Mark::X);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_from_file_rejects_empty_human() {
        let file = write_config("human = \"empty\"\n");
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_from_file_rejects_zero_width() {
        let file = write_config("width = 0\n");
        assert!(GameConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file("/nonexistent/strictly_grid.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }
}
