//! Engine configuration.

use super::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Longest possible game in plies. Win scores must stay above this so a
/// late win never scores as a draw or a loss.
pub const MAX_PLIES: i32 = 9;

/// Configuration for the search engine and game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side played by the engine. The human plays the opponent.
    engine: Player,

    /// Side that moves first in a new game.
    first_player: Player,

    /// Score magnitude of a won terminal position before depth adjustment.
    win_score: i32,

    /// Enables alpha-beta pruning. Moves and scores are identical either way.
    alpha_beta: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: Player::O,
            first_player: Player::X,
            win_score: 10,
            alpha_beta: false,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the engine playing `engine`.
    #[instrument]
    pub fn new(engine: Player) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    /// Side played by the human.
    pub fn human(&self) -> Player {
        self.engine.opponent()
    }

    /// Sets which side moves first.
    pub fn with_first_player(mut self, first_player: Player) -> Self {
        self.first_player = first_player;
        self
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    /// Sets the terminal win score.
    pub fn with_win_score(mut self, win_score: i32) -> Self {
        self.win_score = win_score;
        self
    }

    /// Rejects settings the search cannot honour.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_score <= MAX_PLIES {
            return Err(ConfigError::new(format!(
                "win_score must be greater than {}, got {}",
                MAX_PLIES, self.win_score
            )));
        }
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        debug!(?config, "Config parsed");
        Ok(config)
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(engine = %config.engine, alpha_beta = config.alpha_beta, "Config loaded successfully");
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(*config.engine(), Player::O);
        assert_eq!(config.human(), Player::X);
        assert_eq!(*config.first_player(), Player::X);
        assert_eq!(*config.win_score(), 10);
        assert!(!*config.alpha_beta());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("alpha_beta = true\n").unwrap();
        assert!(*config.alpha_beta());
        assert_eq!(*config.engine(), Player::O);
    }

    #[test]
    fn test_low_win_score_rejected() {
        let err = EngineConfig::from_toml_str("win_score = 9\n").unwrap_err();
        assert!(err.message.contains("win_score"));
    }
}
