//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use noughts_engine::{Difficulty, FirstPlayer, GameMode, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "NOUGHTS_CONFIG";

/// Config file read when neither `--config` nor [`CONFIG_ENV`] is given.
pub const DEFAULT_CONFIG_FILE: &str = "noughts.toml";

/// Settings for a play session.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct NoughtsConfig {
    /// Human versus human, or human versus AI.
    mode: GameMode,

    /// AI strength.
    difficulty: Difficulty,

    /// Who plays X against the AI.
    first_player: FirstPlayer,

    /// Shortest AI thinking pause, in milliseconds.
    delay_min_ms: u64,

    /// Longest AI thinking pause, in milliseconds.
    delay_max_ms: u64,

    /// Fixed seed for the AI's random choices.
    #[setters(strip_option)]
    seed: Option<u64>,
}

impl Default for NoughtsConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            first_player: FirstPlayer::default(),
            delay_min_ms: 500,
            delay_max_ms: 1000,
            seed: None,
        }
    }
}

impl NoughtsConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    ///
    /// A path that was asked for explicitly must exist.
    #[instrument]
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_min_ms > self.delay_max_ms {
            return Err(ConfigError::new(format!(
                "delay_min_ms ({}) exceeds delay_max_ms ({})",
                self.delay_min_ms, self.delay_max_ms
            )));
        }
        Ok(())
    }

    /// Session settings carried by this config.
    pub fn session(&self) -> SessionConfig {
        SessionConfig::default()
            .with_mode(self.mode)
            .with_difficulty(self.difficulty)
            .with_first_player(self.first_player)
    }

    /// Bounds of the AI thinking pause.
    pub fn delay_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.delay_min_ms),
            Duration::from_millis(self.delay_max_ms),
        )
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
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: NoughtsConfig = toml::from_str("").unwrap();
        assert_eq!(config, NoughtsConfig::default());
        assert_eq!(*config.delay_min_ms(), 500);
        assert_eq!(*config.delay_max_ms(), 1000);
    }

    #[test]
    fn test_setters_override() {
        let config = NoughtsConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_seed(9);
        assert_eq!(*config.difficulty(), Difficulty::Hard);
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.session().difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_inverted_delay_is_rejected() {
        let config = NoughtsConfig::default()
            .with_delay_min_ms(900)
            .with_delay_max_ms(100);
        assert!(config.validate().is_err());
    }
}
