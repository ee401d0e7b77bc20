//! Session settings chosen by the player before or between games.

use super::policy::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Who the human plays against.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans share the board.
    #[serde(rename = "pvp")]
    #[strum(to_string = "pvp")]
    PlayerVsPlayer,
    /// A human plays the AI.
    #[default]
    #[serde(rename = "pve")]
    #[strum(to_string = "pve")]
    PlayerVsAi,
}

/// Which side takes the first move (X) in a game against the AI.
///
/// Defaults to [`FirstPlayer::Human`] so the player moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstPlayer {
    /// The human plays X.
    #[default]
    Human,
    /// The AI plays X and opens the game.
    Ai,
}

impl FirstPlayer {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Player",
            Self::Ai => "AI",
        }
    }

    /// Toggles between `Human` and `Ai`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Human => Self::Ai,
            Self::Ai => Self::Human,
        }
    }
}

/// Parameters of a session. Changing any of them starts a fresh game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Human versus human, or human versus AI.
    mode: GameMode,
    /// Strength of the AI opponent.
    difficulty: Difficulty,
    /// Who plays X against the AI.
    first_player: FirstPlayer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(*config.mode(), GameMode::PlayerVsAi);
        assert_eq!(*config.difficulty(), Difficulty::Medium);
        assert_eq!(*config.first_player(), FirstPlayer::Human);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::from_str("PvP"), Ok(GameMode::PlayerVsPlayer));
        assert_eq!(GameMode::from_str("pve"), Ok(GameMode::PlayerVsAi));
        assert_eq!(GameMode::PlayerVsAi.to_string(), "pve");
    }

    #[test]
    fn test_first_player_toggle() {
        assert_eq!(FirstPlayer::Human.toggle(), FirstPlayer::Ai);
        assert_eq!(FirstPlayer::Ai.toggle().toggle(), FirstPlayer::Ai);
        assert_eq!(FirstPlayer::from_str("AI"), Ok(FirstPlayer::Ai));
    }
}
