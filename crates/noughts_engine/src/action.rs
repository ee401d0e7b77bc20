//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They carry the player's intent
//! and are validated by the move contract before the session applies them.

use super::{Player, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a move or AI request was refused.
///
/// Every variant is a rejection: the session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index does not name a square.
    #[display("Position {index} is out of bounds (must be 0-8)")]
    OutOfBounds {
        /// The rejected index.
        index: usize,
    },

    /// The square at the position is already occupied.
    #[display("Square {position} is already occupied")]
    SquareOccupied {
        /// The occupied square.
        position: Position,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {player}'s turn")]
    WrongPlayer {
        /// The player who tried to move.
        player: Player,
    },

    /// The AI is still choosing its move.
    #[display("The AI is already thinking")]
    Busy,

    /// An AI move was computed for a game that has since been reset.
    #[display("AI move belongs to a previous game")]
    StaleTicket,

    /// The AI was asked to move on a board with no empty squares.
    #[display("No empty square left to play")]
    NoMoveAvailable,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {description}")]
    InvariantViolation {
        /// Which invariants failed.
        description: String,
    },
}
