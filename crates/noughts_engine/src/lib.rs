//! Pure tic-tac-toe game logic.
//!
//! This crate holds everything about the game that does not wait on a clock
//! or a terminal:
//!
//! - **Board model**: [`Board`], [`Square`], [`Position`]
//! - **Rules**: [`evaluate`] classifies a board as won, drawn, or in progress
//! - **Search**: exhaustive minimax in [`search`]
//! - **Policy**: [`Difficulty`] tiers built on random play, one-move
//!   tactics, and minimax
//! - **Session**: [`Session`] enforces turn order and owns the board
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Difficulty, GameOutcome, Session, SessionConfig};
//!
//! let config = SessionConfig::default().with_difficulty(Difficulty::Hard);
//! let mut session = Session::seeded(config, 7);
//! session.apply_human_move(4)?;
//! let state = session.play_ai_turn()?;
//! assert_eq!(*state.outcome(), GameOutcome::InProgress);
//! # Ok::<(), noughts_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod invariants;
mod policy;
mod position;
mod rules;
mod session;
mod settings;
mod types;

pub mod search;

pub use action::{Move, MoveError};
pub use contracts::{Contract, GameNotOver, LegalMove, MoveContract, PlayersTurn, SquareIsEmpty};
pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation, MarkBalanceInvariant,
    MonotonicBoardInvariant, TicTacToeInvariants,
};
pub use policy::{
    Difficulty, opening_shortcut, perfect_move, random_move, tactical_move, winning_move,
};
pub use position::Position;
pub use rules::{LINES, Line, check_winner, evaluate, is_draw, is_full};
pub use session::{AiTicket, Phase, Session, SessionState};
pub use settings::{FirstPlayer, GameMode, SessionConfig};
pub use types::{Board, BoardParseError, GameOutcome, Player, Square};
