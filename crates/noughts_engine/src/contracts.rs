//! Contract-based validation for tic-tac-toe moves.
//!
//! Contracts formalize Hoare-style reasoning: `{P} action {Q}`. The session
//! checks preconditions on every move and postconditions in debug builds.

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, TicTacToeInvariants};
use super::session::SessionState;
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game has not finished.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects moves on a won or drawn board.
    pub fn check(state: &SessionState) -> Result<(), MoveError> {
        if state.outcome().is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects moves onto an occupied square.
    pub fn check(mov: &Move, state: &SessionState) -> Result<(), MoveError> {
        if state.board().is_empty(mov.position) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied {
                position: mov.position,
            })
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves by the side not on move.
    pub fn check(mov: &Move, state: &SessionState) -> Result<(), MoveError> {
        if mov.player == *state.to_move() {
            Ok(())
        } else {
            Err(MoveError::WrongPlayer { player: mov.player })
        }
    }
}

/// Composite precondition: game running, square empty, player's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &SessionState) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        SquareIsEmpty::check(mov, state)?;
        PlayersTurn::check(mov, state)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Preconditions: [`LegalMove`].
///
/// Postconditions: exactly one more move in history, and every invariant in
/// [`TicTacToeInvariants`] still holds.
pub struct MoveContract;

impl Contract<SessionState, Move> for MoveContract {
    fn pre(state: &SessionState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(MoveError::InvariantViolation {
                description: "Postcondition failed: move not recorded exactly once".to_string(),
            });
        }
        TicTacToeInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation {
                description: format!("Postcondition failed: {}", descriptions),
            }
        })
    }
}
