//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Nothing here mutates state, so the
//! session, the search, and the difficulty policies all share one verdict.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, Line, check_winner};

use super::{Board, GameOutcome};
use tracing::instrument;

/// Classifies a board as won, drawn, or still in progress.
///
/// A win is checked before fullness, so a last move that completes a line
/// on a full board is a win rather than a draw.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> GameOutcome {
    if let Some(winner) = check_winner(board) {
        GameOutcome::Won(winner)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
