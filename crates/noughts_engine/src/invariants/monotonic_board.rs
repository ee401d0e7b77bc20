//! Monotonic board invariant: squares never change once set.

use super::super::{Board, SessionState};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must place every mark on
/// an empty square and reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<SessionState> for MonotonicBoardInvariant {
    fn holds(state: &SessionState) -> bool {
        let mut reconstructed = Board::new();

        for mov in state.history() {
            if !reconstructed.place(mov.position, mov.player) {
                return false;
            }
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
