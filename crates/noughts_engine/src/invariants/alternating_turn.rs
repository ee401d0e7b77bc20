//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Player, SessionState};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Move history must show X, O, X, O, ... starting with X. While the game is
/// in progress the side to move follows the history's parity.
pub struct AlternatingTurnInvariant;

impl Invariant<SessionState> for AlternatingTurnInvariant {
    fn holds(state: &SessionState) -> bool {
        let history = state.history();

        if let Some(first) = history.first()
            && first.player != Player::X
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        if state.outcome().is_terminal() {
            return true;
        }

        let expected_next = if history.len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };
        *state.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
