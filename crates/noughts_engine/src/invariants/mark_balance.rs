//! Mark balance invariant: X is never behind O and never more than one ahead.

use super::super::{Player, SessionState};
use super::Invariant;
use tracing::warn;

/// Invariant: the number of X marks minus the number of O marks is 0 or 1.
pub struct MarkBalanceInvariant;

impl Invariant<SessionState> for MarkBalanceInvariant {
    fn holds(state: &SessionState) -> bool {
        let x_count = state.board().count(Player::X);
        let o_count = state.board().count(Player::O);
        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X count minus O count is 0 or 1"
    }
}
