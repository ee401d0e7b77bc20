//! Difficulty tiers and the move-selection policy behind each.
//!
//! - [`Difficulty::Easy`] plays a uniformly random empty square.
//! - [`Difficulty::Medium`] wins if it can, blocks if it must, otherwise
//!   plays randomly.
//! - [`Difficulty::Hard`] plays the minimax-optimal move.
//!
//! Randomness always comes from the caller so games can be replayed from a
//! seed.

use super::rules::evaluate;
use super::search::best_move;
use super::{Board, GameOutcome, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// How strong the AI opponent plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random play.
    Easy,
    /// One-move lookahead: win, else block, else random.
    #[default]
    Medium,
    /// Exhaustive minimax.
    Hard,
}

impl Difficulty {
    /// Chooses a square for `me` to play, or `None` if the board is full.
    ///
    /// Must not be called on a finished game.
    #[instrument(skip(board, rng), fields(difficulty = %self))]
    pub fn select_move<R: Rng + ?Sized>(
        self,
        board: &Board,
        me: Player,
        rng: &mut R,
    ) -> Option<Position> {
        debug_assert_eq!(
            evaluate(board),
            GameOutcome::InProgress,
            "AI asked to move on a finished board"
        );
        let choice = match self {
            Difficulty::Easy => random_move(board, rng),
            Difficulty::Medium => tactical_move(board, me, rng),
            Difficulty::Hard => perfect_move(board, me),
        };
        debug!(?me, ?choice, "AI selected move");
        choice
    }
}

/// Any empty square, uniformly.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    Position::valid_moves(board).choose(rng).copied()
}

/// First empty square (by index) that wins the game outright for `player`.
pub fn winning_move(board: &Board, player: Player) -> Option<Position> {
    let mut scratch = *board;
    Position::ALL.into_iter().find(|&pos| {
        if !scratch.place(pos, player) {
            return false;
        }
        let wins = evaluate(&scratch) == GameOutcome::Won(player);
        scratch.lift(pos);
        wins
    })
}

/// Win now, else deny the opponent's immediate win, else play randomly.
pub fn tactical_move<R: Rng + ?Sized>(
    board: &Board,
    me: Player,
    rng: &mut R,
) -> Option<Position> {
    if let Some(pos) = winning_move(board, me) {
        trace!(%pos, "Taking the win");
        return Some(pos);
    }
    if let Some(pos) = winning_move(board, me.opponent()) {
        trace!(%pos, "Blocking the opponent");
        return Some(pos);
    }
    random_move(board, rng)
}

/// Center when at most one square is taken and the center is free.
///
/// The center is always among the optimal replies in that family of boards,
/// so taking it skips a full search without giving up any game value.
pub fn opening_shortcut(board: &Board) -> Option<Position> {
    (board.occupied() <= 1 && board.is_empty(Position::Center)).then_some(Position::Center)
}

/// The minimax-optimal square, lowest index on ties.
pub fn perfect_move(board: &Board, me: Player) -> Option<Position> {
    if let Some(pos) = opening_shortcut(board) {
        trace!(%pos, "Opening shortcut");
        return Some(pos);
    }
    best_move(board, me).map(|scored| *scored.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("Easy"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("MEDIUM"), Ok(Difficulty::Medium));
        assert!(Difficulty::from_str("impossible").is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_random_move_only_picks_empty_squares() {
        let board: Board = "XOX O.X OXO".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(random_move(&board, &mut rng), Some(Position::Center));
        }
    }

    #[test]
    fn test_random_move_covers_every_square() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<_> = (0..500)
            .filter_map(|_| random_move(&board, &mut rng))
            .collect();
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_full_board_yields_no_move() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_move(&board, &mut rng), None);
        assert_eq!(tactical_move(&board, Player::O, &mut rng), None);
        assert_eq!(perfect_move(&board, Player::O), None);
    }

    #[test]
    fn test_tactical_blocks() {
        let board: Board = "XX. O.. ...".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            tactical_move(&board, Player::O, &mut rng),
            Some(Position::TopRight)
        );
    }

    #[test]
    fn test_tactical_wins_before_blocking() {
        let board: Board = "XX. OO. X..".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            tactical_move(&board, Player::O, &mut rng),
            Some(Position::MiddleRight)
        );
    }

    #[test]
    fn test_winning_move_restores_board() {
        let board: Board = "XX. O.. ...".parse().unwrap();
        let before = board;
        assert_eq!(winning_move(&board, Player::X), Some(Position::TopRight));
        assert_eq!(winning_move(&board, Player::O), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_opening_shortcut_family() {
        assert_eq!(opening_shortcut(&Board::new()), Some(Position::Center));
        let corner: Board = "X........".parse().unwrap();
        assert_eq!(opening_shortcut(&corner), Some(Position::Center));
        let center: Board = "....X....".parse().unwrap();
        assert_eq!(opening_shortcut(&center), None);
        let two: Board = "X.O......".parse().unwrap();
        assert_eq!(opening_shortcut(&two), None);
    }
}
