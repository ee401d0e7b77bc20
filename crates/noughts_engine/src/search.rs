//! Exhaustive minimax search.
//!
//! Scores are from the searching player's point of view: a win is worth
//! `10 - depth`, a loss `depth - 10`, a draw `0`. The depth term makes the
//! searcher take the quickest win and drag out a loss it cannot avoid.

use super::rules::evaluate;
use super::{Board, GameOutcome, Player, Position};
use tracing::{debug, instrument};

/// Score of a win found at depth zero.
pub const WIN_SCORE: i32 = 10;

/// Result of scoring one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct ScoredMove {
    /// Square played.
    position: Position,
    /// Minimax value for the player who moved.
    score: i32,
}

/// Full-depth minimax over a private copy of a board.
///
/// The caller's board is never touched: trial marks go onto `scratch`, which
/// is restored before each call returns.
#[derive(Debug)]
pub struct Minimax {
    me: Player,
    scratch: Board,
    nodes: u64,
}

impl Minimax {
    /// Prepares a search for `me` starting from `board`.
    pub fn new(board: &Board, me: Player) -> Self {
        Self {
            me,
            scratch: *board,
            nodes: 0,
        }
    }

    /// Number of positions visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores the current scratch position.
    ///
    /// `maximizing` is true when `me` is to move.
    pub fn score(&mut self, depth: i32, maximizing: bool) -> i32 {
        self.nodes += 1;
        match evaluate(&self.scratch) {
            GameOutcome::Won(p) if p == self.me => return WIN_SCORE - depth,
            GameOutcome::Won(_) => return depth - WIN_SCORE,
            GameOutcome::Draw => return 0,
            GameOutcome::InProgress => {}
        }

        let mover = if maximizing { self.me } else { self.me.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for pos in Position::ALL {
            if !self.scratch.place(pos, mover) {
                continue;
            }
            let value = self.score(depth + 1, !maximizing);
            self.scratch.lift(pos);
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }

    /// Scores every empty square as `me`'s next move, in ascending index
    /// order.
    pub fn score_moves(&mut self) -> Vec<ScoredMove> {
        let mut scored = Vec::new();
        for pos in Position::ALL {
            if !self.scratch.place(pos, self.me) {
                continue;
            }
            let score = self.score(0, false);
            self.scratch.lift(pos);
            scored.push(ScoredMove {
                position: pos,
                score,
            });
        }
        scored
    }
}

/// Returns the highest-scoring move for `me`, or `None` on a full board.
///
/// Ties go to the lowest index.
#[instrument(skip(board), fields(board = %board.display().replace('\n', " ")))]
pub fn best_move(board: &Board, me: Player) -> Option<ScoredMove> {
    let mut search = Minimax::new(board, me);
    let mut best: Option<ScoredMove> = None;
    for candidate in search.score_moves() {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    debug!(nodes = search.nodes(), best = ?best, "Minimax search finished");
    best
}
