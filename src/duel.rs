//! AI-versus-AI series.
//!
//! Plays difficulty tiers against each other straight through the engine
//! policy, with no session and no pacing.

use derive_getters::Getters;
use derive_setters::Setters;
use noughts_engine::{Board, Difficulty, GameOutcome, MoveError, Player, evaluate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Which tiers meet, and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct DuelConfig {
    /// Tier playing X in the first game.
    x: Difficulty,
    /// Tier playing O in the first game.
    o: Difficulty,
    /// Number of games.
    games: u32,
    /// Trade sides after every game.
    swap_sides: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            x: Difficulty::Hard,
            o: Difficulty::Medium,
            games: 100,
            swap_sides: false,
        }
    }
}

/// Tallies from a finished series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SeriesReport {
    games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    /// Wins credited to the tier that played them. Tiers with no wins are
    /// absent.
    wins_by_tier: BTreeMap<Difficulty, u32>,
}

impl SeriesReport {
    fn record(&mut self, outcome: GameOutcome, x: Difficulty, o: Difficulty) {
        self.games += 1;
        match outcome {
            GameOutcome::Won(Player::X) => {
                self.x_wins += 1;
                *self.wins_by_tier.entry(x).or_default() += 1;
            }
            GameOutcome::Won(Player::O) => {
                self.o_wins += 1;
                *self.wins_by_tier.entry(o).or_default() += 1;
            }
            GameOutcome::Draw | GameOutcome::InProgress => self.draws += 1,
        }
    }
}

/// Plays one game to the end.
#[instrument(skip(rng))]
pub fn play_game<R: Rng + ?Sized>(
    x: Difficulty,
    o: Difficulty,
    rng: &mut R,
) -> Result<GameOutcome, MoveError> {
    let mut board = Board::new();
    let mut to_move = Player::X;
    loop {
        let outcome = evaluate(&board);
        if outcome.is_terminal() {
            debug!(%outcome, "Game finished");
            return Ok(outcome);
        }
        let tier = match to_move {
            Player::X => x,
            Player::O => o,
        };
        let position = tier
            .select_move(&board, to_move, rng)
            .ok_or(MoveError::NoMoveAvailable)?;
        if !board.place(position, to_move) {
            return Err(MoveError::SquareOccupied { position });
        }
        to_move = to_move.opponent();
    }
}

/// Plays `config.games()` games and tallies the results.
#[instrument(skip(rng))]
pub fn run_series<R: Rng + ?Sized>(
    config: DuelConfig,
    rng: &mut R,
) -> Result<SeriesReport, MoveError> {
    let mut report = SeriesReport::default();
    for game in 0..config.games {
        let (x, o) = if config.swap_sides && game % 2 == 1 {
            (config.o, config.x)
        } else {
            (config.x, config.o)
        };
        let outcome = play_game(x, o, rng)?;
        report.record(outcome, x, o);
    }
    info!(
        games = report.games,
        x_wins = report.x_wins,
        o_wins = report.o_wins,
        draws = report.draws,
        "Series finished"
    );
    Ok(report)
}
