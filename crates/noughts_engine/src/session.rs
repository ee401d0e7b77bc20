//! Game session controller.
//!
//! A [`Session`] owns the board and is the only thing that mutates it. It
//! moves between three phases:
//!
//! ```text
//!  AwaitingHumanMove --human move--> AwaitingAiMove (PvE) / AwaitingHumanMove (PvP)
//!  AwaitingAiMove    --AI commit---> AwaitingHumanMove
//!  any               --game ends---> Terminal
//!  any               --reset-------> initial phase, empty board
//! ```
//!
//! The AI's turn is split in two so a caller can pause between choosing and
//! playing: [`Session::request_ai_move`] hands out an [`AiTicket`], and
//! [`Session::commit_ai_move`] plays it. Each reset starts a new generation,
//! and a ticket from an older generation is refused instead of landing on
//! the new board.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::policy::Difficulty;
use super::rules::evaluate;
use super::settings::{FirstPlayer, GameMode, SessionConfig};
use super::{Board, GameOutcome, Player, Position};
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// A human may move.
    AwaitingHumanMove,
    /// The AI is due to move; human input is refused.
    AwaitingAiMove,
    /// The game is won or drawn; only a reset is accepted.
    Terminal,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionState {
    /// The board.
    pub(crate) board: Board,
    /// Won, drawn, or still going.
    pub(crate) outcome: GameOutcome,
    /// Side to move. Left on the last mover once the game ends.
    pub(crate) to_move: Player,
    /// Turn-cycle phase.
    pub(crate) phase: Phase,
    /// Whether an AI move has been chosen but not yet played.
    pub(crate) thinking: bool,
    /// Human versus human, or human versus AI.
    pub(crate) mode: GameMode,
    /// AI strength.
    pub(crate) difficulty: Difficulty,
    /// Moves played so far, oldest first.
    pub(crate) history: Vec<Move>,
}

/// An AI move chosen but not yet played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct AiTicket {
    /// Session generation the move was chosen in.
    generation: u64,
    /// The move to play.
    action: Move,
}

/// Turn-based tic-tac-toe session with an optional AI opponent.
///
/// Randomness for the Easy and Medium tiers comes from `R`, so a seeded
/// generator replays the same game.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    board: Board,
    to_move: Player,
    outcome: GameOutcome,
    phase: Phase,
    history: Vec<Move>,
    config: SessionConfig,
    pending: Option<AiTicket>,
    generation: u64,
    rng: R,
}

impl Session<StdRng> {
    /// Creates a session whose AI draws from a fixed seed.
    pub fn seeded(config: SessionConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a session seeded from the operating system.
    pub fn from_entropy(config: SessionConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session with an empty board and X to move.
    #[instrument(skip(rng))]
    pub fn new(config: SessionConfig, rng: R) -> Self {
        info!("Creating new game session");
        let mut session = Self {
            board: Board::new(),
            to_move: Player::X,
            outcome: GameOutcome::InProgress,
            phase: Phase::AwaitingHumanMove,
            history: Vec::new(),
            config,
            pending: None,
            generation: 0,
            rng,
        };
        session.phase = session.opening_phase();
        session
    }

    /// Current settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while an AI ticket is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// The AI's mark, or `None` when two humans are playing.
    pub fn ai_player(&self) -> Option<Player> {
        match self.config.mode() {
            GameMode::PlayerVsPlayer => None,
            GameMode::PlayerVsAi => Some(match self.config.first_player() {
                FirstPlayer::Human => Player::O,
                FirstPlayer::Ai => Player::X,
            }),
        }
    }

    /// Snapshot of the session.
    pub fn state(&self) -> SessionState {
        SessionState {
            board: self.board,
            outcome: self.outcome,
            to_move: self.to_move,
            phase: self.phase,
            thinking: self.is_thinking(),
            mode: *self.config.mode(),
            difficulty: *self.config.difficulty(),
            history: self.history.clone(),
        }
    }

    /// Plays a human move at `index` (0-8).
    ///
    /// Rejected moves leave the session untouched.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] for an index past 8.
    /// - [`MoveError::GameOver`] once the game has ended.
    /// - [`MoveError::WrongPlayer`] while the AI is due to move.
    /// - [`MoveError::SquareOccupied`] for a taken square.
    #[instrument(skip(self), fields(phase = %self.phase, to_move = %self.to_move))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<SessionState, MoveError> {
        let position = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Move out of bounds");
            MoveError::OutOfBounds { index }
        })?;

        match self.phase {
            Phase::Terminal => {
                warn!(%position, "Move after game over");
                return Err(MoveError::GameOver);
            }
            Phase::AwaitingAiMove => {
                let player = self.to_move.opponent();
                warn!(%position, %player, "Human tried to move on the AI's turn");
                return Err(MoveError::WrongPlayer { player });
            }
            Phase::AwaitingHumanMove => {}
        }

        self.apply(Move::new(self.to_move, position))
    }

    /// Chooses the AI's move without playing it.
    ///
    /// The session counts as thinking until the ticket is committed or a
    /// reset discards it.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game has ended.
    /// - [`MoveError::WrongPlayer`] when it is a human's turn.
    /// - [`MoveError::Busy`] if a ticket is already outstanding.
    /// - [`MoveError::NoMoveAvailable`] if the policy finds no square.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn request_ai_move(&mut self) -> Result<AiTicket, MoveError> {
        match self.phase {
            Phase::Terminal => return Err(MoveError::GameOver),
            Phase::AwaitingHumanMove => {
                warn!(to_move = %self.to_move, "AI move requested on a human turn");
                return Err(MoveError::WrongPlayer {
                    player: self.to_move.opponent(),
                });
            }
            Phase::AwaitingAiMove => {}
        }
        if self.pending.is_some() {
            debug!("AI move already in flight");
            return Err(MoveError::Busy);
        }

        let position = self
            .config
            .difficulty()
            .select_move(&self.board, self.to_move, &mut self.rng)
            .ok_or(MoveError::NoMoveAvailable)?;
        let ticket = AiTicket {
            generation: self.generation,
            action: Move::new(self.to_move, position),
        };
        debug!(action = %ticket.action, "AI move chosen");
        self.pending = Some(ticket);
        Ok(ticket)
    }

    /// Plays a ticket from [`Session::request_ai_move`].
    ///
    /// # Errors
    ///
    /// [`MoveError::StaleTicket`] if the ticket is not the one outstanding,
    /// which is the case after any reset.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn commit_ai_move(&mut self, ticket: AiTicket) -> Result<SessionState, MoveError> {
        if self.pending != Some(ticket) {
            debug!(
                ticket_generation = ticket.generation,
                "Discarding stale AI move"
            );
            return Err(MoveError::StaleTicket);
        }
        self.pending = None;
        self.apply(ticket.action)
    }

    /// Chooses and plays the AI's move with no pause in between.
    pub fn play_ai_turn(&mut self) -> Result<SessionState, MoveError> {
        let ticket = self.request_ai_move()?;
        self.commit_ai_move(ticket)
    }

    /// Changes mode and difficulty, starting a fresh game.
    #[instrument(skip(self))]
    pub fn configure(&mut self, mode: GameMode, difficulty: Difficulty) -> SessionState {
        self.config = self.config.with_mode(mode).with_difficulty(difficulty);
        self.reset()
    }

    /// Changes who opens against the AI, starting a fresh game.
    #[instrument(skip(self))]
    pub fn set_first_player(&mut self, first_player: FirstPlayer) -> SessionState {
        self.config = self.config.with_first_player(first_player);
        self.reset()
    }

    /// Starts a fresh game with the current settings.
    ///
    /// Any outstanding AI ticket becomes stale.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) -> SessionState {
        self.board = Board::new();
        self.to_move = Player::X;
        self.outcome = GameOutcome::InProgress;
        self.history.clear();
        self.pending = None;
        self.generation += 1;
        self.phase = self.opening_phase();
        info!(generation = self.generation, phase = %self.phase, "Session reset");
        self.state()
    }

    fn opening_phase(&self) -> Phase {
        self.phase_for(Player::X)
    }

    fn phase_for(&self, mover: Player) -> Phase {
        if self.ai_player() == Some(mover) {
            Phase::AwaitingAiMove
        } else {
            Phase::AwaitingHumanMove
        }
    }

    fn apply(&mut self, action: Move) -> Result<SessionState, MoveError> {
        let before = self.state();
        MoveContract::pre(&before, &action).inspect_err(|e| {
            warn!(%action, error = %e, "Invalid move");
        })?;

        self.board.place(action.position, action.player);
        self.history.push(action);
        self.outcome = evaluate(&self.board);
        if self.outcome.is_terminal() {
            self.phase = Phase::Terminal;
        } else {
            self.to_move = action.player.opponent();
            self.phase = self.phase_for(self.to_move);
        }

        let after = self.state();
        #[cfg(debug_assertions)]
        MoveContract::post(&before, &after)?;

        info!(%action, outcome = %self.outcome, phase = %self.phase, "Move applied");
        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pve(difficulty: Difficulty) -> Session {
        Session::seeded(SessionConfig::default().with_difficulty(difficulty), 11)
    }

    #[test]
    fn test_new_session_waits_for_human() {
        let session = pve(Difficulty::Hard);
        let state = session.state();
        assert_eq!(*state.phase(), Phase::AwaitingHumanMove);
        assert_eq!(*state.to_move(), Player::X);
        assert_eq!(*state.board(), Board::new());
        assert!(!state.thinking());
    }

    #[test]
    fn test_human_move_hands_turn_to_ai() {
        let mut session = pve(Difficulty::Hard);
        let state = session.apply_human_move(4).unwrap();
        assert_eq!(*state.phase(), Phase::AwaitingAiMove);
        assert_eq!(*state.to_move(), Player::O);
    }

    #[test]
    fn test_human_cannot_move_during_ai_turn() {
        let mut session = pve(Difficulty::Hard);
        session.apply_human_move(4).unwrap();
        let before = session.state();
        assert_eq!(
            session.apply_human_move(0),
            Err(MoveError::WrongPlayer { player: Player::X })
        );
        assert_eq!(session.state(), before);
    }

    #[test]
    fn test_ai_request_refused_on_human_turn() {
        let mut session = pve(Difficulty::Easy);
        assert!(matches!(
            session.request_ai_move(),
            Err(MoveError::WrongPlayer { .. })
        ));
        assert!(!session.is_thinking());
    }

    #[test]
    fn test_second_request_is_busy() {
        let mut session = pve(Difficulty::Medium);
        session.apply_human_move(0).unwrap();
        let ticket = session.request_ai_move().unwrap();
        assert!(session.state().thinking);
        assert_eq!(session.request_ai_move(), Err(MoveError::Busy));
        session.commit_ai_move(ticket).unwrap();
        assert!(!session.is_thinking());
    }

    #[test]
    fn test_ticket_cannot_be_committed_twice() {
        let mut session = pve(Difficulty::Hard);
        session.apply_human_move(0).unwrap();
        let ticket = session.request_ai_move().unwrap();
        session.commit_ai_move(ticket).unwrap();
        let before = session.state();
        assert_eq!(session.commit_ai_move(ticket), Err(MoveError::StaleTicket));
        assert_eq!(session.state(), before);
    }

    #[test]
    fn test_reset_discards_in_flight_ticket() {
        let mut session = pve(Difficulty::Hard);
        session.apply_human_move(0).unwrap();
        let ticket = session.request_ai_move().unwrap();
        let fresh = session.reset();
        assert_eq!(session.commit_ai_move(ticket), Err(MoveError::StaleTicket));
        assert_eq!(session.state(), fresh);
        assert_eq!(*fresh.board(), Board::new());
    }

    #[test]
    fn test_ai_first_opens_in_center_on_hard() {
        let config = SessionConfig::default()
            .with_difficulty(Difficulty::Hard)
            .with_first_player(FirstPlayer::Ai);
        let mut session = Session::seeded(config, 0);
        assert_eq!(session.phase(), Phase::AwaitingAiMove);
        assert_eq!(session.ai_player(), Some(Player::X));
        let state = session.play_ai_turn().unwrap();
        assert_eq!(
            state.history().first().copied(),
            Some(Move::new(Player::X, Position::Center))
        );
        assert_eq!(*state.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_pvp_alternates_humans() {
        let config = SessionConfig::default().with_mode(GameMode::PlayerVsPlayer);
        let mut session = Session::seeded(config, 0);
        assert_eq!(session.ai_player(), None);
        let state = session.apply_human_move(0).unwrap();
        assert_eq!(*state.phase(), Phase::AwaitingHumanMove);
        assert_eq!(*state.to_move(), Player::O);
        let state = session.apply_human_move(4).unwrap();
        assert_eq!(*state.to_move(), Player::X);
    }

    #[test]
    fn test_terminal_refuses_moves() {
        let config = SessionConfig::default().with_mode(GameMode::PlayerVsPlayer);
        let mut session = Session::seeded(config, 0);
        for index in [0, 3, 1, 4, 2] {
            session.apply_human_move(index).unwrap();
        }
        let state = session.state();
        assert_eq!(*state.outcome(), GameOutcome::Won(Player::X));
        assert_eq!(*state.phase(), Phase::Terminal);
        assert_eq!(session.apply_human_move(8), Err(MoveError::GameOver));
        assert_eq!(session.state(), state);
    }

    #[test]
    fn test_configure_resets_board() {
        let mut session = pve(Difficulty::Easy);
        session.apply_human_move(4).unwrap();
        let state = session.configure(GameMode::PlayerVsPlayer, Difficulty::Hard);
        assert_eq!(*state.board(), Board::new());
        assert_eq!(*state.mode(), GameMode::PlayerVsPlayer);
        assert_eq!(*state.difficulty(), Difficulty::Hard);
        assert!(state.history().is_empty());
    }
}
