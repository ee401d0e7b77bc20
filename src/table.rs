//! Async driver that paces AI turns around a shared session.

use crate::pacing::Pacing;
use noughts_engine::{
    Difficulty, FirstPlayer, GameMode, MoveError, Phase, Player, Session, SessionConfig,
    SessionState,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// A session plus the pause the AI takes before each move.
///
/// Cloning is cheap and every clone drives the same game. The lock is not
/// held while the AI thinks, so the board can be read, or the game reset,
/// during the pause. A reset during the pause wins: the pending AI move is
/// dropped.
pub struct Table<P> {
    session: Arc<Mutex<Session>>,
    pacing: Arc<P>,
}

impl<P> Clone for Table<P> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            pacing: Arc::clone(&self.pacing),
        }
    }
}

impl<P: Pacing + 'static> Table<P> {
    /// Wraps a session.
    #[instrument(skip_all)]
    pub fn new(session: Session, pacing: P) -> Self {
        info!(config = ?session.config(), "Opening table");
        Self {
            session: Arc::new(Mutex::new(session)),
            pacing: Arc::new(pacing),
        }
    }

    /// The pacing in use.
    pub fn pacing(&self) -> &P {
        &self.pacing
    }

    /// Snapshot of the game.
    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    /// Current settings.
    pub async fn config(&self) -> SessionConfig {
        *self.session.lock().await.config()
    }

    /// The AI's mark, or `None` when two humans are playing.
    pub async fn ai_player(&self) -> Option<Player> {
        self.session.lock().await.ai_player()
    }

    /// True when the AI is due to move and has not started thinking.
    pub async fn is_ai_turn(&self) -> bool {
        let session = self.session.lock().await;
        session.phase() == Phase::AwaitingAiMove && !session.is_thinking()
    }

    /// Plays a human move at `index` (0-8).
    #[instrument(skip(self))]
    pub async fn human_move(&self, index: usize) -> Result<SessionState, MoveError> {
        self.session.lock().await.apply_human_move(index)
    }

    /// Runs one AI turn: choose, pause, then play.
    ///
    /// Returns `Ok(None)` if the game was reset during the pause; the chosen
    /// move is discarded rather than played on the new board.
    #[instrument(skip(self))]
    pub async fn ai_turn(&self) -> Result<Option<SessionState>, MoveError> {
        let ticket = self.session.lock().await.request_ai_move()?;
        debug!(action = %ticket.action(), "AI chose a move, pausing");

        self.pacing.think().await;

        match self.session.lock().await.commit_ai_move(ticket) {
            Ok(state) => Ok(Some(state)),
            Err(MoveError::StaleTicket) => {
                info!(action = %ticket.action(), "Game reset while AI was thinking");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs [`Table::ai_turn`] on a background task.
    pub fn spawn_ai_turn(&self) -> JoinHandle<Result<Option<SessionState>, MoveError>> {
        let table = self.clone();
        tokio::spawn(async move { table.ai_turn().await })
    }

    /// Starts a fresh game.
    pub async fn reset(&self) -> SessionState {
        self.session.lock().await.reset()
    }

    /// Changes mode and difficulty, starting a fresh game.
    pub async fn configure(&self, mode: GameMode, difficulty: Difficulty) -> SessionState {
        self.session.lock().await.configure(mode, difficulty)
    }

    /// Changes who opens against the AI, starting a fresh game.
    pub async fn set_first_player(&self, first_player: FirstPlayer) -> SessionState {
        self.session.lock().await.set_first_player(first_player)
    }
}
