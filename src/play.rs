//! Line-oriented terminal front-end.
//!
//! Reads one command per line and prints the board after every change. The
//! game itself lives in [`Table`]; this module only translates text.

use crate::pacing::Pacing;
use crate::table::Table;
use anyhow::{Context, Result};
use derive_more::{Display, Error};
use noughts_engine::{
    Difficulty, FirstPlayer, GameMode, GameOutcome, Phase, Player, Position, SessionState,
};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, warn};

const HELP: &str = "\
Commands:
  1-9 or a square name   play there (e.g. 5, center, top-left)
  reset                  start a new game
  mode pvp|pve           two players, or play the AI
  difficulty easy|medium|hard
  first human|ai         who plays X against the AI
  swap                   let the other side open
  help                   show this text
  quit                   leave";

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Place a mark.
    Place(Position),
    /// Start over.
    Reset,
    /// Switch between two players and playing the AI.
    Mode(GameMode),
    /// Change AI strength.
    Difficulty(Difficulty),
    /// Change who opens against the AI.
    First(FirstPlayer),
    /// Hand the opening move to the other side.
    Swap,
    /// Print the command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized input: {input:?} (type 'help' for commands)")]
pub struct UnknownCommand {
    /// What the player typed.
    pub input: String,
}

impl FromStr for PlayCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCommand {
            input: s.trim().to_string(),
        };
        let mut words = s.split_whitespace();
        let head = words.next().ok_or_else(unknown)?.to_lowercase();
        let arg = words.next();

        let command = match (head.as_str(), arg) {
            ("quit" | "exit" | "q", None) => PlayCommand::Quit,
            ("reset" | "new", None) => PlayCommand::Reset,
            ("help" | "?", None) => PlayCommand::Help,
            ("swap", None) => PlayCommand::Swap,
            ("mode", Some(arg)) => PlayCommand::Mode(arg.parse().map_err(|_| unknown())?),
            ("difficulty" | "level", Some(arg)) => {
                PlayCommand::Difficulty(arg.parse().map_err(|_| unknown())?)
            }
            ("first", Some(arg)) => PlayCommand::First(arg.parse().map_err(|_| unknown())?),
            _ => PlayCommand::Place(Position::from_label_or_number(s).ok_or_else(unknown)?),
        };
        Ok(command)
    }
}

/// Describes whose turn it is, or how the game ended.
pub fn status_line(state: &SessionState, ai: Option<Player>) -> String {
    match state.outcome() {
        GameOutcome::Won(winner) if Some(*winner) == ai => format!("{} (AI) wins.", winner),
        GameOutcome::Won(winner) => format!("{} wins!", winner),
        GameOutcome::Draw => "Draw.".to_string(),
        GameOutcome::InProgress if *state.phase() == Phase::AwaitingAiMove => {
            format!("{} (AI) to move.", state.to_move())
        }
        GameOutcome::InProgress => format!("{} to move.", state.to_move()),
    }
}

/// Drives a game from `input` until it ends or the player quits.
#[instrument(skip_all)]
pub async fn run<P, R, W>(table: &Table<P>, input: R, output: &mut W) -> Result<()>
where
    P: Pacing + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut screen = Screen { output };

    screen.say(HELP).await?;
    screen.show(&table.state().await, table).await?;

    loop {
        while table.is_ai_turn().await {
            screen.say("AI is thinking...").await?;
            match table.ai_turn().await {
                Ok(Some(state)) => screen.show(&state, table).await?,
                Ok(None) => debug!("AI move discarded"),
                Err(e) => {
                    warn!(error = %e, "AI turn failed");
                    screen.say(&e.to_string()).await?;
                    break;
                }
            }
        }

        screen.prompt().await?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            debug!("Input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(e) => {
                screen.say(&e.to_string()).await?;
                continue;
            }
        };
        debug!(?command, "Player command");

        let state = match command {
            PlayCommand::Quit => break,
            PlayCommand::Help => {
                screen.say(HELP).await?;
                continue;
            }
            PlayCommand::Place(pos) => match table.human_move(pos.to_index()).await {
                Ok(state) => state,
                Err(e) => {
                    screen.say(&e.to_string()).await?;
                    continue;
                }
            },
            PlayCommand::Reset => table.reset().await,
            PlayCommand::Mode(mode) => {
                let difficulty = *table.state().await.difficulty();
                table.configure(mode, difficulty).await
            }
            PlayCommand::Difficulty(difficulty) => {
                let mode = *table.state().await.mode();
                table.configure(mode, difficulty).await
            }
            PlayCommand::First(first) => table.set_first_player(first).await,
            PlayCommand::Swap => {
                let first = table.config().await.first_player().toggle();
                table.set_first_player(first).await
            }
        };
        screen.show(&state, table).await?;
    }

    screen.say("Bye.").await?;
    Ok(())
}

struct Screen<'a, W> {
    output: &'a mut W,
}

impl<W: AsyncWrite + Unpin> Screen<'_, W> {
    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn prompt(&mut self) -> Result<()> {
        self.output.write_all(b"> ").await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn show<P: Pacing + 'static>(
        &mut self,
        state: &SessionState,
        table: &Table<P>,
    ) -> Result<()> {
        let ai = table.ai_player().await;
        let header = match state.mode() {
            GameMode::PlayerVsPlayer => "Two players".to_string(),
            GameMode::PlayerVsAi => format!(
                "Versus AI ({}), {} opens",
                state.difficulty(),
                table.config().await.first_player().label()
            ),
        };
        let text = format!(
            "\n{}\n{}\n{}",
            header,
            state.board().display(),
            status_line(state, ai)
        );
        self.say(&text).await
    }
}
