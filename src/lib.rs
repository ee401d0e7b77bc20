//! Noughts - tic-tac-toe against a minimax AI
//!
//! The game rules, AI tiers and session state machine live in
//! [`noughts_engine`]. This crate adds what a running program needs around
//! them.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with CLI overrides
//! - **Pacing**: the AI's cosmetic thinking pause
//! - **Table**: async driver that pauses, then commits AI moves, dropping
//!   any that a reset made stale
//! - **Play**: line-oriented terminal front-end
//! - **Duel**: AI-versus-AI series
//!
//! # Example
//!
//! ```no_run
//! use noughts::{NoPause, Table};
//! use noughts_engine::{Session, SessionConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let table = Table::new(Session::seeded(SessionConfig::default(), 7), NoPause);
//! table.human_move(4).await?;
//! let state = table.ai_turn().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod duel;
pub mod pacing;
pub mod play;
pub mod table;

pub use config::{CONFIG_ENV, ConfigError, DEFAULT_CONFIG_FILE, NoughtsConfig};
pub use duel::{DuelConfig, SeriesReport, play_game, run_series};
pub use pacing::{NoPause, Pacing, ThinkingDelay};
pub use play::{PlayCommand, UnknownCommand, status_line};
pub use table::Table;
