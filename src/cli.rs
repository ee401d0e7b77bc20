//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_engine::{Difficulty, FirstPlayer, GameMode};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a minimax AI
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe in the terminal with three AI tiers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (overrides NOUGHTS_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// pvp or pve
        #[arg(long)]
        mode: Option<GameMode>,

        /// easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// human or ai
        #[arg(long)]
        first: Option<FirstPlayer>,

        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed AI thinking pause in milliseconds (0 for none)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Pit two AI tiers against each other
    Duel {
        /// Tier playing X
        #[arg(short, long, default_value = "hard")]
        x: Difficulty,

        /// Tier playing O
        #[arg(short, long, default_value = "medium")]
        o: Difficulty,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Trade sides after every game
        #[arg(long)]
        swap_sides: bool,

        /// Seed for reproducible series
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
