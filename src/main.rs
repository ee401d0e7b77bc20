//! Noughts - terminal tic-tac-toe

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use noughts::cli::{Cli, Command};
use noughts::{
    CONFIG_ENV, DuelConfig, NoPause, NoughtsConfig, Table, ThinkingDelay, play, run_series,
};
use noughts_engine::{Difficulty, FirstPlayer, GameMode, Session};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    let config = NoughtsConfig::discover(config_path.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            first,
            seed,
            delay_ms,
        } => {
            let config = apply_overrides(config, mode, difficulty, first, seed, delay_ms);
            run_play(config).await
        }
        Command::Duel {
            x,
            o,
            games,
            swap_sides,
            seed,
            json,
        } => {
            let duel = DuelConfig::default()
                .with_x(x)
                .with_o(o)
                .with_games(games)
                .with_swap_sides(swap_sides);
            run_duel(duel, seed.or(*config.seed()), json)
        }
    }
}

/// Layers command-line flags over file settings.
fn apply_overrides(
    mut config: NoughtsConfig,
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    first: Option<FirstPlayer>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
) -> NoughtsConfig {
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(difficulty) = difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(first) = first {
        config = config.with_first_player(first);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = delay_ms {
        config = config.with_delay_min_ms(ms).with_delay_max_ms(ms);
    }
    config
}

/// Runs the terminal game on stdin/stdout.
#[instrument(skip_all, fields(mode = %config.mode(), difficulty = %config.difficulty()))]
async fn run_play(config: NoughtsConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let session = match config.seed() {
        Some(seed) => Session::seeded(config.session(), *seed),
        None => Session::from_entropy(config.session()),
    };
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    let (min, max) = config.delay_bounds();
    if max == Duration::ZERO {
        info!("Playing without AI pause");
        play::run(&Table::new(session, NoPause), input, &mut output).await
    } else {
        let table = Table::new(session, ThinkingDelay::new(min, max));
        play::run(&table, input, &mut output).await
    }
}

/// Runs an AI-versus-AI series and prints the tallies.
#[instrument(skip(duel))]
fn run_duel(duel: DuelConfig, seed: Option<u64>, json: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = run_series(duel, &mut rng).context("Series aborted")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode report")?
        );
    } else {
        println!(
            "{} games, {} (X) vs {} (O){}",
            report.games(),
            duel.x(),
            duel.o(),
            if *duel.swap_sides() { ", swapping sides" } else { "" }
        );
        println!(
            "X wins: {}  O wins: {}  draws: {}",
            report.x_wins(),
            report.o_wins(),
            report.draws()
        );
        for (tier, wins) in report.wins_by_tier() {
            println!("  {}: {} wins", tier, wins);
        }
    }
    Ok(())
}
