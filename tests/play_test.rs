//! Scripted terminal sessions.

use noughts::{NoPause, Table, play};
use noughts_engine::{Difficulty, FirstPlayer, GameMode, Position, Session, SessionConfig};

async fn run_script<P: noughts::Pacing + 'static>(table: &Table<P>, script: &str) -> String {
    let mut output = Vec::new();
    play::run(table, script.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_two_player_script() {
    let config = SessionConfig::default().with_mode(GameMode::PlayerVsPlayer);
    let table = Table::new(Session::seeded(config, 1), NoPause);

    let output = run_script(&table, "5\n5\nbogus\n\ntop-left\nquit\n").await;

    assert!(output.contains("already occupied"));
    assert!(output.contains("Unrecognized input"));
    assert!(output.contains("Bye."));
    let state = table.state().await;
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.history()[1].position, Position::TopLeft);
}

#[tokio::test]
async fn test_ai_opens_before_first_prompt() {
    let config = SessionConfig::default()
        .with_difficulty(Difficulty::Hard)
        .with_first_player(FirstPlayer::Ai);
    let table = Table::new(Session::seeded(config, 2), NoPause);

    let output = run_script(&table, "quit\n").await;

    assert!(output.contains("AI is thinking"));
    let state = table.state().await;
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history()[0].position, Position::Center);
}

#[tokio::test]
async fn test_settings_commands_restart_game() {
    let table = Table::new(Session::seeded(SessionConfig::default(), 4), NoPause);

    let output = run_script(&table, "1\ndifficulty easy\nmode pvp\n").await;

    assert!(output.contains("Two players"));
    let state = table.state().await;
    assert!(state.history().is_empty());
    assert_eq!(*state.mode(), GameMode::PlayerVsPlayer);
    assert_eq!(*state.difficulty(), Difficulty::Easy);
}

#[tokio::test]
async fn test_swap_hands_opening_to_ai() {
    let config = SessionConfig::default().with_difficulty(Difficulty::Hard);
    let table = Table::new(Session::seeded(config, 6), NoPause);

    let output = run_script(&table, "swap\nquit\n").await;

    assert!(output.contains("AI opens"));
    assert_eq!(*table.config().await.first_player(), FirstPlayer::Ai);
    assert_eq!(table.state().await.history().len(), 1);
}

#[tokio::test]
async fn test_closed_input_ends_cleanly() {
    let table = Table::new(Session::seeded(SessionConfig::default(), 5), NoPause);
    let output = run_script(&table, "").await;
    assert!(output.contains("Bye."));
}
