//! Loading settings from TOML files.

use noughts::NoughtsConfig;
use noughts_engine::{Difficulty, FirstPlayer, GameMode};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
mode = "pvp"
difficulty = "hard"
first_player = "ai"
delay_min_ms = 100
delay_max_ms = 200
seed = 42
"#,
    );

    let config = NoughtsConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.mode(), GameMode::PlayerVsPlayer);
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(*config.first_player(), FirstPlayer::Ai);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(
        config.delay_bounds(),
        (Duration::from_millis(100), Duration::from_millis(200))
    );
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = write_config("difficulty = \"easy\"\n");
    let config = NoughtsConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.difficulty(), Difficulty::Easy);
    assert_eq!(*config.mode(), GameMode::PlayerVsAi);
    assert_eq!(*config.delay_max_ms(), 1000);
    assert_eq!(*config.seed(), None);
}

#[test]
fn test_bad_values_are_errors() {
    let file = write_config("difficulty = \"impossible\"\n");
    let err = NoughtsConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));

    let file = write_config("delay_min_ms = 900\ndelay_max_ms = 10\n");
    assert!(NoughtsConfig::from_file(file.path()).is_err());
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(NoughtsConfig::discover(Some(missing.as_path())).is_err());
}
