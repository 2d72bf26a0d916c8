//! Configuration file loading

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tui_tetramino::config::{config_path, AppConfig};
use tui_tetramino::core::{ConfigError, GameState};

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn loads_all_tables() {
    let file = write_config(
        r#"
[engine]
width = 12
height = 24
gravity_interval_ms = 400
next_queue_len = 3
seed = 42

[view]
cell_width = 1
grid = false

[log]
filter = "debug"
file = "/tmp/game.log"
"#,
    );

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.engine.width, 12);
    assert_eq!(config.engine.height, 24);
    assert_eq!(config.engine.gravity_interval_ms, 400);
    assert_eq!(config.engine.next_queue_len, 3);
    assert_eq!(config.engine.seed, Some(42));
    assert_eq!(config.engine.soft_drop_interval_ms, 90);
    assert_eq!(config.view.cell_width, 1);
    assert!(!config.view.grid);
    assert_eq!(config.log.filter, "debug");
    assert_eq!(config.log.file_path(), Path::new("/tmp/game.log"));

    let state = GameState::new(config.engine).unwrap();
    assert_eq!(state.board().width(), 12);
    assert_eq!(state.next_queue().len(), 3);
}

#[test]
fn custom_pieces_from_file() {
    let file = write_config(
        r#"
[engine]
pieces = [
    [[1, 1, 1, 1]],
    [[1, 1, 0, 0], [1, 0, 1, 0]],
]
"#,
    );
    let config = AppConfig::load(file.path()).unwrap();
    let state = GameState::new(config.engine).unwrap();
    assert_eq!(state.catalog().len(), 2);
}

#[test]
fn invalid_values_fail_validation_not_parsing() {
    let file = write_config("[engine]\nnext_queue_len = 9\n");
    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(
        GameState::new(config.engine).unwrap_err(),
        ConfigError::NextQueueLen { len: 9, max: 6 }
    );
}

#[test]
fn malformed_toml_is_an_error() {
    let file = write_config("[engine\nwidth = ");
    let err = AppConfig::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("malformed configuration"));
}

#[test]
fn wrong_type_is_an_error() {
    let file = write_config("[engine]\nwidth = \"wide\"\n");
    assert!(AppConfig::load(file.path()).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = AppConfig::load(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn no_path_means_defaults() {
    assert_eq!(
        AppConfig::load_or_default(config_path(None, None).as_deref()).unwrap(),
        AppConfig::default()
    );
}

#[test]
fn printed_config_loads_back() {
    let mut config = AppConfig::default();
    config.engine.seed = Some(3);
    let text = config.to_toml_string().unwrap();
    assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
}
