//! Falling-block puzzle game (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under one name and holds
//! the application configuration shared by the binary and its tests.

pub mod config;

pub use tui_tetramino_core as core;
pub use tui_tetramino_input as input;
pub use tui_tetramino_term as term;
pub use tui_tetramino_types as types;

pub use config::{AppConfig, LogConfig, ViewConfig};
