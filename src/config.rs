//! Application configuration loaded from TOML.
//!
//! ```toml
//! [engine]
//! width = 10
//! height = 22
//! gravity_interval_ms = 500
//! seed = 42
//!
//! [view]
//! cell_width = 2
//! ghost = true
//!
//! [log]
//! filter = "tui_tetramino_core=debug,info"
//! file = "/tmp/tetramino.log"
//! ```
//!
//! Every table and every key is optional.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::EngineConfig;
use crate::term::GameView;

/// Environment variable naming the config file when `--config` is absent
pub const CONFIG_ENV: &str = "TETRAMINO_CONFIG";

const DEFAULT_LOG_FILE: &str = "tui-tetramino.log";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub view: ViewConfig,
    pub log: LogConfig,
}

/// How the board is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Terminal columns per board cell
    pub cell_width: u16,
    /// Terminal rows per board cell
    pub cell_height: u16,
    pub ghost: bool,
    pub grid: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_width: 2,
            cell_height: 1,
            ghost: true,
            grid: true,
        }
    }
}

impl ViewConfig {
    pub fn game_view(&self) -> GameView {
        GameView::new(self.cell_width, self.cell_height)
            .with_ghost(self.ghost)
            .with_grid(self.grid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` wins when set
    pub filter: String,
    /// Log destination; the terminal is in raw mode, so logs never go to stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    pub fn file_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("malformed configuration")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load `path` if there is one, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Config file to use: the CLI flag, else the environment value
pub fn config_path(cli: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
    cli.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = AppConfig::from_toml_str("[engine]\nseed = 7\n\n[view]\nghost = false\n").unwrap();
        assert_eq!(config.engine.seed, Some(7));
        assert_eq!(config.engine.width, 10);
        assert!(!config.view.ghost);
        assert_eq!(config.view.cell_width, 2);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn cli_path_beats_environment() {
        let cli = Some(PathBuf::from("a.toml"));
        let env = Some(OsString::from("b.toml"));
        assert_eq!(config_path(cli, env.clone()), Some(PathBuf::from("a.toml")));
        assert_eq!(config_path(None, env), Some(PathBuf::from("b.toml")));
        assert_eq!(config_path(None, Some(OsString::new())), None);
        assert_eq!(config_path(None, None), None);
    }
}
