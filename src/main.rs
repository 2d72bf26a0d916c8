//! Terminal runner (default binary).
//!
//! Loads the configuration, validates the engine settings before touching the
//! terminal, then runs a fixed-rate loop: gather key events until the next
//! tick is due, step the engine once, draw the snapshot.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_tetramino::config::{config_path, AppConfig, LogConfig, CONFIG_ENV};
use tui_tetramino::core::{Flow, GameEvent, GameSnapshot, GameState};
use tui_tetramino::input::{map_key_event, Intents, KeyReleaseTracker};
use tui_tetramino::term::{GameView, TerminalRenderer, Viewport};

#[derive(Debug, Parser)]
#[command(name = "tui-tetramino", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    /// TOML configuration file (defaults to $TETRAMINO_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the piece bag; omit for a random game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = config_path(cli.config, std::env::var_os(CONFIG_ENV));
    let mut config = AppConfig::load_or_default(path.as_deref())?;
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(file) = cli.log_file {
        config.log.file = Some(file);
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    init_logging(&config.log)?;
    info!(config = ?path, "starting");

    let game = GameState::new(config.engine.clone()).context("invalid engine configuration")?;
    let view = config.view.game_view();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = term
        .enable_key_release_events()
        .and_then(|release_events| run(&mut term, game, view, release_events));

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "restoring terminal failed");
    }
    result
}

fn init_logging(log: &LogConfig) -> Result<()> {
    let path = log.file_path();
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log.filter)
            .with_context(|| format!("invalid log filter {:?}", log.filter))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing logger: {err}"))
}

fn run(
    term: &mut TerminalRenderer,
    mut game: GameState,
    view: GameView,
    release_events: bool,
) -> Result<()> {
    let tick = Duration::from_millis(u64::from(game.config().tick_ms()));
    info!(tick_ms = tick.as_millis() as u64, release_events, "entering game loop");

    // Without real key releases, held keys are let go after a quiet period.
    let mut tracker = (!release_events).then(KeyReleaseTracker::new);
    let mut snapshot = GameSnapshot::default();
    let mut intents = Intents::new();
    let mut last_tick = Instant::now();
    let mut carry = Duration::ZERO;

    loop {
        // Render.
        game.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut frame = term.begin_frame(w, h);
        view.render_into(&snapshot, game.catalog(), Viewport::new(w, h), frame.surface());
        frame.present()?;

        // Input until the next tick is due.
        loop {
            let timeout = tick.saturating_sub(last_tick.elapsed());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    let Some(intent) = map_key_event(key) else {
                        continue;
                    };
                    if let Some(tracker) = tracker.as_mut() {
                        tracker.observe(intent, Instant::now());
                    }
                    if intents.try_push(intent).is_err() {
                        warn!(intent = intent.as_str(), "too many intents in one tick, dropped");
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now = Instant::now();
        let elapsed = now.duration_since(last_tick) + carry;
        last_tick = now;
        let elapsed_ms = elapsed.as_millis().min(u128::from(u32::MAX)) as u32;
        carry = elapsed.saturating_sub(Duration::from_millis(u64::from(elapsed_ms)));

        if let Some(tracker) = tracker.as_mut() {
            tracker.expire(now, &mut intents);
        }

        let flow = game.step(&intents, elapsed_ms);
        intents.clear();

        if let Some(GameEvent::Locked { lines, tetris: true }) = game.take_last_event() {
            debug!(lines, total = game.tetrises(), "tetris");
        }
        if flow == Flow::Quit {
            info!(lines = game.lines(), games = game.games_played(), "quit");
            return Ok(());
        }
    }
}
