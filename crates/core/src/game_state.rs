//! Game state module - the controller that owns one game session
//!
//! Ties together the board, the bag, the next queue, the hold slot and the
//! input-repeat timers. Collaborators feed it intents and elapsed time once per
//! frame through [`GameState::step`] and read it back through accessors or a
//! [`GameSnapshot`].
//!
//! Lifecycle of a piece: `Spawning -> Falling -> Locking -> Spawning`. A spawn
//! that collides ends the game (`GameOver`), which immediately resets the
//! session and keeps playing.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use crate::board::{Board, Offset};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::piece::Piece;
use crate::repeat::{Command, Direction, InputRepeat};
use crate::rng::Bag;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Intent, TETRIS_LINES};

/// Where the current piece is in its lifecycle
///
/// `Spawning`, `Locking` and `GameOver` only last for the duration of a single
/// lock or spawn inside one call. Between calls the phase is always `Falling`;
/// a lost game shows up as [`GameEvent::GameOver`] from
/// [`GameState::take_last_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    Spawning,
    #[default]
    Falling,
    Locking,
    GameOver,
}

/// Notable outcome of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Locked { lines: usize, tetris: bool },
    /// The next piece could not spawn; carries the final counters
    GameOver { lines: u32, tetrises: u32 },
}

/// Whether the caller should keep running frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    catalog: Arc<Catalog>,
    board: Board,
    bag: Bag,
    current: Piece,
    next_queue: VecDeque<Piece>,
    held: Option<Piece>,
    /// Set by a hold swap, cleared on lock
    held_this_turn: bool,
    repeat: InputRepeat,
    phase: Phase,
    score: u32,
    lines: u32,
    tetrises: u32,
    pieces_locked: u32,
    /// Finished games (game overs and restarts)
    games_played: u32,
    paused: bool,
    last_event: Option<GameEvent>,
}

impl GameState {
    /// Validate `config` and start a game
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let catalog = Arc::new(config.validate()?);
        let mut bag = match config.seed {
            Some(seed) => Bag::with_seed(catalog.len(), seed),
            None => Bag::new(catalog.len()),
        };
        let (current, next_queue) = deal(&catalog, &mut bag, &config);

        info!(
            width = config.width,
            height = config.height,
            pieces = catalog.len(),
            next = config.next_queue_len,
            "game created"
        );

        Ok(Self {
            board: Board::new(config.width, config.height),
            repeat: InputRepeat::new(config.repeat_intervals()),
            catalog,
            bag,
            current,
            next_queue,
            held: None,
            held_this_turn: false,
            phase: Phase::Falling,
            score: 0,
            lines: 0,
            tetrises: 0,
            pieces_locked: 0,
            games_played: 0,
            paused: false,
            last_event: None,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next_queue(&self) -> impl ExactSizeIterator<Item = &Piece> {
        self.next_queue.iter()
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// A hold swap is still available for the current piece
    pub fn can_hold(&self) -> bool {
        !self.held_this_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn tetrises(&self) -> u32 {
        self.tetrises
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn repeat(&self) -> &InputRepeat {
        &self.repeat
    }

    /// Take and clear the last lock / game-over event
    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    /// Row the current piece would land on if hard-dropped
    pub fn ghost_row(&self) -> i32 {
        self.current.row() + self.board.drop_distance(&self.current)
    }

    /// Run one frame: apply `intents` in order, then advance timers by `elapsed_ms`
    pub fn step(&mut self, intents: &[Intent], elapsed_ms: u32) -> Flow {
        for &intent in intents {
            if self.apply_intent(intent) == Flow::Quit {
                return Flow::Quit;
            }
        }
        self.tick(elapsed_ms);
        Flow::Continue
    }

    /// Apply a single intent
    ///
    /// Key transitions are always recorded, even while paused, so a key released
    /// during the pause does not stay stuck afterwards.
    pub fn apply_intent(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::MoveLeftDown => {
                let cmd = self.repeat.press(Direction::Left);
                self.run_immediate(cmd);
            }
            Intent::MoveLeftUp => self.repeat.release(Direction::Left),
            Intent::MoveRightDown => {
                let cmd = self.repeat.press(Direction::Right);
                self.run_immediate(cmd);
            }
            Intent::MoveRightUp => self.repeat.release(Direction::Right),
            Intent::SoftDropDown => {
                let cmd = self.repeat.press_soft_drop();
                self.run_immediate(cmd);
            }
            Intent::SoftDropUp => self.repeat.release_soft_drop(),
            Intent::RotateCw if !self.paused => {
                self.try_rotate(1);
            }
            Intent::RotateCcw if !self.paused => {
                self.try_rotate(-1);
            }
            Intent::HoldSwap if !self.paused => {
                self.swap_hold();
            }
            Intent::HardDrop if !self.paused => {
                self.hard_drop();
            }
            Intent::RotateCw | Intent::RotateCcw | Intent::HoldSwap | Intent::HardDrop => {}
            Intent::Pause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "pause toggled");
            }
            Intent::Restart => {
                info!(lines = self.lines, "restart requested");
                self.reset();
            }
            Intent::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Advance repeat and gravity timers and execute the commands that came due
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.paused {
            return;
        }
        for cmd in self.repeat.advance(elapsed_ms) {
            // A lock resets the timers; the rest of this batch belonged to the old piece.
            if self.execute(cmd) {
                break;
            }
        }
    }

    fn run_immediate(&mut self, cmd: Option<Command>) {
        if let Some(cmd) = cmd {
            if !self.paused {
                self.execute(cmd);
            }
        }
    }

    /// Returns true if the command locked the piece
    fn execute(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Left => {
                self.try_shift(-1);
                false
            }
            Command::Right => {
                self.try_shift(1);
                false
            }
            Command::Down => self.move_down(),
        }
    }

    /// Move the current piece `cols` columns; refused if it would collide
    pub fn try_shift(&mut self, cols: i32) -> bool {
        if self.board.has_collision(&self.current, Offset::new(0, cols, 0)) {
            return false;
        }
        self.current.translate(0, cols);
        true
    }

    /// Rotate the current piece by `amount` steps; refused if it would collide
    pub fn try_rotate(&mut self, amount: i32) -> bool {
        if self.board.has_collision(&self.current, Offset::new(0, 0, amount)) {
            return false;
        }
        self.current.rotate(amount);
        true
    }

    /// Move down one row, or lock in place if that is blocked
    ///
    /// Returns true if the piece locked.
    pub fn move_down(&mut self) -> bool {
        if self.board.has_collision(&self.current, Offset::DOWN) {
            self.lock_current();
            return true;
        }
        self.current.translate(1, 0);
        false
    }

    /// Drop to the lowest legal row and lock; returns lines cleared
    pub fn hard_drop(&mut self) -> usize {
        let distance = self.board.drop_distance(&self.current);
        self.current.translate(distance, 0);
        self.lock_current()
    }

    /// Swap the current piece with the hold slot, once per piece
    ///
    /// With a held piece that fits at its spawn position the two trade places.
    /// Otherwise the current piece goes into hold and the next queued piece
    /// spawns (a blocked held piece is dropped).
    pub fn swap_hold(&mut self) -> bool {
        if self.held_this_turn {
            return false;
        }
        self.held_this_turn = true;

        let mut outgoing = self.current.clone();
        outgoing.reset_to_spawn();

        match self.held.take() {
            Some(held) if !self.board.has_collision(&held, Offset::NONE) => {
                debug!(from = outgoing.kind(), to = held.kind(), "hold exchange");
                self.current = held;
                self.held = Some(outgoing);
            }
            _ => {
                debug!(kind = outgoing.kind(), "hold stash");
                self.held = Some(outgoing);
                self.spawn_next();
            }
        }
        true
    }

    fn lock_current(&mut self) -> usize {
        self.phase = Phase::Locking;
        let lines = self.board.lock_and_clear_lines(&self.current);
        let tetris = lines == TETRIS_LINES;

        self.lines += lines as u32;
        self.score += lines as u32;
        if tetris {
            self.tetrises += 1;
        }
        self.pieces_locked += 1;
        self.held_this_turn = false;
        self.repeat.reset_timers();
        self.last_event = Some(GameEvent::Locked { lines, tetris });
        debug!(piece = %self.current, lines, tetris, "piece locked");

        self.spawn_next();
        lines
    }

    fn spawn_next(&mut self) {
        self.phase = Phase::Spawning;
        self.current = self.pull_next();

        if self.board.has_collision(&self.current, Offset::NONE) {
            self.phase = Phase::GameOver;
            info!(
                lines = self.lines,
                tetrises = self.tetrises,
                pieces = self.pieces_locked,
                "game over"
            );
            self.last_event = Some(GameEvent::GameOver {
                lines: self.lines,
                tetrises: self.tetrises,
            });
            self.reset();
            return;
        }
        self.phase = Phase::Falling;
    }

    /// Front of the next queue, topping the queue back up from the bag
    fn pull_next(&mut self) -> Piece {
        let fresh = self.catalog.spawn_kind(self.bag.draw(), self.config.width);
        match self.next_queue.pop_front() {
            Some(front) => {
                self.next_queue.push_back(fresh);
                front
            }
            None => fresh,
        }
    }

    /// Clear the board, reshuffle the bag and zero every counter
    pub fn reset(&mut self) {
        self.board.clear();
        self.bag.refresh();
        let (current, next_queue) = deal(&self.catalog, &mut self.bag, &self.config);
        self.current = current;
        self.next_queue = next_queue;
        self.held = None;
        self.held_this_turn = false;
        self.repeat.reset_timers();
        self.score = 0;
        self.lines = 0;
        self.tetrises = 0;
        self.pieces_locked = 0;
        self.games_played += 1;
        self.paused = false;
        self.phase = Phase::Falling;
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        out.active = ActiveSnapshot {
            kind: self.current.kind(),
            rotation: self.current.rotation(),
            cells: self.current.cell_buf(),
        };
        let ghost_drop = self.board.drop_distance(&self.current);
        out.ghost = self
            .current
            .cells()
            .map(|(row, col)| (row + ghost_drop, col))
            .collect();

        out.next_queue = self.next_queue.iter().map(Piece::kind).collect();
        out.hold = self.held.as_ref().map(Piece::kind);
        out.can_hold = self.can_hold();
        out.paused = self.paused;
        out.score = self.score;
        out.lines = self.lines;
        out.tetrises = self.tetrises;
        out.games_played = self.games_played;
    }
}

/// Draw the current piece and a full next queue, in bag order
fn deal(catalog: &Catalog, bag: &mut Bag, config: &EngineConfig) -> (Piece, VecDeque<Piece>) {
    let current = catalog.spawn_kind(bag.draw(), config.width);
    let mut queue = VecDeque::with_capacity(config.next_queue_len + 1);
    for _ in 0..config.next_queue_len {
        queue.push_back(catalog.spawn_kind(bag.draw(), config.width));
    }
    (current, queue)
}
