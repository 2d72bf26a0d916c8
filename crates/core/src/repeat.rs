//! Input-repeat state machine
//!
//! Turns key transitions plus elapsed time into a stream of movement commands.
//! Holding a key has to look exactly like tapping it at a steady rate, so each
//! axis keeps an accumulator: time is added every tick, a command fires each
//! time the accumulator reaches the interval, and the interval is subtracted
//! (not reset) so overshoot carries into the next repeat.
//!
//! Gravity shares the downward accumulator with soft drop. It always runs; the
//! soft-drop key only swaps in the shorter interval.

use arrayvec::ArrayVec;

/// Upper bound on commands produced by one `advance` call
pub const MAX_COMMANDS_PER_TICK: usize = 32;

/// A movement request for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Left,
    Right,
    /// Move down one row; locks the piece if it cannot move
    Down,
}

/// Horizontal direction of a held key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn command(self) -> Command {
        match self {
            Direction::Left => Command::Left,
            Direction::Right => Command::Right,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Repeat intervals in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatIntervals {
    pub horizontal_ms: u32,
    pub gravity_ms: u32,
    pub soft_drop_ms: u32,
}

/// Per-tick command batch
pub type Commands = ArrayVec<Command, MAX_COMMANDS_PER_TICK>;

/// Tracks held keys and repeat timers
#[derive(Debug, Clone)]
pub struct InputRepeat {
    intervals: RepeatIntervals,
    left_held: bool,
    right_held: bool,
    /// Direction that wins while both keys are held
    last_pressed: Direction,
    horizontal_elapsed_ms: u32,
    soft_drop_held: bool,
    down_elapsed_ms: u32,
}

impl InputRepeat {
    pub fn new(intervals: RepeatIntervals) -> Self {
        Self {
            intervals,
            left_held: false,
            right_held: false,
            last_pressed: Direction::Left,
            horizontal_elapsed_ms: 0,
            soft_drop_held: false,
            down_elapsed_ms: 0,
        }
    }

    pub fn intervals(&self) -> RepeatIntervals {
        self.intervals
    }

    /// Key-down for a horizontal direction
    ///
    /// Returns the immediate move, or `None` if the key was already held
    /// (terminals resend presses while a key is down).
    pub fn press(&mut self, dir: Direction) -> Option<Command> {
        let held = self.held_mut(dir);
        if *held {
            return None;
        }
        *held = true;
        self.last_pressed = dir;
        self.horizontal_elapsed_ms = 0;
        Some(dir.command())
    }

    /// Key-up for a horizontal direction
    ///
    /// If the opposite key is still down it takes over.
    pub fn release(&mut self, dir: Direction) {
        let held = self.held_mut(dir);
        if !*held {
            return;
        }
        *held = false;
        if self.is_held(dir.opposite()) {
            self.last_pressed = dir.opposite();
        }
    }

    /// Key-down for soft drop; returns the immediate downward move
    pub fn press_soft_drop(&mut self) -> Option<Command> {
        if self.soft_drop_held {
            return None;
        }
        self.soft_drop_held = true;
        self.down_elapsed_ms = 0;
        Some(Command::Down)
    }

    pub fn release_soft_drop(&mut self) {
        self.soft_drop_held = false;
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left_held,
            Direction::Right => self.right_held,
        }
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Direction currently repeating, if any
    pub fn active_direction(&self) -> Option<Direction> {
        match (self.left_held, self.right_held) {
            (true, true) => Some(self.last_pressed),
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            (false, false) => None,
        }
    }

    /// Interval the downward accumulator currently fires at
    pub fn down_interval_ms(&self) -> u32 {
        if self.soft_drop_held {
            self.intervals.soft_drop_ms
        } else {
            self.intervals.gravity_ms
        }
    }

    /// Advance the timers and collect the commands that came due
    ///
    /// Horizontal repeats come first, then gravity, matching the order a
    /// player would see with one command per frame.
    pub fn advance(&mut self, elapsed_ms: u32) -> Commands {
        let mut out = Commands::new();

        match self.active_direction() {
            Some(dir) => {
                self.horizontal_elapsed_ms = self.horizontal_elapsed_ms.saturating_add(elapsed_ms);
                fire(
                    &mut self.horizontal_elapsed_ms,
                    self.intervals.horizontal_ms,
                    dir.command(),
                    &mut out,
                );
            }
            None => self.horizontal_elapsed_ms = 0,
        }

        let interval = self.down_interval_ms();
        self.down_elapsed_ms = self.down_elapsed_ms.saturating_add(elapsed_ms);
        fire(&mut self.down_elapsed_ms, interval, Command::Down, &mut out);

        out
    }

    /// Zero both accumulators; held keys stay held
    pub fn reset_timers(&mut self) {
        self.horizontal_elapsed_ms = 0;
        self.down_elapsed_ms = 0;
    }

    fn held_mut(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Left => &mut self.left_held,
            Direction::Right => &mut self.right_held,
        }
    }
}

/// Emit `command` once per whole `interval` in `elapsed`, keeping the remainder
fn fire(elapsed: &mut u32, interval: u32, command: Command, out: &mut Commands) {
    if interval == 0 {
        return;
    }
    while *elapsed >= interval {
        if out.try_push(command).is_err() {
            // Drop the backlog instead of replaying a long stall.
            *elapsed %= interval;
            break;
        }
        *elapsed -= interval;
    }
}
